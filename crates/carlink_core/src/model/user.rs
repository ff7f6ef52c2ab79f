//! User record (principal side of the association).

use crate::model::car::CarId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Auto-assigned primary key of `users`.
pub type UserId = i64;

/// Persisted user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Stored value of `users.car_id`, returned as-is.
    ///
    /// `None` when the store was configured not to write the key back.
    pub car_id: Option<CarId>,
}

impl Display for User {
    /// Renders `User {name} ({id}) has car #{car_id}`; an unset key prints as `0`.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "User {} ({}) has car #{}",
            self.name,
            self.id,
            self.car_id.unwrap_or_default()
        )
    }
}
