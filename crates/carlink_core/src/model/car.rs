//! Car record (dependent side; owns the relationship key).

use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Auto-assigned primary key of `cars`.
pub type CarId = i64;

/// Persisted car row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub make: String,
    pub model: String,
    /// Foreign key to `users.id`; always the id of the linked user.
    pub user_id: UserId,
}

impl Display for Car {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Car {} {} ({}) has user #{}",
            self.make, self.model, self.id, self.user_id
        )
    }
}
