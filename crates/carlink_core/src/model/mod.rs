//! Record types for the user/car one-to-one association.
//!
//! # Responsibility
//! - Define persisted `User` and `Car` rows and the unsaved pair draft.
//!
//! # Invariants
//! - `Car::user_id` is the declared relationship key (dependent side).
//! - `User::car_id` is a display column populated by the store, never a
//!   constraint source.
//! - Navigation between the two is done by id lookup, not by owned references.

pub mod car;
pub mod user;

/// In-memory draft of a user and the car linked to it, saved together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLinkedPair {
    /// User display name.
    pub name: String,
    /// Car manufacturer.
    pub make: String,
    /// Car model designation.
    pub model: String,
}

impl NewLinkedPair {
    pub fn new(name: impl Into<String>, make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            make: make.into(),
            model: model.into(),
        }
    }
}
