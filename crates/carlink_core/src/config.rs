//! Store configuration passed explicitly to `RelationshipStore::new`.
//!
//! # Invariants
//! - The store never reads a connection target from globals or the environment.
//! - `PrincipalKeySync` is the only switch that changes write semantics.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the default database instance.
pub const DEFAULT_DATABASE_FILE: &str = "principal_dependent_ids.db";

/// Policy for the principal-side display column `users.car_id`.
///
/// Only `cars.user_id` is the declared relationship key. `users.car_id` is
/// filled in by the store, or not, depending on this policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKeySync {
    /// Write the generated car id back onto the user row in the same transaction.
    #[default]
    WriteBack,
    /// Leave `users.car_id` NULL; reads report it as unset.
    Skip,
}

/// Connection target and write policy for a `RelationshipStore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// SQLite database file opened by every store phase.
    pub database_path: PathBuf,
    /// How `users.car_id` is populated on save.
    pub key_sync: PrincipalKeySync,
}

impl StoreConfig {
    /// Builds a config targeting an explicit database file.
    pub fn at(database_path: impl AsRef<Path>) -> Self {
        Self {
            database_path: database_path.as_ref().to_path_buf(),
            key_sync: PrincipalKeySync::default(),
        }
    }

    /// Returns a copy using the given write-back policy.
    pub fn with_key_sync(mut self, key_sync: PrincipalKeySync) -> Self {
        self.key_sync = key_sync;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::at(DEFAULT_DATABASE_FILE)
    }
}
