//! Core persistence logic for the user/car one-to-one link.
//! This crate owns the schema, the key-linking rules and the read paths.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{PrincipalKeySync, StoreConfig, DEFAULT_DATABASE_FILE};
pub use logging::{default_log_level, init_logging};
pub use model::car::{Car, CarId};
pub use model::user::{User, UserId};
pub use model::NewLinkedPair;
pub use repo::relationship_repo::{
    RelationshipRepository, RepoError, RepoResult, SqliteRelationshipRepository,
};
pub use service::relationship_store::RelationshipStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
