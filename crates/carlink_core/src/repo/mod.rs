//! Repository layer for user/car persistence.
//!
//! # Responsibility
//! - Define the data access contract for the one-to-one association.
//! - Keep SQLite query details out of the service layer.
//!
//! # Invariants
//! - Repositories are only built on connections with a ready schema.
//! - Lookups return semantic errors (`NotFound`, `InvalidData`) in addition
//!   to DB transport errors.

pub mod relationship_repo;
