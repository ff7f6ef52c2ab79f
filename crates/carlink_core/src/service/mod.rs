//! Use-case services.
//!
//! # Responsibility
//! - Turn repository calls into phase-level operations with scoped connections.
//! - Keep callers decoupled from connection handling and SQL.

pub mod relationship_store;
