//! Relationship store: the public entry point for reset, create and read.
//!
//! # Responsibility
//! - Open one connection per operation from the injected `StoreConfig`.
//! - Delegate persistence to `SqliteRelationshipRepository`.
//!
//! # Invariants
//! - No connection outlives the call that opened it, on success or failure.
//! - The store holds no state besides its configuration.

use crate::config::StoreConfig;
use crate::db::open_db;
use crate::db::schema::reset_schema;
use crate::model::car::{Car, CarId};
use crate::model::user::{User, UserId};
use crate::model::NewLinkedPair;
use crate::repo::relationship_repo::{
    RelationshipRepository, RepoResult, SqliteRelationshipRepository,
};
use rusqlite::Connection;

/// Stateless store over the database named in its configuration.
#[derive(Debug, Clone)]
pub struct RelationshipStore {
    config: StoreConfig,
}

impl RelationshipStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Drops and recreates the schema, discarding all users and cars.
    pub fn reset_schema(&self) -> RepoResult<()> {
        let mut conn = self.connect()?;
        reset_schema(&mut conn)?;
        Ok(())
    }

    /// Creates a user and its car in one save.
    ///
    /// # Contract
    /// - `Car::user_id == User::id` always holds for the returned pair.
    /// - `User::car_id == Some(Car::id)` holds under `PrincipalKeySync::WriteBack`;
    ///   under `Skip` it is `None`.
    pub fn create_linked_pair(
        &self,
        name: impl Into<String>,
        make: impl Into<String>,
        model: impl Into<String>,
    ) -> RepoResult<(User, Car)> {
        let draft = NewLinkedPair::new(name, make, model);
        let key_sync = self.config.key_sync;
        self.with_repo(|repo| repo.create_linked_pair(&draft, key_sync))
    }

    /// Returns every stored user, each with its stored `car_id`.
    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.with_repo(|repo| repo.list_users())
    }

    /// Returns every stored car, each with its stored `user_id`.
    pub fn list_cars(&self) -> RepoResult<Vec<Car>> {
        self.with_repo(|repo| repo.list_cars())
    }

    /// Follows the association from a user to its car.
    pub fn car_for_user(&self, user_id: UserId) -> RepoResult<Option<Car>> {
        self.with_repo(|repo| repo.car_for_user(user_id))
    }

    /// Follows the association from a car to its user.
    pub fn user_for_car(&self, car_id: CarId) -> RepoResult<User> {
        self.with_repo(|repo| repo.user_for_car(car_id))
    }

    fn connect(&self) -> RepoResult<Connection> {
        Ok(open_db(&self.config.database_path)?)
    }

    fn with_repo<T>(
        &self,
        op: impl FnOnce(&mut SqliteRelationshipRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let mut conn = self.connect()?;
        let mut repo = SqliteRelationshipRepository::try_new(&mut conn)?;
        op(&mut repo)
    }
}
