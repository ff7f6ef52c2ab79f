//! User/car repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist a cross-linked user/car pair in one transaction.
//! - Read back rows and resolve either side of the association by id.
//!
//! # Invariants
//! - The user row is inserted first; its generated id becomes `cars.user_id`.
//! - `users.car_id` is written only under `PrincipalKeySync::WriteBack`.
//! - Reads return stored key columns as-is; nothing is re-derived.
//! - A user linked to more than one car is reported as invalid data.

use crate::config::PrincipalKeySync;
use crate::db::schema::ensure_schema_ready;
use crate::db::DbError;
use crate::model::car::{Car, CarId};
use crate::model::user::{User, UserId};
use crate::model::NewLinkedPair;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const USER_SELECT_SQL: &str = "SELECT id, name, car_id FROM users";
const CAR_SELECT_SQL: &str = "SELECT id, make, model, user_id FROM cars";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user/car persistence and lookups.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound { entity: &'static str, id: i64 },
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the user/car association.
pub trait RelationshipRepository {
    /// Saves a new user and its car atomically and returns both stored rows.
    fn create_linked_pair(
        &mut self,
        draft: &NewLinkedPair,
        key_sync: PrincipalKeySync,
    ) -> RepoResult<(User, Car)>;
    /// Lists every user ordered by id.
    fn list_users(&self) -> RepoResult<Vec<User>>;
    /// Lists every car ordered by id.
    fn list_cars(&self) -> RepoResult<Vec<Car>>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    fn get_car(&self, id: CarId) -> RepoResult<Option<Car>>;
    /// Resolves the car whose `user_id` points at the given user.
    fn car_for_user(&self, user_id: UserId) -> RepoResult<Option<Car>>;
    /// Resolves the user referenced by the given car's `user_id`.
    fn user_for_car(&self, car_id: CarId) -> RepoResult<User>;
}

/// SQLite-backed user/car repository.
pub struct SqliteRelationshipRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteRelationshipRepository<'conn> {
    /// Constructs a repository over a connection whose schema has been reset.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl RelationshipRepository for SqliteRelationshipRepository<'_> {
    fn create_linked_pair(
        &mut self,
        draft: &NewLinkedPair,
        key_sync: PrincipalKeySync,
    ) -> RepoResult<(User, Car)> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(
            "INSERT INTO users (name, car_id) VALUES (?1, NULL);",
            [draft.name.as_str()],
        )?;
        let user_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO cars (make, model, user_id) VALUES (?1, ?2, ?3);",
            params![draft.make.as_str(), draft.model.as_str(), user_id],
        )?;
        let car_id = tx.last_insert_rowid();

        let stored_car_id = match key_sync {
            PrincipalKeySync::WriteBack => {
                tx.execute(
                    "UPDATE users SET car_id = ?1 WHERE id = ?2;",
                    params![car_id, user_id],
                )?;
                Some(car_id)
            }
            PrincipalKeySync::Skip => None,
        };

        tx.commit()?;
        info!(
            "event=pair_create module=repo status=ok user_id={user_id} car_id={car_id} key_sync={key_sync:?}"
        );

        Ok((
            User {
                id: user_id,
                name: draft.name.clone(),
                car_id: stored_car_id,
            },
            Car {
                id: car_id,
                make: draft.make.clone(),
                model: draft.model.clone(),
                user_id,
            },
        ))
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY id ASC;"))?;
        let users = stmt
            .query_map([], parse_user_row)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!("event=users_list module=repo status=ok count={}", users.len());
        Ok(users)
    }

    fn list_cars(&self) -> RepoResult<Vec<Car>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CAR_SELECT_SQL} ORDER BY id ASC;"))?;
        let cars = stmt
            .query_map([], parse_car_row)?
            .collect::<Result<Vec<_>, _>>()?;
        debug!("event=cars_list module=repo status=ok count={}", cars.len());
        Ok(cars)
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let user = self
            .conn
            .query_row(
                &format!("{USER_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_user_row,
            )
            .optional()?;
        Ok(user)
    }

    fn get_car(&self, id: CarId) -> RepoResult<Option<Car>> {
        let car = self
            .conn
            .query_row(
                &format!("{CAR_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_car_row,
            )
            .optional()?;
        Ok(car)
    }

    fn car_for_user(&self, user_id: UserId) -> RepoResult<Option<Car>> {
        if self.get_user(user_id)?.is_none() {
            return Err(RepoError::NotFound {
                entity: "user",
                id: user_id,
            });
        }

        let mut stmt = self
            .conn
            .prepare(&format!("{CAR_SELECT_SQL} WHERE user_id = ?1 ORDER BY id ASC;"))?;
        let mut cars = stmt
            .query_map([user_id], parse_car_row)?
            .collect::<Result<Vec<_>, _>>()?;

        if cars.len() > 1 {
            return Err(RepoError::InvalidData(format!(
                "user {user_id} is linked to {} cars",
                cars.len()
            )));
        }
        Ok(cars.pop())
    }

    fn user_for_car(&self, car_id: CarId) -> RepoResult<User> {
        let car = self.get_car(car_id)?.ok_or(RepoError::NotFound {
            entity: "car",
            id: car_id,
        })?;

        self.get_user(car.user_id)?.ok_or_else(|| {
            RepoError::InvalidData(format!(
                "car {car_id} references missing user {}",
                car.user_id
            ))
        })
    }
}

fn parse_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        name: row.get("name")?,
        car_id: row.get("car_id")?,
    })
}

fn parse_car_row(row: &Row<'_>) -> rusqlite::Result<Car> {
    Ok(Car {
        id: row.get("id")?,
        make: row.get("make")?,
        model: row.get("model")?,
        user_id: row.get("user_id")?,
    })
}
