//! Schema definition and full reset for `users`/`cars`.
//!
//! # Responsibility
//! - Drop and recreate both tables from the embedded definition.
//! - Report whether a connection's schema is usable by this binary.
//!
//! # Invariants
//! - A reset is all-or-nothing: one transaction covers drop, create and version stamp.
//! - `foreign_keys` is ON again after a reset, whether it succeeded or not.
//! - Dropping the AUTOINCREMENT tables clears their `sqlite_sequence` rows, so ids
//!   restart at 1.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::time::Instant;

/// Version stamped into `PRAGMA user_version` by `reset_schema`.
pub const SCHEMA_VERSION: u32 = 1;

const SCHEMA_SQL: &str = include_str!("users_cars.sql");

// Dependent side first; both tables reference each other.
const DROP_SQL: &str = "DROP TABLE IF EXISTS cars;
DROP TABLE IF EXISTS users;";

/// Drops all store tables (if present) and recreates them empty.
///
/// Destroys every persisted user and car. Repeated calls leave the same
/// empty, freshly structured store.
pub fn reset_schema(conn: &mut Connection) -> DbResult<()> {
    let started_at = Instant::now();
    info!("event=schema_reset module=db status=start");

    // The two tables reference each other, so either drop order would trip
    // an immediate foreign key check. The pragma is a no-op inside a
    // transaction and has to be toggled around it.
    conn.pragma_update(None, "foreign_keys", false)?;
    let rebuilt = rebuild_tables(conn);
    let restored = conn.pragma_update(None, "foreign_keys", true);

    let outcome = rebuilt.and(restored.map_err(DbError::from));
    match &outcome {
        Ok(()) => info!(
            "event=schema_reset module=db status=ok version={SCHEMA_VERSION} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=schema_reset module=db status=error duration_ms={} error={}",
            started_at.elapsed().as_millis(),
            err
        ),
    }
    outcome
}

/// Returns the schema version recorded on this connection (0 when never reset).
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Fails unless the connection carries exactly the schema this binary writes.
pub fn ensure_schema_ready(conn: &Connection) -> DbResult<()> {
    match schema_version(conn)? {
        0 => Err(DbError::SchemaNotInitialized),
        version if version > SCHEMA_VERSION => Err(DbError::UnsupportedSchemaVersion {
            db_version: version,
            latest_supported: SCHEMA_VERSION,
        }),
        _ => Ok(()),
    }
}

fn rebuild_tables(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(DROP_SQL)?;
    tx.execute_batch(SCHEMA_SQL)?;
    tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema_ready, reset_schema, schema_version, SCHEMA_VERSION};
    use crate::db::{open_db_in_memory, DbError};

    #[test]
    fn fresh_connection_is_not_ready() {
        let conn = open_db_in_memory().unwrap();
        assert_eq!(schema_version(&conn).unwrap(), 0);
        assert!(matches!(
            ensure_schema_ready(&conn),
            Err(DbError::SchemaNotInitialized)
        ));
    }

    #[test]
    fn reset_stamps_version_and_keeps_foreign_keys_on() {
        let mut conn = open_db_in_memory().unwrap();
        reset_schema(&mut conn).unwrap();

        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
        ensure_schema_ready(&conn).unwrap();
        let foreign_keys: i64 = conn
            .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(foreign_keys, 1);
    }

    #[test]
    fn newer_version_is_rejected() {
        let conn = open_db_in_memory().unwrap();
        conn.execute_batch("PRAGMA user_version = 42;").unwrap();

        match ensure_schema_ready(&conn) {
            Err(DbError::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            }) => {
                assert_eq!(db_version, 42);
                assert_eq!(latest_supported, SCHEMA_VERSION);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
