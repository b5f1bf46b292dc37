//! Address-book schema registry and version checks.
//!
//! # Responsibility
//! - Register address-book schema migrations in strictly increasing order.
//! - Bring writable databases up to date in one transaction.
//! - Verify read-only databases without touching them.
//!
//! # Invariants
//! - `version` values must remain monotonic.
//! - Applied migration version is mirrored to `PRAGMA user_version`.
//! - A database newer than `latest_version()` is never opened.

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_address_book.sql"),
}];

/// Returns the latest migration version known by this binary.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the database is newer than
///   this binary.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current_version = supported_user_version(conn)?;
    let latest = latest_version();
    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending(current_version) {
        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        current_version, latest
    );
    Ok(())
}

/// Checks that an address book can be read as-is.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the database is newer.
/// - `DbError::SchemaNotReady` when migrations are still pending, which
///   includes an empty file that was never an address book.
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    let current_version = supported_user_version(conn)?;
    let latest = latest_version();
    if current_version < latest {
        warn!(
            "event=db_verify module=db status=error error_code=schema_not_ready db_version={} required={} pending={}",
            current_version,
            latest,
            pending(current_version).count()
        );
        return Err(DbError::SchemaNotReady {
            db_version: current_version,
            required: latest,
        });
    }
    Ok(())
}

fn pending(current_version: u32) -> impl Iterator<Item = &'static Migration> {
    MIGRATIONS
        .iter()
        .filter(move |migration| migration.version > current_version)
}

fn supported_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    let latest = latest_version();
    if version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: version,
            latest_supported: latest,
        });
    }
    Ok(version)
}
