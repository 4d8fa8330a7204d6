//! Key-value storage abstraction and its SQLite backing.
//!
//! # Responsibility
//! - Define the injected storage contract the repositories run on: whole
//!   JSON values read and written by key, exactly like the browser
//!   local-storage layout this core replaces.
//! - Bootstrap SQLite connections and apply schema migrations.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Repositories must not touch application data before migrations succeed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod sqlite;

pub use open::{open_store, open_store_in_memory};
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage transport and schema readiness errors.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// The database was written by a newer binary.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// The connection was never migrated.
    UninitializedStore {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::UninitializedStore {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store connection not migrated: expected schema version \
                 {expected_version}, found {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Injected storage contract for the repositories.
///
/// Values are opaque JSON documents; each key holds a whole collection
/// (documents, users, session marker). Absent keys read as `None`.
pub trait KeyValueStore {
    /// Reads the whole value stored under `key`.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes (upserts) the whole value stored under `key`.
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key`. No-op when absent.
    fn delete(&self, key: &str) -> StorageResult<()>;
}
