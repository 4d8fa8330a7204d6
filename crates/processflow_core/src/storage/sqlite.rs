//! SQLite implementation of the key-value store contract.
//!
//! # Responsibility
//! - Map `read`/`write`/`delete` onto the single `kv` table.
//! - Reject connections whose schema was never migrated.

use super::migrations::{current_user_version, latest_version};
use super::{KeyValueStore, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv";
const KV_COLUMNS: &[&str] = &["key", "value", "updated_at"];

/// SQLite-backed key-value store.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Constructs a store from a migrated, ready connection.
    ///
    /// # Errors
    /// - `UninitializedStore` when the connection was never migrated.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the schema does
    ///   not carry the expected `kv` shape.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1;", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        self.conn.execute("DELETE FROM kv WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> StorageResult<()> {
    let actual_version = current_user_version(conn)?;
    let expected_version = latest_version();
    if actual_version != expected_version {
        if actual_version > expected_version {
            return Err(StorageError::UnsupportedSchemaVersion {
                db_version: actual_version,
                latest_supported: expected_version,
            });
        }
        return Err(StorageError::UninitializedStore {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [KV_TABLE],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(StorageError::MissingRequiredTable(KV_TABLE));
    }

    for &column in KV_COLUMNS {
        let column_exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM pragma_table_info(?1) WHERE name = ?2
            );",
            params![KV_TABLE, column],
            |row| row.get(0),
        )?;
        if column_exists == 0 {
            return Err(StorageError::MissingRequiredColumn {
                table: KV_TABLE,
                column,
            });
        }
    }

    Ok(())
}
