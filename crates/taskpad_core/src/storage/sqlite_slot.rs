//! SQLite-backed durable slot.
//!
//! # Invariants
//! - One row per key in `kv_entries`; writes upsert the whole value.
//! - The connection handed in must come from [`super::open_db`] or
//!   [`super::open_db_in_memory`], which create the table.
//! - `PRAGMA user_version` records the slot schema; files written by a newer
//!   build are refused rather than reinterpreted.

use super::{KeyValueSlot, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

/// Slot schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

/// Creates `kv_entries` when missing and stamps the schema version.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
pub(super) fn ensure_schema(conn: &Connection) -> StorageResult<()> {
    let db_version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if db_version > SCHEMA_VERSION {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    conn.execute_batch(&format!(
        "CREATE TABLE IF NOT EXISTS kv_entries (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        );
        PRAGMA user_version = {SCHEMA_VERSION};"
    ))?;
    Ok(())
}

/// Key-value slot stored in the `kv_entries` table.
pub struct SqliteSlot {
    conn: Connection,
}

impl SqliteSlot {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Releases the underlying connection.
    pub fn into_inner(self) -> Connection {
        self.conn
    }
}

impl KeyValueSlot for SqliteSlot {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
