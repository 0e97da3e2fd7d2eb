//! Durable key-value slot abstraction and implementations.
//!
//! # Responsibility
//! - Define the minimal read/overwrite contract the task store persists to.
//! - Open and configure SQLite connections backing the file slot.
//!
//! # Invariants
//! - A write replaces the whole value stored under a key.
//! - Slot schema version is tracked via `PRAGMA user_version`.
//! - Slots must not be read or written before the schema exists.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory_slot;
mod open;
mod sqlite_slot;

pub use memory_slot::MemorySlot;
pub use open::{open_db, open_db_in_memory};
pub use sqlite_slot::{SqliteSlot, SCHEMA_VERSION};

/// Key of the entry holding the serialized task collection.
pub const TASKS_STORAGE_KEY: &str = "todoTasks";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    Io(std::io::Error),
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
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Single-writer durable key-value storage.
pub trait KeyValueSlot {
    /// Returns the value stored under `key`, or `None` when absent.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, overwriting any prior value.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: KeyValueSlot + ?Sized> KeyValueSlot for Box<S> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}
