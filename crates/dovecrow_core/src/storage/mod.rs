//! Key-value persistence backend contract.
//!
//! # Responsibility
//! - Define the storage seam the letter store persists through.
//! - Keep backends payload-agnostic: values are opaque JSON documents and
//!   timestamp reconstitution belongs to the store layer, not here.
//!
//! # Invariants
//! - A `(collection, key)` pair addresses at most one record.
//! - `set` on an existing key overwrites; `remove` of an absent key is a
//!   no-op.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod sqlite;

pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure raised by a persistence backend.
#[derive(Debug)]
pub enum StorageError {
    /// Underlying SQLite call failed.
    Sqlite(rusqlite::Error),
    /// Connection schema version does not match this binary.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Connection is missing a table the backend requires.
    MissingRequiredTable(&'static str),
    /// Backend could not service the call (non-SQLite implementations).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::Unavailable(message) => write!(f, "storage backend unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Persistence seam for the letter store.
///
/// Collections are addressed by logical name; values are serialized record
/// payloads the backend stores verbatim.
pub trait StorageBackend {
    /// Point lookup. `Ok(None)` when the key is absent.
    fn get(&self, collection: &str, key: &str) -> StorageResult<Option<String>>;

    /// Inserts or overwrites one record.
    fn set(&mut self, collection: &str, key: &str, value: &str) -> StorageResult<()>;

    /// Removes one record. Absence of the key is not an error.
    fn remove(&mut self, collection: &str, key: &str) -> StorageResult<()>;

    /// Visits every record in a collection in stable key order.
    fn iterate(
        &self,
        collection: &str,
        visit: &mut dyn FnMut(&str, &str),
    ) -> StorageResult<()>;
}
