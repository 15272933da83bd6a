//! SQLite implementation of the storage backend contract.
//!
//! # Responsibility
//! - Persist collection records in the unified `records` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Accepted connections must be migrated to the latest schema version.
//! - Payloads are stored verbatim and never interpreted.

use super::{StorageBackend, StorageError, StorageResult};
use crate::db::migrations::latest_version;
use crate::db::{open_db, open_db_in_memory, DbResult};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite-backed record storage over a migrated connection.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Wraps an already-opened connection after verifying it is usable.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    /// - `MissingRequiredTable` when the `records` table is absent.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        if !table_exists(&conn, "records")? {
            return Err(StorageError::MissingRequiredTable("records"));
        }

        Ok(Self { conn })
    }

    /// Opens a database file, applies migrations and wraps the connection.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        let conn = open_db(path)?;
        Ok(Self { conn })
    }

    /// Opens an in-memory database, applies migrations and wraps the
    /// connection. Intended for tests and previews.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self { conn })
    }
}

impl StorageBackend for SqliteStorage {
    fn get(&self, collection: &str, key: &str) -> StorageResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM records WHERE collection = ?1 AND key = ?2;")?;
        let mut rows = stmt.query(params![collection, key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn set(&mut self, collection: &str, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO records (collection, key, value)
             VALUES (?1, ?2, ?3)
             ON CONFLICT (collection, key) DO UPDATE SET value = excluded.value;",
            params![collection, key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, collection: &str, key: &str) -> StorageResult<()> {
        self.conn.execute(
            "DELETE FROM records WHERE collection = ?1 AND key = ?2;",
            params![collection, key],
        )?;
        Ok(())
    }

    fn iterate(
        &self,
        collection: &str,
        visit: &mut dyn FnMut(&str, &str),
    ) -> StorageResult<()> {
        let mut stmt = self.conn.prepare(
            "SELECT key, value FROM records WHERE collection = ?1 ORDER BY key ASC;",
        )?;
        let mut rows = stmt.query(params![collection])?;
        while let Some(row) = rows.next()? {
            let key: String = row.get(0)?;
            let value: String = row.get(1)?;
            visit(key.as_str(), value.as_str());
        }
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> StorageResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
