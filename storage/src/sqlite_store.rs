//! SQLite backend.
//!
//! Deliberately not a relational schema: one table, one row, holding the
//! same JSON array the file backend writes. That keeps the two backends
//! semantically interchangeable at the cost of query-ability. Every save
//! replaces the row inside a transaction, which is this backend's atomic
//! replace.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension, params};
use sprout_types::GoalArea;
use tracing::debug;

use crate::{Storage, StorageError};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    // Table name kept from the original data files.
    const SCHEMA: &'static str = "
        CREATE TABLE IF NOT EXISTS raw_json (
            id INTEGER PRIMARY KEY,
            payload TEXT NOT NULL
        );
    ";

    /// Open (creating if needed) the database at `path`. Schema creation is
    /// idempotent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::initialize(conn)
    }

    /// Store at the conventional per-user data path.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(crate::paths::default_sqlite_path())
    }

    /// In-memory database, for tests.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        Self::initialize(Connection::open_in_memory()?)
    }

    fn initialize(conn: Connection) -> Result<Self, StorageError> {
        conn.execute_batch(Self::SCHEMA)?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStore {
    fn load(&self) -> Result<Vec<GoalArea>, StorageError> {
        let payload: Option<String> = self
            .conn
            .query_row("SELECT payload FROM raw_json ORDER BY id LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?;
        match payload {
            // No row yet: first run, not an error.
            None => Ok(Vec::new()),
            Some(raw) => Ok(serde_json::from_str(&raw)?),
        }
    }

    fn save(&mut self, goals: &[GoalArea]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(goals)?;
        debug!(count = goals.len(), bytes = payload.len(), "replacing goal payload row");
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM raw_json", [])?;
        tx.execute("INSERT INTO raw_json (payload) VALUES (?1)", params![payload])?;
        tx.commit()?;
        Ok(())
    }
}
