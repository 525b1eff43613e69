//! Persistence backends for the Sprout goal tree.
//!
//! Everything above this crate depends only on the [`Storage`] trait; the
//! two implementations agree on the serialized shape of the tree, so a
//! caller can switch backends and read the same data:
//!
//! - [`JsonStore`]: one JSON document on disk, replaced atomically via
//!   temp-file + rename.
//! - [`SqliteStore`]: the identical JSON payload as the single row of a
//!   trivial `(id, payload)` table, replaced inside one transaction.
//!
//! Single-process, single-writer model: the advisory [`StorageLock`] is a
//! no-op scope guard, and atomicity protects against the process dying
//! mid-write, not against concurrent writers.

mod atomic_write;
mod json_store;
pub mod paths;
mod sqlite_store;

use sprout_types::GoalArea;
use thiserror::Error;

pub use json_store::JsonStore;
pub use sqlite_store::SqliteStore;

/// IO or deserialization failure that is not "no data yet". A missing file
/// or empty table is first-run emptiness and never surfaces as an error.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed goal data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("sqlite failure: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Advisory lock scope. Released when dropped, on every exit path.
///
/// The default implementation holds nothing: one process, one writer.
/// Backends arbitrating real contention can hand out a guard that owns an
/// actual lock.
#[derive(Debug)]
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct StorageLock {
    _held: (),
}

impl StorageLock {
    #[must_use]
    pub fn noop() -> Self {
        Self { _held: () }
    }
}

/// Persistence interface shared by all backends.
pub trait Storage {
    /// Every goal area in the tree; empty on first run.
    fn load(&self) -> Result<Vec<GoalArea>, StorageError>;

    /// Replace the entire persisted tree in one logically atomic operation.
    /// A subsequent [`Storage::load`] never observes a partial write.
    fn save(&mut self, goals: &[GoalArea]) -> Result<(), StorageError>;

    /// Upsert a single top-level goal area by id, falling back to a name
    /// match for data written before ids existed. Read-modify-write over
    /// `load`/`save`; not required to beat a full rewrite.
    fn save_one(&mut self, goal: &GoalArea) -> Result<(), StorageError> {
        let mut goals = self.load()?;
        match goals
            .iter_mut()
            .find(|g| g.id == goal.id || g.name == goal.name)
        {
            Some(slot) => *slot = goal.clone(),
            None => goals.push(goal.clone()),
        }
        self.save(&goals)
    }

    /// Advisory lock around a load→mutate→save cycle.
    fn lock(&self) -> StorageLock {
        StorageLock::noop()
    }
}
