//! JSON-file backend.
//!
//! The whole goal tree is one pretty-printed JSON array on disk, easy to
//! inspect and back up by hand. Saves go through [`atomic_write`] so a
//! half-written file is never observable.

use std::path::{Path, PathBuf};

use sprout_types::GoalArea;
use tracing::debug;

use crate::atomic_write::atomic_write;
use crate::{Storage, StorageError};

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the conventional per-user data path.
    #[must_use]
    pub fn at_default_path() -> Self {
        Self::new(crate::paths::default_json_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for JsonStore {
    fn load(&self) -> Result<Vec<GoalArea>, StorageError> {
        debug!(path = %self.path.display(), "loading goals");
        if !self.path.exists() {
            // First run or missing data file: empty, not an error.
            debug!("data file not found; returning empty list");
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        let goals: Vec<GoalArea> = serde_json::from_str(&raw)?;
        debug!(count = goals.len(), "loaded goal areas");
        Ok(goals)
    }

    fn save(&mut self, goals: &[GoalArea]) -> Result<(), StorageError> {
        debug!(path = %self.path.display(), count = goals.len(), "saving goals");
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_vec_pretty(goals)?;
        atomic_write(&self.path, &payload)?;
        Ok(())
    }
}
