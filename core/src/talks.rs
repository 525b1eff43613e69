//! Pep-talk template pool.
//!
//! Short motivational messages keyed by mood (`"success"` | `"skip"`),
//! loaded once at construction from a JSON file of `{mood: [message, ...]}`.
//! An explicit instance rather than a process-wide cache, so independent
//! pools can coexist in tests. The chosen message feeds a check-in's
//! `generated_message` field.

use std::collections::HashMap;
use std::path::Path;

use rand::{Rng, RngExt};
use thiserror::Error;

/// Used when a mood has no templates at all.
pub const FALLBACK_TALK: &str = "Great job!";

#[derive(Debug, Error)]
pub enum TalkPoolError {
    #[error("failed to read talk templates: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed talk templates: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default)]
pub struct TalkPool {
    pools: HashMap<String, Vec<String>>,
}

impl TalkPool {
    #[must_use]
    pub fn new(pools: HashMap<String, Vec<String>>) -> Self {
        Self { pools }
    }

    /// Load and parse a template file eagerly.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TalkPoolError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(Self::new(serde_json::from_str(&raw)?))
    }

    /// Uniformly random message for `mood`, or the fallback when the mood
    /// has no templates.
    #[must_use]
    pub fn random(&self, mood: &str) -> String {
        self.random_with(&mut rand::rng(), mood)
    }

    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R, mood: &str) -> String {
        match self.pools.get(mood) {
            Some(pool) if !pool.is_empty() => {
                let idx = rng.random_range(0..pool.len());
                pool[idx].clone()
            }
            _ => FALLBACK_TALK.to_string(),
        }
    }
}
