//! Advancement configuration.
//!
//! The config loader lives outside this crate; evaluation consumes an
//! already-flat `key -> value` mapping (`advance.window`,
//! `advance.threshold`, `advance.strategy`, `advance.streak_to_advance`).
//! Missing or unparsable entries fall back to the built-in defaults so a
//! partial or stale config file never breaks evaluation.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Days considered by the ratio strategy.
pub const WINDOW_DEFAULT: u32 = 14;
/// Success ratio required by the ratio strategy.
pub const THRESHOLD_DEFAULT: f64 = 0.80;
/// Trailing successes required by the streak strategy.
pub const STREAK_DEFAULT: u32 = 10;

/// Progression evaluation modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Ratio,
    Streak,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown advancement strategy {0:?} (expected \"ratio\" or \"streak\")")]
pub struct StrategyParseError(String);

impl FromStr for Strategy {
    type Err = StrategyParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "ratio" => Ok(Self::Ratio),
            "streak" => Ok(Self::Streak),
            other => Err(StrategyParseError(other.to_string())),
        }
    }
}

/// Typed view over the `advance.*` settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdvanceConfig {
    pub window: u32,
    pub threshold: f64,
    pub strategy: Strategy,
    pub streak_to_advance: u32,
}

impl Default for AdvanceConfig {
    fn default() -> Self {
        Self {
            window: WINDOW_DEFAULT,
            threshold: THRESHOLD_DEFAULT,
            strategy: Strategy::Ratio,
            streak_to_advance: STREAK_DEFAULT,
        }
    }
}

impl AdvanceConfig {
    /// Build from a flat key→value mapping as handed over by the config
    /// loader. Unknown keys are ignored; unparsable values keep the default
    /// for that key.
    #[must_use]
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        Self {
            window: parse_or(map, "advance.window", defaults.window),
            threshold: parse_or(map, "advance.threshold", defaults.threshold),
            strategy: parse_or(map, "advance.strategy", defaults.strategy),
            streak_to_advance: parse_or(
                map,
                "advance.streak_to_advance",
                defaults.streak_to_advance,
            ),
        }
    }
}

fn parse_or<T>(map: &HashMap<String, String>, key: &str, default: T) -> T
where
    T: FromStr + Copy,
{
    match map.get(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = raw.as_str(), "unparsable advance setting, using default");
            default
        }),
    }
}
