//! Default storage locations.
//!
//! Data lives under the per-user local data directory, overridable per
//! backend through environment variables.

use std::path::PathBuf;

/// Overrides the JSON data file location.
pub const DATA_PATH_VAR: &str = "SPROUT_DATA_PATH";
/// Overrides the SQLite database location.
pub const SQLITE_PATH_VAR: &str = "SPROUT_SQLITE_PATH";

/// Base data directory for sprout.
#[must_use]
pub fn data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(path) => path.join("sprout"),
        None => PathBuf::from(".").join("sprout"),
    }
}

#[must_use]
pub fn default_json_path() -> PathBuf {
    std::env::var_os(DATA_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir().join("data.json"))
}

#[must_use]
pub fn default_sqlite_path() -> PathBuf {
    std::env::var_os(SQLITE_PATH_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir().join("data.db"))
}
