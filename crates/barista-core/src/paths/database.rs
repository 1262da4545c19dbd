//! Database path resolution.
//!
//! Provides the canonical path to the barista `SQLite` database file.

use std::fs;
use std::path::PathBuf;

use super::error::PathError;
use super::platform::{data_root, normalize_user_path};

/// File name of the store inside the data directory.
pub const DATABASE_FILE_NAME: &str = "barista.db";

/// Get the path to the barista database file.
///
/// Returns `<data root>/data/barista.db`, creating the `data/`
/// subdirectory if it doesn't exist.
pub fn database_path() -> Result<PathBuf, PathError> {
    let data_dir = data_root()?.join("data");

    fs::create_dir_all(&data_dir).map_err(|e| PathError::CreateFailed {
        path: data_dir.clone(),
        reason: e.to_string(),
    })?;

    Ok(data_dir.join(DATABASE_FILE_NAME))
}

/// Resolve the database path, preferring an explicit override.
pub fn resolve_database_path(override_path: Option<&str>) -> Result<PathBuf, PathError> {
    match override_path {
        Some(raw) => normalize_user_path(raw),
        None => database_path(),
    }
}
