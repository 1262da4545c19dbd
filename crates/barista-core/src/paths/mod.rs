//! Path utilities for barista data directories.
//!
//! This module provides the canonical path resolution for:
//! - The application data root
//! - The database file
//! - User-supplied path overrides (`~` expansion, relative paths)
//!
//! # Design
//!
//! - Returns `PathBuf` and `PathError` for clear error handling
//! - No interactive/terminal I/O - adapters handle user prompts separately

mod database;
mod error;
mod platform;

#[cfg(test)]
mod test_utils;

// Error type
pub use error::PathError;

// Roots and overrides
pub use platform::{DATA_DIR_ENV, data_root, normalize_user_path};

// Database
pub use database::{DATABASE_FILE_NAME, database_path, resolve_database_path};
