//! Core domain for barista: beans, shots, the record service, analytics and
//! CSV export.
//!
//! This crate holds no storage code. Persistence is reached through the
//! port traits in [`ports`]; `barista-db` provides the `SQLite` adapters.
#![deny(unused_crate_dependencies)]

pub mod analytics;
pub mod domain;
pub mod export;
pub mod paths;
pub mod ports;
pub mod services;
pub mod utils;

// Re-export commonly used types for convenience
pub use analytics::{BeanStats, ShotAnalytics, SweetSpot};
pub use domain::{
    Bean, BeanInput, HIGH_RATING_THRESHOLD, MAX_RATING, NewBean, NewShot, Shot, ShotInput,
    ShotTag, ValidationError,
};
pub use export::{CSV_HEADER, ExportError, UNKNOWN_BEAN, export_filename, render_csv, to_csv};
pub use ports::{BeanRepository, CoreError, Repos, ShotRepository, StorageError};
pub use services::RecordService;

// Re-export path utilities
pub use paths::{
    DATA_DIR_ENV, DATABASE_FILE_NAME, PathError, data_root, database_path, normalize_user_path,
    resolve_database_path,
};
