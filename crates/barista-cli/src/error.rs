//! CLI-specific error types and mappings.
//!
//! Maps `CoreError` and friends to exit codes and user-facing messages.

use barista_core::{CoreError, ExportError, PathError, StorageError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected input.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
            Self::Database(_) => 73, // EX_CANTCREAT (closest fit)
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(e) => Self::Arguments(e.to_string()),
            CoreError::Storage(e) => e.into(),
        }
    }
}

impl From<StorageError> for CliError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::SchemaMismatch { .. } => Self::Config(err.to_string()),
            other => Self::Database(other.to_string()),
        }
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<ExportError> for CliError {
    fn from(err: ExportError) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barista_core::ValidationError;

    #[test]
    fn test_validation_maps_to_usage() {
        let err = CliError::from(CoreError::from(ValidationError::RatingOutOfRange(9)));
        assert!(matches!(err, CliError::Arguments(_)));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_storage_maps_to_database() {
        let err = CliError::from(CoreError::from(StorageError::QuotaExceeded("disk full".into())));
        assert_eq!(err.exit_code(), 73);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_newer_schema_maps_to_config() {
        let err = CliError::from(StorageError::SchemaMismatch {
            stored: 7,
            supported: 2,
        });
        assert_eq!(err.exit_code(), 78);
    }

    #[test]
    fn test_io_error() {
        let err = CliError::from(std::io::Error::other("boom"));
        assert_eq!(err.exit_code(), 74);
    }
}
