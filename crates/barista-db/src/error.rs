//! Mapping from `sqlx` failures to the core `StorageError` taxonomy.

use barista_core::StorageError;
use thiserror::Error;

// Primary SQLite result codes (the low byte of an extended code).
const SQLITE_PERM: i32 = 3;
const SQLITE_READONLY: i32 = 8;
const SQLITE_CANTOPEN: i32 = 14;
const SQLITE_FULL: i32 = 13;
const SQLITE_AUTH: i32 = 23;

/// Failure inside a store operation.
///
/// Operations run by `Store::execute` return this so they can use `?` on
/// `sqlx` calls and still report values that fail to encode or decode.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    /// A stored row could not be turned back into a record.
    #[error("{0}")]
    Decode(String),

    /// A record could not be encoded for writing.
    #[error("{0}")]
    Encode(String),
}

impl From<OperationError> for StorageError {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::Sqlx(e) => map_sqlx_error(e),
            OperationError::Decode(msg) => Self::Corrupt(msg),
            OperationError::Encode(msg) => Self::TransactionAborted(msg),
        }
    }
}

/// Classify a `sqlx` error.
pub fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();
    match &err {
        sqlx::Error::Database(db) => {
            let primary = db
                .code()
                .and_then(|code| code.parse::<i32>().ok())
                .map(|code| code & 0xff);
            match primary {
                Some(SQLITE_FULL) => StorageError::QuotaExceeded(message),
                Some(SQLITE_PERM | SQLITE_READONLY | SQLITE_CANTOPEN | SQLITE_AUTH) => {
                    StorageError::PermissionDenied(message)
                }
                _ => StorageError::TransactionAborted(message),
            }
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Configuration(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => StorageError::Unavailable(message),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => StorageError::Corrupt(message),
        _ => StorageError::TransactionAborted(message),
    }
}
