//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - Traits are minimal and append-only: insert and read, never update or delete
//! - Every read re-fetches from storage; ports never cache

pub mod bean_repository;
pub mod shot_repository;

use std::sync::Arc;
use thiserror::Error;

use crate::domain::ValidationError;

// Re-export repository traits for convenience
pub use bean_repository::BeanRepository;
pub use shot_repository::ShotRepository;

/// Container for all repository trait objects.
///
/// Lives in `barista-core` so that `RecordService` can accept it without
/// depending on `barista-db`.
#[derive(Clone)]
pub struct Repos {
    /// Bean collection.
    pub beans: Arc<dyn BeanRepository>,
    /// Shot collection.
    pub shots: Arc<dyn ShotRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(beans: Arc<dyn BeanRepository>, shots: Arc<dyn ShotRepository>) -> Self {
        Self { beans, shots }
    }
}

/// Failures of the persistent store.
///
/// Surfaced to the caller verbatim. The core never retries a failed
/// operation and never degrades to a partial result.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage engine could not be opened or is no longer reachable.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// A transaction failed and was rolled back.
    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),

    /// The device ran out of space for the store.
    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),

    /// The store file cannot be written or opened with the needed access.
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// The stored schema was written by a newer version of the application.
    #[error("Schema version {stored} is newer than the supported version {supported}")]
    SchemaMismatch { stored: i64, supported: i64 },

    /// A stored row could not be decoded into a domain record.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type returned by `RecordService`.
/// Adapters map it to their own error types (CLI exit codes, etc.).
#[derive(Debug, Error)]
pub enum CoreError {
    /// The store failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Input was rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Whether this error was raised at the input boundary.
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
