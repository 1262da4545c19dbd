//! Shot repository trait definition.
//!
//! This port defines the interface for the `shots` collection and its
//! secondary lookups (by timestamp, bean and rating).

use async_trait::async_trait;

use super::StorageError;
use crate::domain::{NewShot, Shot};

/// Repository for the `shots` collection.
///
/// # Design Rules
///
/// - Listing order is always most recent first, ties broken by id descending
/// - `bean_id` is not checked against the `beans` collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShotRepository: Send + Sync {
    /// Insert a validated shot and return it with its assigned id.
    async fn insert(&self, shot: NewShot) -> Result<Shot, StorageError>;

    /// List every shot, most recent first.
    async fn list_recent(&self) -> Result<Vec<Shot>, StorageError>;

    /// List the shots pulled with one bean, most recent first.
    async fn list_for_bean(&self, bean_id: i64) -> Result<Vec<Shot>, StorageError>;

    /// List the shots rated `min_rating` or better, most recent first.
    async fn list_min_rating(&self, min_rating: u8) -> Result<Vec<Shot>, StorageError>;

    /// Number of stored shots.
    async fn count(&self) -> Result<i64, StorageError>;
}
