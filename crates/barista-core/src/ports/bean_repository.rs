//! Bean repository trait definition.
//!
//! This port defines the interface for the `beans` collection.
//! Implementations handle all storage details internally.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::{Bean, NewBean};

/// Repository for the `beans` collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BeanRepository: Send + Sync {
    /// Insert a validated bean and return it with its assigned id.
    async fn insert(&self, bean: NewBean) -> Result<Bean, StorageError>;

    /// List every bean, oldest first.
    async fn list(&self) -> Result<Vec<Bean>, StorageError>;

    /// Look up a bean by id.
    async fn get(&self, id: i64) -> Result<Option<Bean>, StorageError>;
}
