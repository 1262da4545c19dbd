//! Composition utilities for wiring the record service to `SQLite`.
//!
//! Construction only. Domain logic lives in `barista-core`.

use std::sync::Arc;

use barista_core::{Repos, RecordService};

use crate::repositories::{SqliteBeanRepository, SqliteShotRepository};
use crate::store::Store;

/// Factory for repository instances backed by a [`Store`].
pub struct RepoFactory;

impl RepoFactory {
    /// Build both repositories over one store.
    ///
    /// Returns the `Repos` bundle from `barista-core` with trait-object
    /// wrapped repositories.
    pub fn build_repos(store: &Store) -> Repos {
        Repos::new(
            Arc::new(SqliteBeanRepository::new(store.clone())),
            Arc::new(SqliteShotRepository::new(store.clone())),
        )
    }

    /// Build a ready-to-use `RecordService`. Equivalent to:
    ///
    /// ```ignore
    /// let service = RecordService::new(RepoFactory::build_repos(&store));
    /// ```
    pub fn record_service(store: &Store) -> RecordService {
        RecordService::new(Self::build_repos(store))
    }
}

/// In-memory database with the production schema applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    store: Store,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database.
    pub async fn new() -> Result<Self, barista_core::StorageError> {
        Ok(Self {
            store: Store::open_in_memory().await?,
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn repos(&self) -> Repos {
        RepoFactory::build_repos(&self.store)
    }

    pub fn record_service(&self) -> RecordService {
        RepoFactory::record_service(&self.store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barista_core::{BeanInput, ShotInput};

    #[tokio::test]
    async fn test_repos_share_one_store() {
        let db = TestDb::new().await.unwrap();
        let service = db.record_service();

        let bean = service
            .add_bean(BeanInput::new("Geometry", "Onyx"))
            .await
            .unwrap();
        let input = ShotInput {
            bean_id: Some(bean.id.to_string()),
            grind_setting_outside: Some("5".into()),
            grind_setting_inside: Some("3".into()),
            grind_amount: Some("18".into()),
            dose_in: Some("18".into()),
            yield_out: Some("36".into()),
            extraction_time: Some("28".into()),
            ..ShotInput::default()
        };
        service.add_shot(input).await.unwrap();

        let repos = db.repos();
        assert_eq!(repos.beans.list().await.unwrap().len(), 1);
        assert_eq!(repos.shots.count().await.unwrap(), 1);
    }
}
