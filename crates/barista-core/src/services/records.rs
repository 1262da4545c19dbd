//! Record service - validated writes and reads over the bean and shot ports.
//!
//! Inputs arrive as explicit request values; the service holds no session
//! state and no cached copy of any record.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{Bean, BeanInput, Shot, ShotInput};
use crate::ports::{CoreError, Repos};

/// Domain-level CRUD for beans and shots.
pub struct RecordService {
    repos: Repos,
    clock: fn() -> DateTime<Utc>,
}

impl RecordService {
    /// Create a record service that stamps shots with the current time.
    pub fn new(repos: Repos) -> Self {
        Self::with_clock(repos, Utc::now)
    }

    /// Create a record service with a custom clock.
    pub fn with_clock(repos: Repos, clock: fn() -> DateTime<Utc>) -> Self {
        Self { repos, clock }
    }

    /// Validate and save a bean.
    pub async fn add_bean(&self, input: BeanInput) -> Result<Bean, CoreError> {
        let bean = input.validate()?;
        let saved = self.repos.beans.insert(bean).await?;
        info!(bean_id = saved.id, name = %saved.name, "Saved bean");
        Ok(saved)
    }

    /// Validate, stamp and save a shot.
    ///
    /// Nothing reaches the store unless every field validates.
    pub async fn add_shot(&self, input: ShotInput) -> Result<Shot, CoreError> {
        let shot = input.validate((self.clock)())?;
        let saved = self.repos.shots.insert(shot).await?;
        info!(
            shot_id = saved.id,
            bean_id = saved.bean_id,
            brew_ratio = saved.brew_ratio,
            "Saved shot"
        );
        Ok(saved)
    }

    /// All shots, most recent first.
    pub async fn list_shots(&self) -> Result<Vec<Shot>, CoreError> {
        let shots = self.repos.shots.list_recent().await?;
        debug!(count = shots.len(), "Loaded shots");
        Ok(shots)
    }

    /// All beans.
    pub async fn list_beans(&self) -> Result<Vec<Bean>, CoreError> {
        let beans = self.repos.beans.list().await?;
        debug!(count = beans.len(), "Loaded beans");
        Ok(beans)
    }

    /// Look up a single bean.
    pub async fn get_bean(&self, id: i64) -> Result<Option<Bean>, CoreError> {
        Ok(self.repos.beans.get(id).await?)
    }

    /// Shots pulled with one bean, most recent first.
    pub async fn list_shots_for_bean(&self, bean_id: i64) -> Result<Vec<Shot>, CoreError> {
        Ok(self.repos.shots.list_for_bean(bean_id).await?)
    }

    /// Shots rated `min_rating` or better, most recent first.
    pub async fn list_shots_rated_at_least(&self, min_rating: u8) -> Result<Vec<Shot>, CoreError> {
        Ok(self.repos.shots.list_min_rating(min_rating).await?)
    }

    /// Number of stored shots.
    pub async fn shot_count(&self) -> Result<i64, CoreError> {
        Ok(self.repos.shots.count().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewBean, NewShot, ValidationError};
    use crate::ports::bean_repository::MockBeanRepository;
    use crate::ports::shot_repository::MockShotRepository;
    use crate::ports::{BeanRepository, ShotRepository, StorageError};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct MemoryBeans {
        beans: Mutex<Vec<Bean>>,
    }

    #[async_trait]
    impl BeanRepository for MemoryBeans {
        async fn insert(&self, bean: NewBean) -> Result<Bean, StorageError> {
            let mut beans = self.beans.lock().unwrap();
            let saved = Bean {
                id: beans.len() as i64 + 1,
                name: bean.name,
                roaster: bean.roaster,
            };
            beans.push(saved.clone());
            Ok(saved)
        }

        async fn list(&self) -> Result<Vec<Bean>, StorageError> {
            Ok(self.beans.lock().unwrap().clone())
        }

        async fn get(&self, id: i64) -> Result<Option<Bean>, StorageError> {
            Ok(self.beans.lock().unwrap().iter().find(|b| b.id == id).cloned())
        }
    }

    #[derive(Default)]
    struct MemoryShots {
        shots: Mutex<Vec<Shot>>,
    }

    impl MemoryShots {
        fn sorted(&self, keep: impl Fn(&Shot) -> bool) -> Vec<Shot> {
            let mut shots: Vec<Shot> = self
                .shots
                .lock()
                .unwrap()
                .iter()
                .filter(|&s| keep(s))
                .cloned()
                .collect();
            shots.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
            shots
        }
    }

    #[async_trait]
    impl ShotRepository for MemoryShots {
        async fn insert(&self, shot: NewShot) -> Result<Shot, StorageError> {
            let mut shots = self.shots.lock().unwrap();
            let saved = shot.into_shot(shots.len() as i64 + 1);
            shots.push(saved.clone());
            Ok(saved)
        }

        async fn list_recent(&self) -> Result<Vec<Shot>, StorageError> {
            Ok(self.sorted(|_| true))
        }

        async fn list_for_bean(&self, bean_id: i64) -> Result<Vec<Shot>, StorageError> {
            Ok(self.sorted(|s| s.bean_id == bean_id))
        }

        async fn list_min_rating(&self, min_rating: u8) -> Result<Vec<Shot>, StorageError> {
            Ok(self.sorted(|s| s.rating >= min_rating))
        }

        async fn count(&self) -> Result<i64, StorageError> {
            Ok(self.shots.lock().unwrap().len() as i64)
        }
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap()
    }

    fn memory_service() -> RecordService {
        let repos = Repos::new(
            Arc::new(MemoryBeans::default()),
            Arc::new(MemoryShots::default()),
        );
        RecordService::with_clock(repos, fixed_clock)
    }

    fn shot_input(bean_id: &str, dose: &str, yield_out: &str) -> ShotInput {
        ShotInput {
            bean_id: Some(bean_id.to_string()),
            grind_setting_outside: Some("5".to_string()),
            grind_setting_inside: Some("3".to_string()),
            grind_amount: Some("18".to_string()),
            dose_in: Some(dose.to_string()),
            yield_out: Some(yield_out.to_string()),
            extraction_time: Some("28".to_string()),
            rating: Some("5".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_add_bean_returns_generated_id() {
        let service = memory_service();
        let bean = service
            .add_bean(BeanInput::new("Kenya AA", "Square Mile"))
            .await
            .unwrap();
        assert_eq!(bean.id, 1);
        assert_eq!(service.list_beans().await.unwrap(), vec![bean]);
    }

    #[tokio::test]
    async fn test_add_shot_stamps_time_and_ratio() {
        let service = memory_service();
        let shot = service.add_shot(shot_input("1", "18", "36")).await.unwrap();
        assert_eq!(shot.timestamp, fixed_clock());
        assert!((shot.brew_ratio - 2.0).abs() < f64::EPSILON);
        assert_eq!(service.shot_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_add_shot_leaves_count_unchanged() {
        let service = memory_service();
        service.add_shot(shot_input("1", "18", "36")).await.unwrap();

        let mut missing = shot_input("1", "18", "36");
        missing.extraction_time = None;
        let err = service.add_shot(missing).await.unwrap_err();
        assert!(err.is_validation());

        assert_eq!(service.shot_count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_orphaned_bean_reference_is_accepted() {
        let service = memory_service();
        let shot = service.add_shot(shot_input("42", "18", "36")).await.unwrap();
        assert_eq!(shot.bean_id, 42);
        assert_eq!(service.get_bean(42).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_lookups_filter_by_bean_and_rating() {
        let service = memory_service();
        service.add_shot(shot_input("1", "18", "36")).await.unwrap();
        let mut low = shot_input("2", "18", "40");
        low.rating = Some("2".to_string());
        service.add_shot(low).await.unwrap();

        let for_bean = service.list_shots_for_bean(2).await.unwrap();
        assert_eq!(for_bean.len(), 1);
        assert_eq!(for_bean[0].bean_id, 2);

        let good = service.list_shots_rated_at_least(4).await.unwrap();
        assert_eq!(good.len(), 1);
        assert_eq!(good[0].bean_id, 1);
    }

    #[tokio::test]
    async fn test_validation_failure_never_reaches_store() {
        let mut shots = MockShotRepository::new();
        shots.expect_insert().never();
        let repos = Repos::new(Arc::new(MockBeanRepository::new()), Arc::new(shots));
        let service = RecordService::new(repos);

        let err = service
            .add_shot(shot_input("1", "0", "36"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::NotPositive { field: "dose_in" })
        ));
    }

    #[tokio::test]
    async fn test_storage_error_is_surfaced_verbatim() {
        let mut beans = MockBeanRepository::new();
        beans
            .expect_insert()
            .times(1)
            .returning(|_| Err(StorageError::QuotaExceeded("database or disk is full".into())));
        let repos = Repos::new(Arc::new(beans), Arc::new(MockShotRepository::new()));
        let service = RecordService::new(repos);

        let err = service
            .add_bean(BeanInput::new("Kenya AA", "Square Mile"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Storage(StorageError::QuotaExceeded(_))
        ));
    }
}
