//! `SQLite` implementation of the `ShotRepository` trait.

use async_trait::async_trait;
use futures_util::FutureExt;
use sqlx::SqliteConnection;

use barista_core::{NewShot, Shot, ShotRepository, StorageError};

use super::row_mappers::{SHOT_SELECT_COLUMNS, format_timestamp, row_to_shot};
use crate::error::OperationError;
use crate::store::{Collection, Store, TxMode};

const ORDER_RECENT_FIRST: &str = "ORDER BY timestamp DESC, id DESC";

/// `SQLite` implementation of the `ShotRepository` trait.
pub struct SqliteShotRepository {
    store: Store,
}

impl SqliteShotRepository {
    /// Create a new `SQLite` shot repository.
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Filter applied by `select_shots`.
#[derive(Debug, Clone, Copy)]
enum ShotFilter {
    All,
    Bean(i64),
    MinRating(u8),
}

async fn insert_shot(conn: &mut SqliteConnection, shot: NewShot) -> Result<Shot, OperationError> {
    let tags = serde_json::to_string(&shot.tags)
        .map_err(|e| OperationError::Encode(format!("failed to encode tags: {e}")))?;

    let result = sqlx::query(
        "INSERT INTO shots (bean_id, grind_setting_outside, grind_setting_inside, grind_amount,
                            dose_in, yield_out, extraction_time, brew_ratio, rating, tags,
                            notes, timestamp)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(shot.bean_id)
    .bind(shot.grind_setting_outside)
    .bind(shot.grind_setting_inside)
    .bind(shot.grind_amount)
    .bind(shot.dose_in)
    .bind(shot.yield_out)
    .bind(i64::from(shot.extraction_time))
    .bind(shot.brew_ratio)
    .bind(i64::from(shot.rating))
    .bind(&tags)
    .bind(&shot.notes)
    .bind(format_timestamp(&shot.timestamp))
    .execute(&mut *conn)
    .await?;

    Ok(shot.into_shot(result.last_insert_rowid()))
}

async fn select_shots(
    conn: &mut SqliteConnection,
    filter: ShotFilter,
) -> Result<Vec<Shot>, OperationError> {
    let rows = match filter {
        ShotFilter::All => {
            let sql = format!("SELECT {SHOT_SELECT_COLUMNS} FROM shots {ORDER_RECENT_FIRST}");
            sqlx::query(&sql).fetch_all(&mut *conn).await?
        }
        ShotFilter::Bean(bean_id) => {
            let sql = format!(
                "SELECT {SHOT_SELECT_COLUMNS} FROM shots WHERE bean_id = ? {ORDER_RECENT_FIRST}"
            );
            sqlx::query(&sql).bind(bean_id).fetch_all(&mut *conn).await?
        }
        ShotFilter::MinRating(min) => {
            let sql = format!(
                "SELECT {SHOT_SELECT_COLUMNS} FROM shots WHERE rating >= ? {ORDER_RECENT_FIRST}"
            );
            sqlx::query(&sql)
                .bind(i64::from(min))
                .fetch_all(&mut *conn)
                .await?
        }
    };

    rows.iter().map(row_to_shot).collect()
}

async fn count_shots(conn: &mut SqliteConnection) -> Result<i64, OperationError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shots")
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

impl SqliteShotRepository {
    async fn select(&self, filter: ShotFilter) -> Result<Vec<Shot>, StorageError> {
        self.store
            .execute(Collection::Shots, TxMode::Read, move |conn| {
                select_shots(conn, filter).boxed()
            })
            .await
    }
}

#[async_trait]
impl ShotRepository for SqliteShotRepository {
    async fn insert(&self, shot: NewShot) -> Result<Shot, StorageError> {
        self.store
            .execute(Collection::Shots, TxMode::ReadWrite, move |conn| {
                insert_shot(conn, shot).boxed()
            })
            .await
    }

    async fn list_recent(&self) -> Result<Vec<Shot>, StorageError> {
        self.select(ShotFilter::All).await
    }

    async fn list_for_bean(&self, bean_id: i64) -> Result<Vec<Shot>, StorageError> {
        self.select(ShotFilter::Bean(bean_id)).await
    }

    async fn list_min_rating(&self, min_rating: u8) -> Result<Vec<Shot>, StorageError> {
        self.select(ShotFilter::MinRating(min_rating)).await
    }

    async fn count(&self) -> Result<i64, StorageError> {
        self.store
            .execute(Collection::Shots, TxMode::Read, |conn| count_shots(conn).boxed())
            .await
    }
}
