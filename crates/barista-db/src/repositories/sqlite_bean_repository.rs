//! `SQLite` implementation of the `BeanRepository` trait.

use async_trait::async_trait;
use futures_util::FutureExt;
use sqlx::SqliteConnection;

use barista_core::{Bean, BeanRepository, NewBean, StorageError};

use super::row_mappers::row_to_bean;
use crate::error::OperationError;
use crate::store::{Collection, Store, TxMode};

/// `SQLite` implementation of the `BeanRepository` trait.
pub struct SqliteBeanRepository {
    store: Store,
}

impl SqliteBeanRepository {
    /// Create a new `SQLite` bean repository.
    pub fn new(store: Store) -> Self {
        Self { store }
    }
}

async fn insert_bean(conn: &mut SqliteConnection, bean: NewBean) -> Result<Bean, OperationError> {
    let result = sqlx::query("INSERT INTO beans (name, roaster) VALUES (?, ?)")
        .bind(&bean.name)
        .bind(&bean.roaster)
        .execute(&mut *conn)
        .await?;

    Ok(Bean {
        id: result.last_insert_rowid(),
        name: bean.name,
        roaster: bean.roaster,
    })
}

async fn select_beans(conn: &mut SqliteConnection) -> Result<Vec<Bean>, OperationError> {
    let rows = sqlx::query("SELECT id, name, roaster FROM beans ORDER BY id ASC")
        .fetch_all(&mut *conn)
        .await?;
    rows.iter().map(row_to_bean).collect()
}

async fn select_bean(conn: &mut SqliteConnection, id: i64) -> Result<Option<Bean>, OperationError> {
    let row = sqlx::query("SELECT id, name, roaster FROM beans WHERE id = ?")
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    row.as_ref().map(row_to_bean).transpose()
}

#[async_trait]
impl BeanRepository for SqliteBeanRepository {
    async fn insert(&self, bean: NewBean) -> Result<Bean, StorageError> {
        self.store
            .execute(Collection::Beans, TxMode::ReadWrite, move |conn| {
                insert_bean(conn, bean).boxed()
            })
            .await
    }

    async fn list(&self) -> Result<Vec<Bean>, StorageError> {
        self.store
            .execute(Collection::Beans, TxMode::Read, |conn| select_beans(conn).boxed())
            .await
    }

    async fn get(&self, id: i64) -> Result<Option<Bean>, StorageError> {
        self.store
            .execute(Collection::Beans, TxMode::Read, move |conn| {
                select_bean(conn, id).boxed()
            })
            .await
    }
}
