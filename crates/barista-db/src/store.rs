//! The persistent store.
//!
//! A thin contract over `SQLite`: it owns the connection pool, schema
//! versioning and collection creation, and runs every operation inside a
//! single transaction.

use std::fmt;
use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use barista_core::StorageError;

use crate::error::{OperationError, map_sqlx_error};
use crate::migrations::{MIGRATIONS, Migration, migrate, stored_version};

/// A named record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Shots,
    Beans,
}

impl Collection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Shots => "shots",
            Self::Beans => "beans",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transaction mode for `Store::execute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    /// The transaction is always rolled back, so nothing can be written.
    Read,
    /// The transaction commits when the operation succeeds.
    ReadWrite,
}

/// An open, migrated store.
///
/// Cloning is cheap; clones share the same pool.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the store at `path`, creating the file and any missing
    /// collections and lookups.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use barista_db::Store;
    /// use std::path::Path;
    ///
    /// # async fn example() -> Result<(), barista_core::StorageError> {
    /// let store = Store::open(Path::new("/path/to/barista.db")).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_with_migrations(path, MIGRATIONS).await
    }

    pub(crate) async fn open_with_migrations(
        path: &Path,
        migrations: &[Migration],
    ) -> Result<Self, StorageError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Unavailable(format!("{}: {e}", parent.display()))
            })?;
        }

        let pool = SqlitePoolOptions::new()
            .connect_with(
                SqliteConnectOptions::new()
                    .filename(path)
                    .create_if_missing(true),
            )
            .await
            .map_err(map_sqlx_error)?;

        let store = Self { pool };
        let version = store.run_migrations(migrations).await?;
        info!(path = %path.display(), version, "Opened store");
        Ok(store)
    }

    /// Open a private in-memory store with the full schema.
    ///
    /// The pool holds a single connection that is never recycled, so the
    /// data lives exactly as long as the store.
    #[cfg(any(test, feature = "test-utils"))]
    pub async fn open_in_memory() -> Result<Self, StorageError> {
        use std::str::FromStr;

        let options = SqliteConnectOptions::from_str("sqlite::memory:").map_err(map_sqlx_error)?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let store = Self { pool };
        store.run_migrations(MIGRATIONS).await?;
        Ok(store)
    }

    async fn run_migrations(&self, migrations: &[Migration]) -> Result<i64, StorageError> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        migrate(&mut conn, migrations).await
    }

    /// Run `op` inside a single transaction on `collection`.
    ///
    /// `ReadWrite` commits when `op` succeeds; `Read` always rolls back.
    /// Any failure rolls the whole operation back. Nothing is retried.
    pub async fn execute<T, F>(
        &self,
        collection: Collection,
        mode: TxMode,
        op: F,
    ) -> Result<T, StorageError>
    where
        T: Send,
        F: for<'c> FnOnce(&'c mut SqliteConnection) -> BoxFuture<'c, Result<T, OperationError>>
            + Send,
    {
        debug!(%collection, ?mode, "Begin transaction");
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let result = op(&mut *tx).await;
        match result {
            Ok(value) => {
                match mode {
                    TxMode::ReadWrite => tx.commit().await.map_err(map_sqlx_error)?,
                    TxMode::Read => tx.rollback().await.map_err(map_sqlx_error)?,
                }
                debug!(%collection, ?mode, "Transaction finished");
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(%collection, error = %rollback_err, "Rollback failed");
                }
                let err = StorageError::from(err);
                warn!(%collection, ?mode, error = %err, "Transaction aborted");
                Err(err)
            }
        }
    }

    /// The schema version currently recorded in the store.
    pub async fn schema_version(&self) -> Result<i64, StorageError> {
        let mut conn = self.pool.acquire().await.map_err(map_sqlx_error)?;
        stored_version(&mut conn).await
    }

    /// Close every connection. Later operations fail with
    /// `StorageError::Unavailable`.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Lazily opened, shared store.
///
/// The first call to [`StoreHandle::get`] opens and migrates the store;
/// concurrent first callers wait on that same initialization instead of
/// racing their own. A failed attempt caches nothing, so the next caller
/// starts over.
#[derive(Debug)]
pub struct StoreHandle {
    path: PathBuf,
    cell: OnceCell<Store>,
}

impl StoreHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceCell::new(),
        }
    }

    /// Get the store, opening it on first use.
    pub async fn get(&self) -> Result<&Store, StorageError> {
        self.cell
            .get_or_try_init(|| async {
                debug!(path = %self.path.display(), "Initializing store");
                Store::open(&self.path).await
            })
            .await
    }

    /// Whether the store has been opened.
    pub fn is_initialized(&self) -> bool {
        self.cell.initialized()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
