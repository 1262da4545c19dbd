//! Schema migrations.
//!
//! The schema version lives in `PRAGMA user_version`. Each migration is keyed
//! by the version it produces and is applied at most once, in ascending
//! order, inside its own transaction. Every statement is additive and uses
//! `IF NOT EXISTS`, so existing records are never dropped and a half-applied
//! upgrade can be re-run.

use sqlx::{Connection, SqliteConnection};
use tracing::{debug, info};

use barista_core::StorageError;

use crate::error::map_sqlx_error;

/// One step of the schema history.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    /// Schema version after this step has been applied.
    pub version: i64,
    pub description: &'static str,
    pub statements: &'static [&'static str],
}

/// The full schema history, oldest first.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "create beans and shots collections",
        statements: &[
            r#"
            CREATE TABLE IF NOT EXISTS beans (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                roaster TEXT NOT NULL
            )
            "#,
            // bean_id is not a foreign key. Shots may reference a bean that
            // no longer exists and are resolved on read.
            r#"
            CREATE TABLE IF NOT EXISTS shots (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                bean_id INTEGER NOT NULL,
                grind_setting_outside REAL NOT NULL,
                grind_setting_inside REAL NOT NULL,
                grind_amount REAL NOT NULL,
                dose_in REAL NOT NULL,
                yield_out REAL NOT NULL,
                extraction_time INTEGER NOT NULL,
                brew_ratio REAL NOT NULL,
                rating INTEGER NOT NULL DEFAULT 0 CHECK (rating BETWEEN 0 AND 5),
                tags TEXT NOT NULL DEFAULT '[]',
                notes TEXT,
                timestamp TEXT NOT NULL
            )
            "#,
        ],
    },
    Migration {
        version: 2,
        description: "add shot lookups by timestamp, bean and rating",
        statements: &[
            "CREATE INDEX IF NOT EXISTS idx_shots_timestamp ON shots(timestamp)",
            "CREATE INDEX IF NOT EXISTS idx_shots_bean_id ON shots(bean_id)",
            "CREATE INDEX IF NOT EXISTS idx_shots_rating ON shots(rating)",
        ],
    },
];

/// Newest schema version this build understands.
pub const CURRENT_SCHEMA_VERSION: i64 = 2;

/// Read the stored schema version.
pub async fn stored_version(conn: &mut SqliteConnection) -> Result<i64, StorageError> {
    sqlx::query_scalar::<_, i64>("PRAGMA user_version")
        .fetch_one(&mut *conn)
        .await
        .map_err(map_sqlx_error)
}

/// Bring the schema up to the last entry of `migrations`.
///
/// Returns the resulting schema version. Fails with
/// `StorageError::SchemaMismatch` when the stored version is newer than
/// anything in `migrations`.
pub async fn migrate(
    conn: &mut SqliteConnection,
    migrations: &[Migration],
) -> Result<i64, StorageError> {
    let stored = stored_version(conn).await?;
    let supported = migrations.last().map_or(0, |m| m.version);

    if stored > supported {
        return Err(StorageError::SchemaMismatch { stored, supported });
    }

    let pending: Vec<&Migration> = migrations.iter().filter(|m| m.version > stored).collect();
    if pending.is_empty() {
        debug!(version = stored, "Schema up to date");
        return Ok(stored);
    }

    for migration in pending {
        let mut tx = conn.begin().await.map_err(map_sqlx_error)?;
        for statement in migration.statements {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;
        }
        // PRAGMA does not accept bound parameters.
        sqlx::query(&format!("PRAGMA user_version = {}", migration.version))
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        tx.commit().await.map_err(map_sqlx_error)?;

        info!(
            version = migration.version,
            description = migration.description,
            "Applied schema migration"
        );
    }

    Ok(supported)
}
