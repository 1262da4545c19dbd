//! CLI bootstrap - the composition root.
//!
//! The only place where the store, repositories and record service are
//! wired together. The store itself is opened lazily on first use, so
//! commands that never touch records (`paths`) never create the file.

use std::path::PathBuf;

use barista_core::{RecordService, data_root, database_path, normalize_user_path};
use barista_db::{RepoFactory, StoreHandle};

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory holding barista's data. `None` when `--db` points elsewhere,
    /// in which case the default data directory is never created.
    pub data_root: Option<PathBuf>,
    /// Database file to open.
    pub database_path: PathBuf,
}

impl CliConfig {
    /// Resolve paths, honouring an explicit `--db` override.
    pub fn with_defaults(db_override: Option<&str>) -> Result<Self, CliError> {
        if let Some(raw) = db_override {
            return Ok(Self {
                data_root: None,
                database_path: normalize_user_path(raw)?,
            });
        }

        Ok(Self {
            data_root: Some(data_root()?),
            database_path: database_path()?,
        })
    }
}

/// Composed application context for CLI commands.
pub struct CliContext {
    pub config: CliConfig,
    store: StoreHandle,
}

impl CliContext {
    /// Record service over the (lazily opened) store.
    pub async fn records(&self) -> Result<RecordService, CliError> {
        let store = self.store.get().await?;
        Ok(RepoFactory::record_service(store))
    }

    /// Whether the store has been opened by this context.
    pub fn store_opened(&self) -> bool {
        self.store.is_initialized()
    }
}

/// Bootstrap the CLI application.
pub fn bootstrap(config: CliConfig) -> CliContext {
    let store = StoreHandle::new(config.database_path.clone());
    CliContext { config, store }
}
