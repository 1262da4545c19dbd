//! Export command handler.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use tracing::info;

use barista_core::{export_filename, to_csv};

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Write every shot to `<out>/barista-shots-<date>.csv`.
pub async fn execute(ctx: &CliContext, out: Option<PathBuf>) -> Result<()> {
    let records = ctx.records().await?;
    let shots = records.list_shots().await.map_err(CliError::from)?;
    let beans = records.list_beans().await.map_err(CliError::from)?;

    let dir = out.unwrap_or_else(|| PathBuf::from("."));
    let csv = to_csv(&shots, &beans).map_err(CliError::from)?;
    let path = write_export(&dir, &csv)?;

    info!(path = %path.display(), shots = shots.len(), "Exported shots");
    println!("Exported {} shot(s) to {}", shots.len(), path.display());
    Ok(())
}

fn write_export(dir: &Path, csv: &str) -> Result<PathBuf, CliError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_filename(Local::now().date_naive()));
    std::fs::write(&path, csv)?;
    Ok(path)
}
