//! Paths command handler.
//!
//! Prints resolved locations in `key = value` form for diagnostics.

use anyhow::Result;

use barista_core::DATA_DIR_ENV;
use barista_db::CURRENT_SCHEMA_VERSION;

use crate::bootstrap::CliContext;

/// Execute the paths command. Does not open the store.
pub fn execute(ctx: &CliContext) -> Result<()> {
    match &ctx.config.data_root {
        Some(root) => println!("data_root = {}", root.display()),
        None => println!("data_root = (unused, --db given)"),
    }
    println!("database = {}", ctx.config.database_path.display());
    println!("database_exists = {}", ctx.config.database_path.exists());
    println!("schema_version = {CURRENT_SCHEMA_VERSION}");
    println!(
        "{DATA_DIR_ENV} = {}",
        std::env::var(DATA_DIR_ENV).unwrap_or_else(|_| "(unset)".to_string())
    );
    Ok(())
}
