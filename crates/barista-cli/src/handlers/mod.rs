//! Command handlers.
//!
//! Handlers follow one pattern: `pub async fn execute(ctx: &CliContext, ...)
//! -> Result<()>`. They turn CLI arguments into request values, call the
//! record service or the pure analytics/export functions, and format the
//! result for the terminal. They never touch the store directly.

pub mod bean;
pub mod export;
pub mod paths;
pub mod shot;
pub mod stats;
