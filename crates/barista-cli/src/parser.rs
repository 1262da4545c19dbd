//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for the espresso shot log.
#[derive(Parser)]
#[command(name = "barista")]
#[command(about = "Log espresso shots and find your sweet spot")]
#[command(version)]
pub struct Cli {
    /// Use this database file instead of the default location
    #[arg(long = "db", global = true, env = "BARISTA_DB")]
    pub db: Option<String>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
