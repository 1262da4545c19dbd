//! Top-level commands.

use std::path::PathBuf;

use clap::Subcommand;

use crate::record_commands::{BeanCommand, ShotCommand};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage coffee beans
    Bean {
        #[command(subcommand)]
        command: BeanCommand,
    },

    /// Record and list shots
    Shot {
        #[command(subcommand)]
        command: ShotCommand,
    },

    /// Show averages, high-rated shots and the sweet spot
    Stats {
        /// Print the analytics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export every shot to a CSV file
    Export {
        /// Directory to write the file into (defaults to the current directory)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Show resolved paths
    Paths,
}
