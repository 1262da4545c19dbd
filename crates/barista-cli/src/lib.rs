//! Command-line adapter for barista.
//!
//! The binary in `main.rs` parses arguments, bootstraps a [`CliContext`] and
//! dispatches to [`handlers`]. Everything else lives in `barista-core` and
//! `barista-db`.
#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use dotenvy as _;
use tokio as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod record_commands;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
pub use record_commands::{BeanCommand, ShotCommand};
