//! Shared CLI presentation utilities.
//!
//! Format-only helpers. Domain transforms belong in `barista-core`.

pub mod tables;

pub use tables::{format_optional, format_tags, print_separator, truncate_string};
