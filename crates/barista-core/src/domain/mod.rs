//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (database, filesystem, etc.).
//!
//! # Structure
//!
//! - `bean` - Bean types (`Bean`, `NewBean`, `BeanInput`)
//! - `shot` - Shot types (`Shot`, `NewShot`, `ShotInput`, `ShotTag`)
//! - `validation` - Errors raised at the input boundary

pub mod bean;
pub mod shot;
pub mod validation;

pub use bean::{Bean, BeanInput, NewBean};
pub use shot::{
    HIGH_RATING_THRESHOLD, MAX_RATING, NewShot, Shot, ShotInput, ShotTag, brew_ratio,
};
pub use validation::ValidationError;
