//! Input validation errors.
//!
//! Validation always happens before a write reaches the store, so a
//! `ValidationError` guarantees that nothing was persisted.

use thiserror::Error;

use super::shot::ShotTag;

/// Errors raised while turning loosely-typed input into domain records.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Field '{field}' is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Field '{field}' must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("Extraction time must be a whole number of seconds: {0}")]
    NotWholeSeconds(String),

    #[error("Rating must be between 0 and 5, got {0}")]
    RatingOutOfRange(i64),

    #[error("Unknown tag: {0:?}")]
    UnknownTag(String),

    #[error("Duplicate tag: {0}")]
    DuplicateTag(ShotTag),

    #[error("Brew ratio is not a finite number")]
    NonFiniteRatio,
}
