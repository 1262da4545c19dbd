//! Row mapping helpers for `SQLite` queries.

use std::collections::BTreeSet;

use barista_core::{Bean, Shot, ShotTag};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::error::OperationError;

/// Shared SELECT column list for shot queries.
pub const SHOT_SELECT_COLUMNS: &str = "id, bean_id, grind_setting_outside, grind_setting_inside, grind_amount, dose_in, yield_out, extraction_time, brew_ratio, rating, tags, notes, timestamp";

/// Format a timestamp the way it is stored: RFC 3339, UTC, milliseconds.
///
/// The fixed width keeps lexical order equal to chronological order.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, OperationError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| OperationError::Decode(format!("invalid timestamp {raw:?}: {e}")))
}

/// Parse a database row into a Bean.
pub fn row_to_bean(row: &SqliteRow) -> Result<Bean, OperationError> {
    Ok(Bean {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        roaster: row.try_get("roaster")?,
    })
}

/// Parse a database row into a Shot.
pub fn row_to_shot(row: &SqliteRow) -> Result<Shot, OperationError> {
    let id: i64 = row.try_get("id")?;

    let extraction_time: i64 = row.try_get("extraction_time")?;
    let extraction_time = u32::try_from(extraction_time).map_err(|_| {
        OperationError::Decode(format!("shot {id}: extraction time {extraction_time} out of range"))
    })?;

    let rating: i64 = row.try_get("rating")?;
    let rating = u8::try_from(rating)
        .map_err(|_| OperationError::Decode(format!("shot {id}: rating {rating} out of range")))?;

    let tags_json: String = row.try_get("tags")?;
    let tags: BTreeSet<ShotTag> = serde_json::from_str(&tags_json)
        .map_err(|e| OperationError::Decode(format!("shot {id}: invalid tags {tags_json:?}: {e}")))?;

    let timestamp: String = row.try_get("timestamp")?;

    Ok(Shot {
        id,
        bean_id: row.try_get("bean_id")?,
        grind_setting_outside: row.try_get("grind_setting_outside")?,
        grind_setting_inside: row.try_get("grind_setting_inside")?,
        grind_amount: row.try_get("grind_amount")?,
        dose_in: row.try_get("dose_in")?,
        yield_out: row.try_get("yield_out")?,
        extraction_time,
        brew_ratio: row.try_get("brew_ratio")?,
        rating,
        tags,
        notes: row.try_get("notes")?,
        timestamp: parse_timestamp(&timestamp)?,
    })
}
