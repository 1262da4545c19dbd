//! Shot domain types.
//!
//! A shot is one logged espresso extraction. Shots arrive as loosely-typed
//! form values (`ShotInput`), are validated into a `NewShot`, and come back
//! from the store as a `Shot` with its assigned id.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::validation::ValidationError;
use crate::utils::round_to;

/// Highest rating a shot can receive. A rating of 0 means "unrated".
pub const MAX_RATING: u8 = 5;

/// Ratings at or above this value count as high-rated.
pub const HIGH_RATING_THRESHOLD: u8 = 4;

// ─────────────────────────────────────────────────────────────────────────────
// Tags
// ─────────────────────────────────────────────────────────────────────────────

/// Tasting/diagnostic tag attached to a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ShotTag {
    #[serde(rename = "perfect")]
    Perfect,
    #[serde(rename = "too sour")]
    TooSour,
    #[serde(rename = "too bitter")]
    TooBitter,
    #[serde(rename = "channeling")]
    Channeling,
    #[serde(rename = "fast")]
    Fast,
    #[serde(rename = "slow")]
    Slow,
}

impl ShotTag {
    /// The full tag vocabulary, in display order.
    pub const ALL: [Self; 6] = [
        Self::Perfect,
        Self::TooSour,
        Self::TooBitter,
        Self::Channeling,
        Self::Fast,
        Self::Slow,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::TooSour => "too sour",
            Self::TooBitter => "too bitter",
            Self::Channeling => "channeling",
            Self::Fast => "fast",
            Self::Slow => "slow",
        }
    }
}

impl fmt::Display for ShotTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotTag {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownTag(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shot Types
// ─────────────────────────────────────────────────────────────────────────────

/// A persisted shot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shot {
    /// Store-assigned identifier.
    pub id: i64,
    /// Bean this shot was pulled with. Not enforced by the store; the bean
    /// may not exist.
    pub bean_id: i64,
    pub grind_setting_outside: f64,
    pub grind_setting_inside: f64,
    pub grind_amount: f64,
    /// Dose in grams.
    pub dose_in: f64,
    /// Yield in grams.
    pub yield_out: f64,
    /// Extraction time in whole seconds.
    pub extraction_time: u32,
    /// `yield_out / dose_in`, rounded to 2 places when the shot was written.
    pub brew_ratio: f64,
    /// 0 (unrated) to 5.
    pub rating: u8,
    pub tags: BTreeSet<ShotTag>,
    pub notes: Option<String>,
    /// When the shot was recorded.
    pub timestamp: DateTime<Utc>,
}

impl Shot {
    /// Whether the shot counts towards the sweet spot.
    pub const fn is_high_rated(&self) -> bool {
        self.rating >= HIGH_RATING_THRESHOLD
    }
}

/// Validated data for inserting a new shot.
///
/// `brew_ratio` is computed once here and never recomputed from the stored
/// dose and yield.
#[derive(Debug, Clone, PartialEq)]
pub struct NewShot {
    pub bean_id: i64,
    pub grind_setting_outside: f64,
    pub grind_setting_inside: f64,
    pub grind_amount: f64,
    pub dose_in: f64,
    pub yield_out: f64,
    pub extraction_time: u32,
    pub brew_ratio: f64,
    pub rating: u8,
    pub tags: BTreeSet<ShotTag>,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl NewShot {
    /// Attach the store-assigned id.
    pub fn into_shot(self, id: i64) -> Shot {
        Shot {
            id,
            bean_id: self.bean_id,
            grind_setting_outside: self.grind_setting_outside,
            grind_setting_inside: self.grind_setting_inside,
            grind_amount: self.grind_amount,
            dose_in: self.dose_in,
            yield_out: self.yield_out,
            extraction_time: self.extraction_time,
            brew_ratio: self.brew_ratio,
            rating: self.rating,
            tags: self.tags,
            notes: self.notes,
            timestamp: self.timestamp,
        }
    }
}

/// Compute the stored brew ratio for a dose/yield pair.
pub fn brew_ratio(dose_in: f64, yield_out: f64) -> Result<f64, ValidationError> {
    let ratio = round_to(yield_out / dose_in, 2);
    if ratio.is_finite() {
        Ok(ratio)
    } else {
        Err(ValidationError::NonFiniteRatio)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Boundary
// ─────────────────────────────────────────────────────────────────────────────

/// Raw shot form values as submitted by a caller.
///
/// Every numeric field is kept as text so that blank and malformed values
/// can be reported instead of silently coerced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShotInput {
    pub bean_id: Option<String>,
    pub grind_setting_outside: Option<String>,
    pub grind_setting_inside: Option<String>,
    pub grind_amount: Option<String>,
    pub dose_in: Option<String>,
    pub yield_out: Option<String>,
    pub extraction_time: Option<String>,
    pub rating: Option<String>,
    pub tags: Vec<String>,
    pub notes: Option<String>,
}

impl ShotInput {
    /// Validate and coerce into a `NewShot` stamped with `recorded_at`.
    ///
    /// All missing required fields are reported together; after that the
    /// first malformed value wins. The timestamp is truncated to whole
    /// milliseconds, the precision the store keeps.
    pub fn validate(&self, recorded_at: DateTime<Utc>) -> Result<NewShot, ValidationError> {
        let required: [(&'static str, &Option<String>); 7] = [
            ("grind_setting_outside", &self.grind_setting_outside),
            ("grind_setting_inside", &self.grind_setting_inside),
            ("grind_amount", &self.grind_amount),
            ("dose_in", &self.dose_in),
            ("yield_out", &self.yield_out),
            ("extraction_time", &self.extraction_time),
            ("bean_id", &self.bean_id),
        ];
        let missing: Vec<&'static str> = required
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let bean_id = parse_id("bean_id", self.bean_id.as_deref())?;
        let grind_setting_outside =
            parse_number("grind_setting_outside", self.grind_setting_outside.as_deref())?;
        let grind_setting_inside =
            parse_number("grind_setting_inside", self.grind_setting_inside.as_deref())?;
        let grind_amount = parse_number("grind_amount", self.grind_amount.as_deref())?;
        let dose_in = parse_positive("dose_in", self.dose_in.as_deref())?;
        let yield_out = parse_positive("yield_out", self.yield_out.as_deref())?;
        let extraction_time = parse_seconds(self.extraction_time.as_deref())?;
        let rating = parse_rating(self.rating.as_deref())?;
        let tags = parse_tags(&self.tags)?;
        let brew_ratio = brew_ratio(dose_in, yield_out)?;

        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(ToString::to_string);

        Ok(NewShot {
            bean_id,
            grind_setting_outside,
            grind_setting_inside,
            grind_amount,
            dose_in,
            yield_out,
            extraction_time,
            brew_ratio,
            rating,
            tags,
            notes,
            timestamp: recorded_at.trunc_subsecs(3),
        })
    }
}

fn parse_number(field: &'static str, raw: Option<&str>) -> Result<f64, ValidationError> {
    let raw = raw.unwrap_or_default().trim();
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_positive(field: &'static str, raw: Option<&str>) -> Result<f64, ValidationError> {
    let value = parse_number(field, raw)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::NotPositive { field })
    }
}

fn parse_id(field: &'static str, raw: Option<&str>) -> Result<i64, ValidationError> {
    let raw = raw.unwrap_or_default().trim();
    raw.parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_seconds(raw: Option<&str>) -> Result<u32, ValidationError> {
    let value = parse_positive("extraction_time", raw)?;
    if value.fract() != 0.0 {
        return Err(ValidationError::NotWholeSeconds(
            raw.unwrap_or_default().trim().to_string(),
        ));
    }
    if value > f64::from(u32::MAX) {
        return Err(ValidationError::InvalidNumber {
            field: "extraction_time",
            value: raw.unwrap_or_default().trim().to_string(),
        });
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let seconds = value as u32;
    Ok(seconds)
}

/// Absent or blank means unrated (0).
fn parse_rating(raw: Option<&str>) -> Result<u8, ValidationError> {
    let raw = raw.unwrap_or_default().trim();
    if raw.is_empty() {
        return Ok(0);
    }
    let rating = raw
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field: "rating",
            value: raw.to_string(),
        })?;
    u8::try_from(rating)
        .ok()
        .filter(|r| *r <= MAX_RATING)
        .ok_or(ValidationError::RatingOutOfRange(rating))
}

fn parse_tags(raw: &[String]) -> Result<BTreeSet<ShotTag>, ValidationError> {
    let mut tags = BTreeSet::new();
    for value in raw {
        let tag: ShotTag = value.parse()?;
        if !tags.insert(tag) {
            return Err(ValidationError::DuplicateTag(tag));
        }
    }
    Ok(tags)
}
