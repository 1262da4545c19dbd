//! Shot analytics.
//!
//! Pure aggregation over an already-loaded snapshot of shots. Nothing here
//! performs I/O or mutates its input, so results are identical for
//! identical input.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::Shot;
use crate::utils::round_to;

/// Summary of a set of shots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShotAnalytics {
    pub total_shots: usize,
    /// Mean extraction time in seconds, 1 decimal place.
    pub avg_extraction: f64,
    /// Shots rated 4 or 5, in input order.
    pub high_rated: Vec<Shot>,
    /// Averaged parameters of the high-rated shots. `None` when no shot is
    /// high-rated, which is distinct from an all-zero recipe.
    pub sweet_spot: Option<SweetSpot>,
    /// Per-bean buckets keyed by the raw `bean_id` of each shot.
    pub per_bean: BTreeMap<i64, BeanStats>,
}

/// Target recipe derived from the high-rated shots, each field 1 decimal place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweetSpot {
    pub avg_grind_outside: f64,
    pub avg_grind_inside: f64,
    pub avg_grind_amount: f64,
    pub avg_dose: f64,
    pub avg_time: f64,
}

/// Aggregates for the shots pulled with one bean.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BeanStats {
    pub count: usize,
    pub total_extraction_time: u64,
    /// Rating of every shot in this bucket, in shot order.
    pub ratings: Vec<u8>,
}

impl BeanStats {
    /// Mean extraction time, 1 decimal place.
    #[allow(clippy::cast_precision_loss)]
    pub fn average_extraction(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        round_to(self.total_extraction_time as f64 / self.count as f64, 1)
    }

    /// Mean of the non-zero ratings, 1 decimal place. Unrated shots are ignored.
    pub fn average_rating(&self) -> Option<f64> {
        let rated: Vec<f64> = self
            .ratings
            .iter()
            .filter(|r| **r > 0)
            .map(|r| f64::from(*r))
            .collect();
        mean(&rated).map(|avg| round_to(avg, 1))
    }
}

/// Compute analytics for `shots`. Returns `None` for an empty list.
pub fn compute(shots: &[Shot]) -> Option<ShotAnalytics> {
    if shots.is_empty() {
        return None;
    }

    let times: Vec<f64> = shots.iter().map(|s| f64::from(s.extraction_time)).collect();
    let avg_extraction = round_to(mean(&times)?, 1);

    let high_rated: Vec<Shot> = shots.iter().filter(|s| s.is_high_rated()).cloned().collect();
    let sweet_spot = sweet_spot(&high_rated);

    let mut per_bean: BTreeMap<i64, BeanStats> = BTreeMap::new();
    for shot in shots {
        let stats = per_bean.entry(shot.bean_id).or_default();
        stats.count += 1;
        stats.total_extraction_time += u64::from(shot.extraction_time);
        stats.ratings.push(shot.rating);
    }

    Some(ShotAnalytics {
        total_shots: shots.len(),
        avg_extraction,
        high_rated,
        sweet_spot,
        per_bean,
    })
}

fn sweet_spot(high_rated: &[Shot]) -> Option<SweetSpot> {
    let avg = |field: fn(&Shot) -> f64| -> Option<f64> {
        let values: Vec<f64> = high_rated.iter().map(field).collect();
        mean(&values).map(|v| round_to(v, 1))
    };

    Some(SweetSpot {
        avg_grind_outside: avg(|s| s.grind_setting_outside)?,
        avg_grind_inside: avg(|s| s.grind_setting_inside)?,
        avg_grind_amount: avg(|s| s.grind_amount)?,
        avg_dose: avg(|s| s.dose_in)?,
        avg_time: avg(|s| f64::from(s.extraction_time))?,
    })
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::collections::BTreeSet;

    fn shot(id: i64, bean_id: i64, rating: u8, time: u32) -> Shot {
        Shot {
            id,
            bean_id,
            grind_setting_outside: 5.0,
            grind_setting_inside: 3.0,
            grind_amount: 18.0,
            dose_in: 18.0,
            yield_out: 36.0,
            extraction_time: time,
            brew_ratio: 2.0,
            rating,
            tags: BTreeSet::new(),
            notes: None,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 7, 0, 0).unwrap()
                + chrono::Duration::minutes(id),
        }
    }

    #[test]
    fn test_empty_input_has_no_analytics() {
        assert_eq!(compute(&[]), None);
    }

    #[test]
    fn test_single_low_rated_shot_has_no_sweet_spot() {
        let analytics = compute(&[shot(1, 1, 3, 28)]).unwrap();
        assert_eq!(analytics.total_shots, 1);
        assert!(analytics.high_rated.is_empty());
        assert_eq!(analytics.sweet_spot, None);
    }

    #[test]
    fn test_single_five_star_shot_is_the_sweet_spot() {
        let analytics = compute(&[shot(1, 1, 5, 28)]).unwrap();
        assert_eq!(
            analytics.sweet_spot,
            Some(SweetSpot {
                avg_grind_outside: 5.0,
                avg_grind_inside: 3.0,
                avg_grind_amount: 18.0,
                avg_dose: 18.0,
                avg_time: 28.0,
            })
        );
    }

    #[test]
    fn test_sweet_spot_averages_only_high_rated() {
        let mut a = shot(1, 1, 4, 27);
        a.grind_setting_outside = 4.0;
        a.dose_in = 18.5;
        let mut b = shot(2, 1, 5, 30);
        b.grind_setting_outside = 5.0;
        b.dose_in = 18.0;
        let mut c = shot(3, 1, 1, 45);
        c.grind_setting_outside = 9.0;

        let analytics = compute(&[a, b, c]).unwrap();
        let spot = analytics.sweet_spot.unwrap();
        assert!((spot.avg_grind_outside - 4.5).abs() < f64::EPSILON);
        assert!((spot.avg_dose - 18.3).abs() < f64::EPSILON);
        assert!((spot.avg_time - 28.5).abs() < f64::EPSILON);
        assert_eq!(analytics.high_rated.len(), 2);
    }

    #[test]
    fn test_average_extraction_rounded() {
        let analytics = compute(&[shot(1, 1, 0, 27), shot(2, 1, 0, 28), shot(3, 1, 0, 28)]).unwrap();
        // 83 / 3 = 27.666...
        assert!((analytics.avg_extraction - 27.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_per_bean_buckets_sum_to_total() {
        let shots = vec![
            shot(1, 1, 5, 28),
            shot(2, 2, 3, 31),
            shot(3, 1, 0, 25),
            shot(4, 99, 4, 30),
        ];
        let analytics = compute(&shots).unwrap();

        let summed: usize = analytics.per_bean.values().map(|b| b.count).sum();
        assert_eq!(summed, analytics.total_shots);

        let bean_one = &analytics.per_bean[&1];
        assert_eq!(bean_one.count, 2);
        assert_eq!(bean_one.total_extraction_time, 53);
        assert_eq!(bean_one.ratings, vec![5, 0]);
        assert!(analytics.per_bean.contains_key(&99));
    }

    #[test]
    fn test_bean_stats_averages() {
        let stats = BeanStats {
            count: 3,
            total_extraction_time: 85,
            ratings: vec![5, 0, 4],
        };
        assert!((stats.average_extraction() - 28.3).abs() < f64::EPSILON);
        assert_eq!(stats.average_rating(), Some(4.5));

        let unrated = BeanStats {
            count: 1,
            total_extraction_time: 30,
            ratings: vec![0],
        };
        assert_eq!(unrated.average_rating(), None);
    }

    #[test]
    fn test_compute_is_deterministic_and_leaves_input_untouched() {
        let shots = vec![shot(1, 1, 5, 28), shot(2, 2, 4, 31)];
        let before = shots.clone();
        let first = compute(&shots);
        let second = compute(&shots);
        assert_eq!(first, second);
        assert_eq!(shots, before);
    }
}
