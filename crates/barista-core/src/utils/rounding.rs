//! Decimal rounding for stored and reported figures.

/// Round `value` to `decimals` places, half away from zero.
///
/// ```rust
/// use barista_core::utils::round_to;
///
/// assert_eq!(round_to(2.345_67, 2), 2.35);
/// assert_eq!(round_to(27.25, 1), 27.3);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
