//! Stateless numeric and calendar helpers.

use chrono::{Days, NaiveDate};

use crate::spec::SimulateError;

/// `2^64`, the first whole value past `u64::MAX`.
const F_U64_END: f64 = 18_446_744_073_709_551_616.0;

/// Round `x` half away from zero to `n_decimals` places.
pub fn round_to_decimals(x: f64, n_decimals: u32) -> f64 {
    let n_scale = 10f64.powi(n_decimals as i32);
    (x * n_scale).round() / n_scale
}

/// Map a day offset onto the calendar.
///
/// Saturates at the start date if the offset overflows chrono's range.
pub fn derive_date(date_start: NaiveDate, day_index: usize) -> NaiveDate {
    date_start
        .checked_add_days(Days::new(day_index as u64))
        .unwrap_or(date_start)
}

/// Truncate a volume to a whole count.
///
/// Non-positive volumes count as zero; non-finite volumes and volumes past
/// `u64::MAX` are rejected.
pub fn derive_count(x: f64, name: &str) -> Result<u64, SimulateError> {
    if !x.is_finite() || x >= F_U64_END {
        return Err(SimulateError::CountOverflow {
            name: name.to_string(),
            value: x,
        });
    }
    if x <= 0.0 { Ok(0) } else { Ok(x.trunc() as u64) }
}

/// Interaction count for one weight: `floor(followers * rate * weight)`.
pub fn derive_interaction_count(
    followers: u64,
    engagement_rate: f64,
    weight: f64,
    name: &str,
) -> Result<u64, SimulateError> {
    derive_count((followers as f64 * engagement_rate * weight).floor(), name)
}

/// Clamp negative draws to zero and round to `n_decimals`.
pub fn derive_clamped_rate(x: f64, n_decimals: u32) -> f64 {
    round_to_decimals(x.max(0.0), n_decimals)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_to_decimals_keeps_requested_precision() {
        assert_eq!(round_to_decimals(0.01234, 3), 0.012);
        assert_eq!(round_to_decimals(0.0125, 2), 0.01);
        assert_eq!(round_to_decimals(12.3456, 2), 12.35);
    }

    #[test]
    fn derive_date_offsets_from_start() {
        let date_start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("date");
        assert_eq!(derive_date(date_start, 0), date_start);
        assert_eq!(
            derive_date(date_start, 31),
            NaiveDate::from_ymd_opt(2025, 2, 1).expect("date")
        );
        assert_eq!(
            derive_date(date_start, 179),
            NaiveDate::from_ymd_opt(2025, 6, 29).expect("date")
        );
    }

    #[test]
    fn derive_interaction_count_floors_and_never_goes_negative() {
        assert_eq!(derive_interaction_count(15_000, 0.015, 0.7, "likes").expect("count"), 157);
        assert_eq!(derive_interaction_count(0, 0.015, 0.7, "likes").expect("count"), 0);
        assert_eq!(derive_interaction_count(10, 0.0, 0.2, "comments").expect("count"), 0);
    }

    #[test]
    fn derive_count_rejects_values_past_u64() {
        assert_eq!(derive_count(-3.0, "likes").expect("count"), 0);
        assert_eq!(derive_count(9_007_199_254_740_992.0, "likes").expect("count"), 1 << 53);
        assert!(matches!(
            derive_count(F_U64_END, "followers"),
            Err(SimulateError::CountOverflow { ref name, .. }) if name == "followers"
        ));
        assert!(derive_count(f64::INFINITY, "likes").is_err());
        assert!(derive_count(f64::NAN, "likes").is_err());
        assert!(derive_interaction_count(u64::MAX, 2.0, 0.7, "likes").is_err());
    }

    #[test]
    fn derive_clamped_rate_clamps_negative_draws() {
        assert_eq!(derive_clamped_rate(-0.004, 3), 0.0);
        assert_eq!(derive_clamped_rate(0.01449, 3), 0.014);
    }
}
