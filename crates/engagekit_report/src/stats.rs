//! Descriptive statistics used across reports.
//!
//! Every reduction returns `None` on input it cannot describe instead of
//! producing `NaN`.

/// Round half away from zero to `n_decimals` places.
pub fn round_to(x: f64, n_decimals: u32) -> f64 {
    let n_scale = 10f64.powi(n_decimals as i32);
    (x * n_scale).round() / n_scale
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; mean of the two middle values for even lengths.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut l_sorted = values.to_vec();
    l_sorted.sort_by(f64::total_cmp);
    let n_mid = l_sorted.len() / 2;
    if l_sorted.len() % 2 == 0 {
        Some((l_sorted[n_mid - 1] + l_sorted[n_mid]) / 2.0)
    } else {
        Some(l_sorted[n_mid])
    }
}

/// Sample standard deviation (n - 1 denominator); needs two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let f_mean = mean(values)?;
    let f_sum_sq = values.iter().map(|x| (x - f_mean).powi(2)).sum::<f64>();
    Some((f_sum_sq / (values.len() - 1) as f64).sqrt())
}

/// `(final - initial) / initial * 100`; `None` when `initial` is zero.
pub fn derive_growth_pct(initial: f64, final_: f64) -> Option<f64> {
    if initial == 0.0 || !initial.is_finite() || !final_.is_finite() {
        return None;
    }
    Some((final_ - initial) / initial * 100.0)
}

/// `part / whole * 100`; `None` when `whole` is zero.
pub fn derive_share_pct(part: f64, whole: f64) -> Option<f64> {
    if whole == 0.0 || !whole.is_finite() || !part.is_finite() {
        return None;
    }
    Some(part / whole * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_median_handle_empty_and_even() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
        assert_eq!(median(&[6.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        assert_eq!(sample_std(&[5.0]), None);
        let f_std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).expect("std");
        assert!((f_std - 2.138_089_935).abs() < 1e-6);
    }

    #[test]
    fn growth_and_share_guard_zero_denominator() {
        assert_eq!(derive_growth_pct(0.0, 100.0), None);
        assert_eq!(derive_growth_pct(200.0, 250.0), Some(25.0));
        assert_eq!(derive_share_pct(1.0, 0.0), None);
        assert_eq!(derive_share_pct(1.0, 4.0), Some(25.0));
    }

    #[test]
    fn round_to_two_places() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-1.49, 2), -1.49);
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
