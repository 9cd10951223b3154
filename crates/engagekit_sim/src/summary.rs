//! Pure reductions over a generated series.

use crate::spec::{DailyMetricPoint, SimulateError, SpecPlatformSummary};
use crate::util::round_to_decimals;

/// Mean of the recorded daily engagement rates; `None` for an empty series.
pub fn mean_engagement_rate(points: &[DailyMetricPoint]) -> Option<f64> {
    if points.is_empty() {
        return None;
    }
    Some(points.iter().map(|p| p.engagement_rate).sum::<f64>() / points.len() as f64)
}

/// Sum of likes, comments and shares over all points.
///
/// Fails with [`SimulateError::CountOverflow`] when the total leaves `u64`.
pub fn total_interactions(points: &[DailyMetricPoint]) -> Result<u64, SimulateError> {
    points.iter().try_fold(0u64, |n_total, point| {
        let n_day = point.interactions()?;
        n_total
            .checked_add(n_day)
            .ok_or_else(|| SimulateError::CountOverflow {
                name: "total_interactions".to_string(),
                value: n_total as f64 + n_day as f64,
            })
    })
}

/// Summarize one platform series.
///
/// Growth percentage is measured from the first recorded day to the last.
/// A zero first-day follower count yields `growth_pct = None` instead of a
/// division by zero.
pub fn summarize_series(
    platform: &str,
    points: &[DailyMetricPoint],
) -> Result<SpecPlatformSummary, SimulateError> {
    let (Some(point_first), Some(point_last)) = (points.first(), points.last()) else {
        return Err(SimulateError::EmptySeries(platform.to_string()));
    };
    let f_mean_engagement = mean_engagement_rate(points).unwrap_or(0.0);

    let growth_pct = if point_first.followers == 0 {
        None
    } else {
        let f_delta = point_last.followers as f64 - point_first.followers as f64;
        Some(round_to_decimals(
            f_delta / point_first.followers as f64 * 100.0,
            2,
        ))
    };

    Ok(SpecPlatformSummary {
        platform: platform.to_string(),
        initial_followers: point_first.followers,
        final_followers: point_last.followers,
        growth_pct,
        avg_engagement_pct: round_to_decimals(f_mean_engagement * 100.0, 2),
        total_interactions: total_interactions(points)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::series::generate_series;

    fn make_point(day_index: usize, followers: u64, engagement_rate: f64) -> DailyMetricPoint {
        let f_volume = followers as f64 * engagement_rate;
        DailyMetricPoint {
            day_index,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("date"),
            followers,
            engagement_rate,
            likes: (f_volume * 0.7) as u64,
            comments: (f_volume * 0.2) as u64,
            shares: (f_volume * 0.1) as u64,
        }
    }

    #[test]
    fn summarize_series_reports_growth_and_totals() {
        let l_points = vec![
            make_point(0, 1_000, 0.010),
            make_point(1, 1_050, 0.020),
            make_point(2, 1_100, 0.030),
        ];
        let summary = summarize_series("Instagram", &l_points).expect("summary");
        assert_eq!(summary.initial_followers, 1_000);
        assert_eq!(summary.final_followers, 1_100);
        assert_eq!(summary.growth_pct, Some(10.0));
        assert_eq!(summary.avg_engagement_pct, 2.0);
        assert_eq!(
            summary.total_interactions,
            l_points.iter().map(|p| p.likes + p.comments + p.shares).sum::<u64>()
        );
    }

    #[test]
    fn summarize_series_zero_start_has_no_growth_pct() {
        let l_points = vec![make_point(0, 0, 0.0), make_point(1, 0, 0.0)];
        let summary = summarize_series("TikTok", &l_points).expect("summary");
        assert_eq!(summary.growth_pct, None);
        assert_eq!(summary.avg_engagement_pct, 0.0);
        assert_eq!(summary.total_interactions, 0);
    }

    #[test]
    fn summarize_series_rejects_empty_series() {
        assert!(matches!(
            summarize_series("Facebook", &[]),
            Err(SimulateError::EmptySeries(_))
        ));
        assert_eq!(mean_engagement_rate(&[]), None);
    }

    #[test]
    fn reductions_match_straightforward_recomputation() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let date_start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("date");
        let l_points =
            generate_series(12_000, 0.009, 180, 0.001, date_start, &mut rng).expect("series");

        let mut f_sum_rate = 0.0;
        let mut n_sum_interactions = 0u64;
        for point in &l_points {
            f_sum_rate += point.engagement_rate;
            n_sum_interactions += point.likes;
            n_sum_interactions += point.comments;
            n_sum_interactions += point.shares;
        }

        assert_eq!(
            mean_engagement_rate(&l_points),
            Some(f_sum_rate / l_points.len() as f64)
        );
        assert_eq!(total_interactions(&l_points).expect("total"), n_sum_interactions);
        // Reductions hold no state between calls.
        assert_eq!(
            total_interactions(&l_points).expect("total"),
            total_interactions(&l_points).expect("total")
        );
    }

    #[test]
    fn total_interactions_reports_overflow() {
        let mut point = make_point(0, 1, 0.0);
        point.likes = u64::MAX / 2 + 1;
        let l_points = vec![point.clone(), point];
        assert!(matches!(
            total_interactions(&l_points),
            Err(SimulateError::CountOverflow { ref name, .. }) if name == "total_interactions"
        ));
        assert!(summarize_series("Instagram", &l_points).is_err());
    }
}
