//! Daily content-mix generator.

use chrono::NaiveDate;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::conf::{
    N_ENGAGEMENT_DECIMALS, N_POSTS_PER_TYPE_MAX_EXCLUSIVE, TUP_ENGAGEMENT_MOTION,
    TUP_ENGAGEMENT_STILL,
};
use crate::spec::{ContentTypeDay, DailyContentPoint, EnumContentType, SimulateError};
use crate::util::{derive_clamped_rate, derive_date};

/// Generate `num_days` of per-format posting counts and engagement rates.
///
/// Each day samples every [`EnumContentType::ALL`] item in order: post count
/// first, then engagement.
pub fn generate_content_mix<R: Rng + ?Sized>(
    num_days: usize,
    date_start: NaiveDate,
    rng: &mut R,
) -> Result<Vec<DailyContentPoint>, SimulateError> {
    if num_days == 0 {
        return Err(SimulateError::InvalidDayCount(num_days));
    }

    let dist_motion = build_normal("motion engagement", TUP_ENGAGEMENT_MOTION)?;
    let dist_still = build_normal("still engagement", TUP_ENGAGEMENT_STILL)?;

    let mut l_days = Vec::with_capacity(num_days);
    for n_day in 0..num_days {
        let entries = EnumContentType::ALL
            .iter()
            .map(|content_type| {
                let posts = rng.gen_range(0..N_POSTS_PER_TYPE_MAX_EXCLUSIVE);
                let dist = if content_type.is_motion() {
                    &dist_motion
                } else {
                    &dist_still
                };
                ContentTypeDay {
                    content_type: *content_type,
                    posts,
                    engagement_rate: derive_clamped_rate(dist.sample(rng), N_ENGAGEMENT_DECIMALS),
                }
            })
            .collect();

        l_days.push(DailyContentPoint {
            day_index: n_day,
            date: derive_date(date_start, n_day),
            entries,
        });
    }
    Ok(l_days)
}

fn build_normal(name: &str, (mean, std): (f64, f64)) -> Result<Normal<f64>, SimulateError> {
    Normal::new(mean, std).map_err(|err| SimulateError::Distribution {
        name: name.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn date_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).expect("date")
    }

    #[test]
    fn generate_content_mix_covers_every_type_every_day() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let l_days = generate_content_mix(10, date_start(), &mut rng).expect("content");
        assert_eq!(l_days.len(), 10);
        for day in &l_days {
            let l_types: Vec<EnumContentType> =
                day.entries.iter().map(|e| e.content_type).collect();
            assert_eq!(l_types, EnumContentType::ALL.to_vec());
            for entry in &day.entries {
                assert!(entry.posts < 4);
                assert!(entry.engagement_rate >= 0.0);
                assert_eq!(
                    entry.engagement_rate,
                    (entry.engagement_rate * 1000.0).round() / 1000.0
                );
            }
        }
    }

    #[test]
    fn generate_content_mix_is_deterministic() {
        let mut rng_a = ChaCha8Rng::seed_from_u64(9);
        let mut rng_b = ChaCha8Rng::seed_from_u64(9);
        assert_eq!(
            generate_content_mix(30, date_start(), &mut rng_a).expect("a"),
            generate_content_mix(30, date_start(), &mut rng_b).expect("b")
        );
    }

    #[test]
    fn generate_content_mix_favours_motion_formats() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let l_days = generate_content_mix(365, date_start(), &mut rng).expect("content");
        let mean_of = |content_type: EnumContentType| {
            let l_rates: Vec<f64> = l_days
                .iter()
                .flat_map(|d| d.entries.iter())
                .filter(|e| e.content_type == content_type)
                .map(|e| e.engagement_rate)
                .collect();
            l_rates.iter().sum::<f64>() / l_rates.len() as f64
        };
        assert!(mean_of(EnumContentType::Reel) > mean_of(EnumContentType::Photo));
        assert!(mean_of(EnumContentType::Video) > mean_of(EnumContentType::Story));
    }

    #[test]
    fn generate_content_mix_rejects_zero_days() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(matches!(
            generate_content_mix(0, date_start(), &mut rng),
            Err(SimulateError::InvalidDayCount(0))
        ));
    }
}
