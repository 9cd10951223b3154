//! Simulation constants and default preset factories.

use chrono::NaiveDate;

use crate::spec::SpecPlatformProfile;

/// Default number of simulated days (six months).
pub const N_DAYS_DEFAULT: usize = 180;
/// Default mean daily follower growth.
pub const F_GROWTH_RATE_DEFAULT: f64 = 0.001;
/// Default seed for the threaded random source.
pub const N_SEED_DEFAULT: u64 = 42;

/// Share of engagement volume attributed to likes.
pub const F_WEIGHT_LIKES: f64 = 0.7;
/// Share of engagement volume attributed to comments.
pub const F_WEIGHT_COMMENTS: f64 = 0.2;
/// Share of engagement volume attributed to shares.
pub const F_WEIGHT_SHARES: f64 = 0.1;

/// Growth draw standard deviation is `growth_rate / N_GROWTH_STD_DIVISOR`.
pub const N_GROWTH_STD_DIVISOR: f64 = 3.0;
/// Engagement draw standard deviation is `base / N_ENGAGEMENT_STD_DIVISOR`.
pub const N_ENGAGEMENT_STD_DIVISOR: f64 = 4.0;
/// Recorded engagement rates keep this many decimals.
pub const N_ENGAGEMENT_DECIMALS: u32 = 3;

/// Posts per content type per day are drawn from `0..N_POSTS_PER_TYPE_MAX_EXCLUSIVE`.
pub const N_POSTS_PER_TYPE_MAX_EXCLUSIVE: u32 = 4;
/// `(mean, std)` engagement for motion formats (video, reel).
pub const TUP_ENGAGEMENT_MOTION: (f64, f64) = (0.02, 0.005);
/// `(mean, std)` engagement for still formats (photo, carousel, story).
pub const TUP_ENGAGEMENT_STILL: (f64, f64) = (0.015, 0.003);

/// First simulated calendar day.
pub fn derive_default_date_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default()
}

/// Platform seed states used by the six-month simulation report.
///
/// TikTok starts from zero followers and zero engagement; its series stays flat.
pub fn derive_default_platform_profiles() -> Vec<SpecPlatformProfile> {
    [
        ("Instagram", 15_000, 0.015),
        ("TikTok", 0, 0.0),
        ("Facebook", 12_000, 0.009),
        ("LinkedIn", 8_000, 0.012),
        ("Twitter", 5_000, 0.008),
    ]
    .into_iter()
    .map(
        |(platform, initial_followers, base_engagement_rate)| SpecPlatformProfile {
            platform: platform.to_string(),
            initial_followers,
            base_engagement_rate,
        },
    )
    .collect()
}
