//! Simulation data points, options and error types.

use std::fmt;

use chrono::NaiveDate;
use thiserror::Error;

use crate::conf::{
    F_GROWTH_RATE_DEFAULT, N_DAYS_DEFAULT, N_SEED_DEFAULT, derive_default_date_start,
};

////////////////////////////////////////////////////////////////////////////////
// #region SeriesModels

/// One simulated day for one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyMetricPoint {
    /// Zero-based offset from the simulation start date.
    pub day_index: usize,
    /// Calendar date (`date_start + day_index` days).
    pub date: NaiveDate,
    /// Follower count after this day's growth, truncated.
    pub followers: u64,
    /// Daily engagement rate, clamped at zero and rounded to 3 decimals.
    pub engagement_rate: f64,
    /// `floor(followers * engagement_rate * 0.7)`.
    pub likes: u64,
    /// `floor(followers * engagement_rate * 0.2)`.
    pub comments: u64,
    /// `floor(followers * engagement_rate * 0.1)`.
    pub shares: u64,
}

impl DailyMetricPoint {
    /// Likes + comments + shares.
    pub fn interactions(&self) -> Result<u64, SimulateError> {
        self.likes
            .checked_add(self.comments)
            .and_then(|n| n.checked_add(self.shares))
            .ok_or_else(|| SimulateError::CountOverflow {
                name: "interactions".to_string(),
                value: self.likes as f64 + self.comments as f64 + self.shares as f64,
            })
    }
}

/// State carried from one simulated day to the next.
///
/// Followers are kept unrounded; only the emitted point is truncated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecSeriesState {
    /// Running follower count.
    pub followers: f64,
}

impl SpecSeriesState {
    /// Seed state for a platform.
    pub fn new(initial_followers: u64) -> Self {
        Self {
            followers: initial_followers as f64,
        }
    }
}

/// Seed configuration for one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPlatformProfile {
    /// Platform display name (also used as sheet name).
    pub platform: String,
    /// Follower count before day 0.
    pub initial_followers: u64,
    /// Mean daily engagement rate.
    pub base_engagement_rate: f64,
}

/// Generated series for one platform.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPlatformSeries {
    /// Seed configuration the series was generated from.
    pub profile: SpecPlatformProfile,
    /// Day-ordered points, length `num_days`.
    pub points: Vec<DailyMetricPoint>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ContentModels

/// Content format labels, in the order they are sampled each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnumContentType {
    /// Single image post.
    Photo,
    /// Feed video.
    Video,
    /// Multi-image post.
    Carousel,
    /// Short-form vertical video.
    Reel,
    /// Ephemeral story.
    Story,
}

impl EnumContentType {
    /// All content types in sampling order.
    pub const ALL: [EnumContentType; 5] = [
        EnumContentType::Photo,
        EnumContentType::Video,
        EnumContentType::Carousel,
        EnumContentType::Reel,
        EnumContentType::Story,
    ];

    /// Display label.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnumContentType::Photo => "Photo",
            EnumContentType::Video => "Video",
            EnumContentType::Carousel => "Carousel",
            EnumContentType::Reel => "Reel",
            EnumContentType::Story => "Story",
        }
    }

    /// Motion formats draw from the higher engagement distribution.
    pub fn is_motion(&self) -> bool {
        matches!(self, EnumContentType::Video | EnumContentType::Reel)
    }
}

impl fmt::Display for EnumContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One content type's activity on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentTypeDay {
    /// Content format.
    pub content_type: EnumContentType,
    /// Number of posts published.
    pub posts: u32,
    /// Engagement rate, clamped at zero and rounded to 3 decimals.
    pub engagement_rate: f64,
}

/// Content mix for one simulated day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyContentPoint {
    /// Zero-based day offset.
    pub day_index: usize,
    /// Calendar date.
    pub date: NaiveDate,
    /// One entry per [`EnumContentType::ALL`] item, same order.
    pub entries: Vec<ContentTypeDay>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region RunModels

/// Options for a multi-platform simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSimulationOptions {
    /// Date of day 0.
    pub date_start: NaiveDate,
    /// Number of simulated days; must be >= 1.
    pub num_days: usize,
    /// Mean daily follower growth; must be finite and >= 0.
    pub growth_rate: f64,
    /// Seed for the single random source threaded through the run.
    pub seed: u64,
}

impl Default for SpecSimulationOptions {
    fn default() -> Self {
        Self {
            date_start: derive_default_date_start(),
            num_days: N_DAYS_DEFAULT,
            growth_rate: F_GROWTH_RATE_DEFAULT,
            seed: N_SEED_DEFAULT,
        }
    }
}

/// Output of [`crate::simulate::simulate_platforms`].
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSimulationRun {
    /// Options the run was produced with.
    pub options: SpecSimulationOptions,
    /// One series per profile, profile order.
    pub platforms: Vec<SpecPlatformSeries>,
    /// Daily content mix.
    pub content: Vec<DailyContentPoint>,
    /// One summary per platform, profile order.
    pub summaries: Vec<SpecPlatformSummary>,
}

/// Descriptive summary of one platform series.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPlatformSummary {
    /// Platform display name.
    pub platform: String,
    /// Followers recorded on day 0.
    pub initial_followers: u64,
    /// Followers recorded on the last day.
    pub final_followers: u64,
    /// Percent growth first-to-last day, rounded to 2 decimals.
    ///
    /// `None` when the first recorded value is zero.
    pub growth_pct: Option<f64>,
    /// Mean engagement rate in percent, rounded to 2 decimals.
    pub avg_engagement_pct: f64,
    /// Sum of likes, comments and shares over all days.
    pub total_interactions: u64,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Simulation input/generation failures.
#[derive(Debug, Error)]
pub enum SimulateError {
    /// `num_days` was zero.
    #[error("Arg `num_days` must be >= 1, got {0}.")]
    InvalidDayCount(usize),
    /// Base engagement rate was outside `[0, 1]` or not a number.
    #[error("Arg `base_engagement_rate` must be a ratio within [0, 1], got {0}.")]
    InvalidEngagementRate(f64),
    /// Growth rate was negative, NaN or infinite.
    #[error("Arg `growth_rate` must be finite and >= 0, got {0}.")]
    InvalidGrowthRate(f64),
    /// A normal distribution could not be built from the parameters.
    #[error("Invalid {name} distribution: {message}")]
    Distribution {
        /// Distribution role (`growth`, `engagement`, ...).
        name: String,
        /// Underlying error text.
        message: String,
    },
    /// A count or sum of counts does not fit in `u64`.
    #[error("Count `{name}` overflows u64 (value {value:e}).")]
    CountOverflow {
        /// Quantity being counted (`followers`, `likes`, ...).
        name: String,
        /// Value that did not fit.
        value: f64,
    },
    /// A summary was requested over zero points.
    #[error("Cannot summarize an empty series for platform {0:?}.")]
    EmptySeries(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
