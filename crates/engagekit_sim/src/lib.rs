//! `engagekit_sim` v1:
//! Synthetic social-media engagement simulation.
//!
//! Module layout:
//! - `conf`     : constants and default platform presets
//! - `spec`     : data points, options, errors
//! - `util`     : pure numeric/date helpers
//! - `series`   : per-platform follower/engagement random walk
//! - `content`  : per-day content-mix generator
//! - `summary`  : pure reductions over a generated series
//! - `simulate` : multi-platform run with one threaded random source
pub mod conf;
pub mod content;
pub mod series;
pub mod simulate;
pub mod spec;
pub mod summary;
pub mod util;

pub use conf::{
    F_GROWTH_RATE_DEFAULT, F_WEIGHT_COMMENTS, F_WEIGHT_LIKES, F_WEIGHT_SHARES, N_DAYS_DEFAULT,
    N_SEED_DEFAULT, derive_default_date_start, derive_default_platform_profiles,
};
pub use content::generate_content_mix;
pub use series::{SpecEngagementModel, generate_series};
pub use simulate::simulate_platforms;
pub use spec::{
    ContentTypeDay, DailyContentPoint, DailyMetricPoint, EnumContentType, SimulateError,
    SpecPlatformProfile, SpecPlatformSeries, SpecPlatformSummary, SpecSeriesState,
    SpecSimulationOptions, SpecSimulationRun,
};
pub use summary::{mean_engagement_rate, summarize_series, total_interactions};
