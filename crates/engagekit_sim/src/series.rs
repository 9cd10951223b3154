//! Per-platform follower/engagement random walk.
//!
//! The recurrence is an explicit fold: [`SpecEngagementModel::step`] takes the
//! previous [`SpecSeriesState`] and returns the next state together with the
//! emitted [`DailyMetricPoint`]. [`generate_series`] threads the state across
//! `num_days` steps and never rolls it back.

use chrono::NaiveDate;
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::debug;

use crate::conf::{
    F_WEIGHT_COMMENTS, F_WEIGHT_LIKES, F_WEIGHT_SHARES, N_ENGAGEMENT_DECIMALS,
    N_ENGAGEMENT_STD_DIVISOR, N_GROWTH_STD_DIVISOR,
};
use crate::spec::{DailyMetricPoint, SimulateError, SpecSeriesState};
use crate::util::{derive_clamped_rate, derive_count, derive_date, derive_interaction_count};

/// Validated growth/engagement parameters with their sampling distributions.
#[derive(Debug, Clone, Copy)]
pub struct SpecEngagementModel {
    base_engagement_rate: f64,
    growth_rate: f64,
    date_start: NaiveDate,
    dist_growth: Normal<f64>,
    dist_engagement: Normal<f64>,
}

impl SpecEngagementModel {
    /// Build a model.
    ///
    /// The engagement rate is a ratio and must lie in `[0, 1]`; the growth rate
    /// must be finite and non-negative.
    pub fn new(
        base_engagement_rate: f64,
        growth_rate: f64,
        date_start: NaiveDate,
    ) -> Result<Self, SimulateError> {
        if !(0.0..=1.0).contains(&base_engagement_rate) {
            return Err(SimulateError::InvalidEngagementRate(base_engagement_rate));
        }
        if !growth_rate.is_finite() || growth_rate < 0.0 {
            return Err(SimulateError::InvalidGrowthRate(growth_rate));
        }

        let dist_growth = Normal::new(growth_rate, growth_rate / N_GROWTH_STD_DIVISOR)
            .map_err(|err| SimulateError::Distribution {
                name: "growth".to_string(),
                message: err.to_string(),
            })?;
        let dist_engagement = Normal::new(
            base_engagement_rate,
            base_engagement_rate / N_ENGAGEMENT_STD_DIVISOR,
        )
        .map_err(|err| SimulateError::Distribution {
            name: "engagement".to_string(),
            message: err.to_string(),
        })?;

        Ok(Self {
            base_engagement_rate,
            growth_rate,
            date_start,
            dist_growth,
            dist_engagement,
        })
    }

    /// Mean daily engagement rate.
    pub fn base_engagement_rate(&self) -> f64 {
        self.base_engagement_rate
    }

    /// Mean daily follower growth.
    pub fn growth_rate(&self) -> f64 {
        self.growth_rate
    }

    /// Advance one day.
    ///
    /// Draw order per day is fixed: growth first, then engagement.
    ///
    /// Fails with [`SimulateError::CountOverflow`] once followers or an
    /// interaction count leave the `u64` range.
    pub fn step<R: Rng + ?Sized>(
        &self,
        state: SpecSeriesState,
        day_index: usize,
        rng: &mut R,
    ) -> Result<(SpecSeriesState, DailyMetricPoint), SimulateError> {
        let f_growth = self.dist_growth.sample(rng);
        let f_followers_next = state.followers * (1.0 + f_growth).max(0.0);
        let n_followers = derive_count(f_followers_next, "followers")?;

        let f_engagement_draw = self.dist_engagement.sample(rng);
        let f_engagement_rate = derive_clamped_rate(f_engagement_draw, N_ENGAGEMENT_DECIMALS);

        let point = DailyMetricPoint {
            day_index,
            date: derive_date(self.date_start, day_index),
            followers: n_followers,
            engagement_rate: f_engagement_rate,
            likes: derive_interaction_count(
                n_followers,
                f_engagement_rate,
                F_WEIGHT_LIKES,
                "likes",
            )?,
            comments: derive_interaction_count(
                n_followers,
                f_engagement_rate,
                F_WEIGHT_COMMENTS,
                "comments",
            )?,
            shares: derive_interaction_count(
                n_followers,
                f_engagement_rate,
                F_WEIGHT_SHARES,
                "shares",
            )?,
        };

        Ok((
            SpecSeriesState {
                followers: f_followers_next,
            },
            point,
        ))
    }
}

/// Generate a day-by-day simulated trajectory for one platform.
///
/// Output length is exactly `num_days`. The same seeded `rng` state and call
/// order reproduce the same sequence.
pub fn generate_series<R: Rng + ?Sized>(
    initial_followers: u64,
    base_engagement_rate: f64,
    num_days: usize,
    growth_rate: f64,
    date_start: NaiveDate,
    rng: &mut R,
) -> Result<Vec<DailyMetricPoint>, SimulateError> {
    if num_days == 0 {
        return Err(SimulateError::InvalidDayCount(num_days));
    }
    let model = SpecEngagementModel::new(base_engagement_rate, growth_rate, date_start)?;

    let mut state = SpecSeriesState::new(initial_followers);
    let mut l_points: Vec<DailyMetricPoint> = Vec::with_capacity(num_days);
    for n_day in 0..num_days {
        let (state_next, point) = model.step(state, n_day, rng)?;
        state = state_next;
        l_points.push(point);
    }

    debug!(
        initial_followers,
        num_days,
        final_followers = l_points.last().map(|p| p.followers).unwrap_or(0),
        "generated engagement series"
    );
    Ok(l_points)
}
