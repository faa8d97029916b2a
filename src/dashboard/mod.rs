//! Derived dashboard state and the periodic driver that keeps it fresh.

pub mod config;
pub mod error;
pub mod scheduler;
pub mod snapshot;

use crate::dashboard::snapshot::DashboardSnapshot;
use crate::error::WeatherAnalyticsError;
use crate::series::store::Series;
use crate::sources::{Observation, WeatherSource};
use chrono::Utc;

/// Fetches once from `source` and evaluates the result, without starting a scheduler.
///
/// A source that only reports current conditions yields a snapshot without a baseline:
/// no changes and no trends.
pub async fn evaluate_source(
    source: &dyn WeatherSource,
) -> Result<DashboardSnapshot, WeatherAnalyticsError> {
    let series = match source.fetch().await? {
        Observation::Current(sample) => Series::new([sample]),
        Observation::History(samples) => Series::new(samples),
    };
    Ok(DashboardSnapshot::evaluate(&series, Utc::now())?)
}
