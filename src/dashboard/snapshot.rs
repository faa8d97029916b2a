//! One evaluation of a [`Series`]: the values a dashboard shows for a single refresh.

use crate::analysis::change_detector::detect_changes;
use crate::analysis::trends::MetricTrends;
use crate::dashboard::error::EvaluationError;
use crate::export::csv_export::serialize_csv;
use crate::export::error::ExportError;
use crate::series::error::FrameError;
use crate::series::frame::SeriesFrame;
use crate::series::store::Series;
use crate::types::change_event::ChangeEvent;
use crate::types::daily_record::DailyRecord;
use crate::types::sample::Sample;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

/// Shown to users whenever a refresh cycle fails.
pub const FETCH_ERROR_MESSAGE: &str = "Unable to fetch weather data. Please try again later.";

/// Everything derived from a series in one refresh cycle.
///
/// `changes` compare the latest sample with the one at least an hour older; `trends`
/// compare it with the sample immediately before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub current: Sample,
    pub previous_hour: Option<Sample>,
    pub previous: Option<Sample>,
    pub trends: Option<MetricTrends>,
    pub changes: Vec<ChangeEvent>,
    /// The whole series, ascending, including `current`.
    pub historical: Series,
    pub evaluated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// # Errors
    ///
    /// [`EvaluationError::EmptySeries`] when there is no sample to evaluate.
    pub fn evaluate(
        series: &Series,
        evaluated_at: DateTime<Utc>,
    ) -> Result<Self, EvaluationError> {
        let current = series.latest().ok_or(EvaluationError::EmptySeries)?;
        let previous_hour = series.previous_hour(current.instant());
        let previous = series.previous();

        Ok(Self {
            current: current.clone(),
            previous_hour: previous_hour.cloned(),
            previous: previous.cloned(),
            trends: previous.map(|p| MetricTrends::between(current, p)),
            changes: detect_changes(current, previous_hour),
            historical: series.clone(),
            evaluated_at,
        })
    }

    /// CSV export: the current sample followed by the historical series, newest first.
    pub fn to_csv(&self) -> Result<String, ExportError> {
        serialize_csv(&self.current, self.historical.iter().rev())
    }

    /// Per-day means of the historical series.
    pub fn daily(&self) -> Result<Vec<DailyRecord>, FrameError> {
        SeriesFrame::from_series(&self.historical)?.daily_means()
    }
}

/// What the dashboard is showing right now.
///
/// Serializes as `{"status": "loading" | "ready" | "error", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DashboardState {
    /// No cycle has finished yet.
    Loading,
    Ready {
        snapshot: Arc<DashboardSnapshot>,
    },
    /// The latest cycle failed. `stale` is the last successful snapshot, when kept.
    Error {
        message: String,
        stale: Option<Arc<DashboardSnapshot>>,
    },
}

impl DashboardState {
    /// The snapshot a reader should display, fresh or stale.
    pub fn snapshot(&self) -> Option<&Arc<DashboardSnapshot>> {
        match self {
            DashboardState::Loading => None,
            DashboardState::Ready { snapshot } => Some(snapshot),
            DashboardState::Error { stale, .. } => stale.as_ref(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading)
    }
}
