use crate::types::metric::Metric;
use serde::{Deserialize, Serialize};

/// A significant change of one metric between two readings.
///
/// Produced fresh on every evaluation; a new evaluation replaces the previous set wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub metric: Metric,
    /// e.g. `"Significant Temperature increase"`
    pub title: String,
    /// e.g. `"Temperature increased by 6.0 °C"`
    pub message: String,
    /// `current - previous`
    pub delta: f64,
}
