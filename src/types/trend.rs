use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Differences smaller than this are measurement jitter, not movement.
pub const TREND_DEADBAND: f64 = 0.1;

/// Direction of a reading compared to an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Classifies `current` against `previous` using the fixed [`TREND_DEADBAND`].
    ///
    /// A difference that can't be compared (NaN) is `Stable`, which keeps the
    /// classification antisymmetric for every pair of inputs.
    ///
    /// # Examples
    ///
    /// ```
    /// use weather_analytics::Trend;
    ///
    /// assert_eq!(Trend::classify(21.0, 20.0), Trend::Up);
    /// assert_eq!(Trend::classify(20.0, 21.0), Trend::Down);
    /// assert_eq!(Trend::classify(20.05, 20.0), Trend::Stable);
    /// ```
    pub fn classify(current: f64, previous: f64) -> Trend {
        let difference = current - previous;
        match difference.abs().partial_cmp(&TREND_DEADBAND) {
            None | Some(Ordering::Less) => Trend::Stable,
            Some(_) if difference > 0.0 => Trend::Up,
            Some(_) => Trend::Down,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Stable => "→",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Trend::Up => "Increasing",
            Trend::Down => "Decreasing",
            Trend::Stable => "Stable",
        }
    }
}
