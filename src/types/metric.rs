//! The three tracked weather metrics and their shared table of threshold, unit and label.

use crate::types::sample::Sample;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tracked weather metric.
///
/// Thresholds, units, labels and the [`Sample`] accessor of each metric live in one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Temperature,
    Humidity,
    Rainfall,
}

struct MetricRow {
    key: &'static str,
    label: &'static str,
    unit: &'static str,
    threshold: f64,
    read: fn(&Sample) -> f64,
}

const TEMPERATURE: MetricRow = MetricRow {
    key: "temperature",
    label: "Temperature",
    unit: "°C",
    threshold: 5.0,
    read: Sample::temperature,
};

const HUMIDITY: MetricRow = MetricRow {
    key: "humidity",
    label: "Humidity",
    unit: "%",
    threshold: 10.0,
    read: Sample::humidity,
};

const RAINFALL: MetricRow = MetricRow {
    key: "rainfall",
    label: "Rainfall",
    unit: "mm",
    threshold: 2.0,
    read: Sample::rainfall,
};

impl Metric {
    /// All metrics, in the order change events and CSV columns use.
    pub const ALL: [Metric; 3] = [Metric::Temperature, Metric::Humidity, Metric::Rainfall];

    fn row(self) -> &'static MetricRow {
        match self {
            Metric::Temperature => &TEMPERATURE,
            Metric::Humidity => &HUMIDITY,
            Metric::Rainfall => &RAINFALL,
        }
    }

    /// Lowercase identifier, e.g. `"humidity"`.
    pub fn key(self) -> &'static str {
        self.row().key
    }

    /// Capitalized human label, e.g. `"Humidity"`.
    pub fn label(self) -> &'static str {
        self.row().label
    }

    pub fn unit(self) -> &'static str {
        self.row().unit
    }

    /// Smallest absolute change between two readings that counts as significant.
    pub fn threshold(self) -> f64 {
        self.row().threshold
    }

    pub fn read(self, sample: &Sample) -> f64 {
        (self.row().read)(sample)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}
