use crate::types::metric::Metric;
use crate::types::sample::Sample;
use crate::types::trend::Trend;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Per-metric [`Trend`] between two samples.
///
/// Serializes as a map keyed by [`Metric::key`], e.g. `{"temperature": "up", ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricTrends {
    // indexed like Metric::ALL
    trends: [Trend; Metric::ALL.len()],
}

impl MetricTrends {
    pub fn between(current: &Sample, previous: &Sample) -> Self {
        Self {
            trends: Metric::ALL
                .map(|metric| Trend::classify(metric.read(current), metric.read(previous))),
        }
    }

    pub fn get(&self, metric: Metric) -> Trend {
        self.trends[metric as usize]
    }

    /// Trends in [`Metric::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, Trend)> + '_ {
        Metric::ALL.into_iter().zip(self.trends.iter().copied())
    }
}

impl Serialize for MetricTrends {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.trends.len()))?;
        for (metric, trend) in self.iter() {
            map.serialize_entry(metric.key(), &trend)?;
        }
        map.end()
    }
}
