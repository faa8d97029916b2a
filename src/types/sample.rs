//! Defines [`Sample`], the single normalized weather reading every other part of the
//! crate consumes.

use crate::types::error::SampleError;
use crate::types::metric::Metric;
use crate::types::traits::any_instant::AnyInstant;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One weather observation.
///
/// A `Sample` keeps the timestamp text exactly as the data source delivered it (this is
/// what ends up in CSV exports) next to the parsed UTC instant used for ordering and
/// time arithmetic. Samples are immutable: fields are private and nothing derived is
/// ever written back onto them.
///
/// # Examples
///
/// ```
/// use weather_analytics::Sample;
///
/// let sample = Sample::new("2024-01-01T00:00:00Z", 20.0, 50.0, 0.0).unwrap();
/// assert_eq!(sample.timestamp(), "2024-01-01T00:00:00Z");
/// assert_eq!(sample.temperature(), 20.0);
///
/// assert!(Sample::new("not a time", 20.0, 50.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SampleRecord")]
pub struct Sample {
    timestamp: String,
    #[serde(skip)]
    instant: DateTime<Utc>,
    temperature: f64,
    humidity: f64,
    rainfall: f64,
}

impl Sample {
    /// Builds a sample from a timestamp string and the three readings.
    ///
    /// # Errors
    ///
    /// Returns [`SampleError::InvalidTimestamp`] if `timestamp` can't be resolved to an instant.
    pub fn new(
        timestamp: impl Into<String>,
        temperature: f64,
        humidity: f64,
        rainfall: f64,
    ) -> Result<Self, SampleError> {
        let timestamp = timestamp.into();
        let instant = (&timestamp)
            .get_instant()
            .ok_or_else(|| SampleError::InvalidTimestamp(timestamp.clone()))?;
        Ok(Self {
            timestamp,
            instant,
            temperature,
            humidity,
            rainfall,
        })
    }

    /// Builds a sample for a known instant; the timestamp text is rendered as RFC 3339
    /// with second precision and a `Z` suffix.
    pub fn at(instant: DateTime<Utc>, temperature: f64, humidity: f64, rainfall: f64) -> Self {
        Self {
            timestamp: instant.to_rfc3339_opts(SecondsFormat::Secs, true),
            instant,
            temperature,
            humidity,
            rainfall,
        }
    }

    /// The timestamp as delivered by the data source.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The parsed timestamp.
    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// Degrees Celsius.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Relative humidity in percent.
    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    /// Millimeters.
    pub fn rainfall(&self) -> f64 {
        self.rainfall
    }

    pub fn value(&self, metric: Metric) -> f64 {
        metric.read(self)
    }
}

#[derive(Deserialize)]
struct SampleRecord {
    timestamp: String,
    temperature: f64,
    humidity: f64,
    #[serde(default)]
    rainfall: f64,
}

impl TryFrom<SampleRecord> for Sample {
    type Error = SampleError;

    fn try_from(record: SampleRecord) -> Result<Self, Self::Error> {
        Sample::new(
            record.timestamp,
            record.temperature,
            record.humidity,
            record.rainfall,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn keeps_raw_timestamp_text() {
        let sample = Sample::new("2024-05-01 10:00:00", 12.5, 80.0, 0.2).unwrap();
        assert_eq!(sample.timestamp(), "2024-05-01 10:00:00");
        assert_eq!(
            sample.instant(),
            Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
        );
    }

    #[test]
    fn at_renders_zulu_timestamp() {
        let instant = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let sample = Sample::at(instant, 20.0, 50.0, 0.0);
        assert_eq!(sample.timestamp(), "2024-01-01T00:00:00Z");
    }

    #[test]
    fn rejects_unparsable_timestamp() {
        assert_eq!(
            Sample::new("soon", 1.0, 2.0, 3.0),
            Err(SampleError::InvalidTimestamp("soon".to_string()))
        );
    }

    #[test]
    fn deserializes_with_rainfall_defaulting_to_zero() {
        let sample: Sample = serde_json::from_str(
            r#"{"timestamp":"2024-01-01T00:00:00Z","temperature":20.0,"humidity":50.0}"#,
        )
        .unwrap();
        assert_eq!(sample.rainfall(), 0.0);
        assert_eq!(
            sample.instant(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );

        let bad = serde_json::from_str::<Sample>(
            r#"{"timestamp":"nope","temperature":20.0,"humidity":50.0}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn serializes_without_instant() {
        let sample = Sample::new("2024-01-01T00:00:00Z", 20.0, 50.0, 0.0).unwrap();
        let json = serde_json::to_value(&sample).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "timestamp": "2024-01-01T00:00:00Z",
                "temperature": 20.0,
                "humidity": 50.0,
                "rainfall": 0.0
            })
        );
    }
}
