//! Client for a realtime database (Firebase-style REST) holding weather readings.
//!
//! The database stores one JSON object per reading under an arbitrary key:
//!
//! ```json
//! {
//!   "-Nx1": { "DateTime": "2024-01-01 12:00:00", "Temperature (°C)": 21.4,
//!             "Humidity (%)": "48", "Rainfall (mm)": 0 }
//! }
//! ```
//!
//! Readings may be numbers or numeric strings. Missing or non-numeric readings become `0`.

use crate::sources::error::SourceError;
use crate::sources::http::get_json;
use crate::sources::{Observation, WeatherSource};
use crate::types::sample::Sample;
use async_trait::async_trait;
use bon::bon;
use log::info;
use reqwest::Client;
use serde_json::Value;

const DATETIME_FIELD: &str = "DateTime";
const TEMPERATURE_FIELD: &str = "Temperature (°C)";
const HUMIDITY_FIELD: &str = "Humidity (%)";
const RAINFALL_FIELD: &str = "Rainfall (mm)";

/// Reads the full snapshot of a database path over REST.
///
/// # Examples
///
/// ```no_run
/// use weather_analytics::RealtimeDbClient;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let db = RealtimeDbClient::builder()
///     .database_url("https://example-weather-default-rtdb.firebaseio.com")
///     .build();
/// let samples = db.fetch_samples().await?;
/// println!("{} readings", samples.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RealtimeDbClient {
    client: Client,
    database_url: String,
    path: String,
    auth_token: Option<String>,
}

#[bon]
impl RealtimeDbClient {
    /// * `database_url` - Root URL of the database.
    /// * `path` - Path of the readings node. Defaults to the root.
    /// * `auth_token` - Sent as the `auth` query parameter when set.
    /// * `client` - Reuse an existing `reqwest::Client`.
    #[builder]
    pub fn new(
        #[builder(into)] database_url: String,
        #[builder(into)] path: Option<String>,
        #[builder(into)] auth_token: Option<String>,
        client: Option<Client>,
    ) -> Self {
        Self {
            client: client.unwrap_or_default(),
            database_url,
            path: path.unwrap_or_default(),
            auth_token,
        }
    }
}

impl RealtimeDbClient {
    pub fn snapshot_url(&self) -> String {
        format!(
            "{}/{}.json",
            self.database_url.trim_end_matches('/'),
            self.path.trim_matches('/')
        )
    }

    /// Fetches every reading under the configured path.
    ///
    /// # Errors
    ///
    /// [`SourceError::NoData`] when the path is empty, [`SourceError::MissingField`] /
    /// [`SourceError::InvalidRecord`] when a record has no usable timestamp, and the
    /// network/HTTP/JSON variants for transport failures.
    pub async fn fetch_samples(&self) -> Result<Vec<Sample>, SourceError> {
        let url = self.snapshot_url();
        let query: Vec<(&str, String)> = self
            .auth_token
            .iter()
            .map(|token| ("auth", token.clone()))
            .collect();

        let snapshot: Value = get_json(&self.client, &url, &query).await?;
        let samples = parse_snapshot(snapshot)?;
        info!("Fetched {} readings from {}", samples.len(), url);
        Ok(samples)
    }
}

#[async_trait]
impl WeatherSource for RealtimeDbClient {
    fn name(&self) -> &str {
        "realtime-db"
    }

    async fn fetch(&self) -> Result<Observation, SourceError> {
        Ok(Observation::History(self.fetch_samples().await?))
    }
}

pub(crate) fn parse_snapshot(snapshot: Value) -> Result<Vec<Sample>, SourceError> {
    let records: Vec<(String, Value)> = match snapshot {
        Value::Object(map) => map.into_iter().collect(),
        // integer keys come back as an array with nulls for the gaps
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .filter(|(_, record)| !record.is_null())
            .map(|(index, record)| (index.to_string(), record))
            .collect(),
        _ => Vec::new(),
    };
    if records.is_empty() {
        return Err(SourceError::NoData);
    }
    records
        .iter()
        .map(|(key, record)| record_to_sample(key, record))
        .collect()
}

fn record_to_sample(key: &str, record: &Value) -> Result<Sample, SourceError> {
    let timestamp = record
        .get(DATETIME_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| SourceError::MissingField {
            key: key.to_string(),
            field: DATETIME_FIELD,
        })?;
    Sample::new(
        timestamp,
        reading(record.get(TEMPERATURE_FIELD)),
        reading(record.get(HUMIDITY_FIELD)),
        reading(record.get(RAINFALL_FIELD)),
    )
    .map_err(|source| SourceError::InvalidRecord {
        key: key.to_string(),
        source,
    })
}

fn reading(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}
