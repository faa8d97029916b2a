use crate::types::error::SampleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON data from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No weather data available")]
    NoData,

    #[error("Record '{key}' is missing required field '{field}'")]
    MissingField { key: String, field: &'static str },

    #[error("Record '{key}' could not be turned into a sample")]
    InvalidRecord {
        key: String,
        #[source]
        source: SampleError,
    },
}
