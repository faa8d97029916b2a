//! Data sources the pipeline polls. Each client is an explicitly constructed handle; the
//! scheduler and the HTTP service receive them as trait objects.

pub mod error;
mod http;
pub mod openweather;
pub mod realtime_db;

use crate::sources::error::SourceError;
use crate::types::daily_record::DailyRecord;
use crate::types::sample::Sample;
use async_trait::async_trait;
use chrono::NaiveDate;

/// What one poll of a [`WeatherSource`] produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// Only the latest reading; history is accumulated by the caller.
    Current(Sample),
    /// The complete history the source knows about, in any order.
    History(Vec<Sample>),
}

/// A backend that can be polled for weather readings.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    async fn fetch(&self) -> Result<Observation, SourceError>;
}

/// A backend that can report the weather for a given calendar day.
#[async_trait]
pub trait DailySource: Send + Sync {
    async fn daily(&self, date: NaiveDate) -> Result<DailyRecord, SourceError>;
}
