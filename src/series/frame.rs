//! Contains [`SeriesFrame`], a polars `LazyFrame` view over a [`Series`] used for range
//! filtering and per-day rollups.

use crate::series::error::FrameError;
use crate::series::store::Series;
use crate::types::daily_record::DailyRecord;
use crate::types::traits::any_instant::AnyInstant;
use crate::WeatherAnalyticsError;
use chrono::NaiveDate;
use polars::prelude::*;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A wrapper around a polars `LazyFrame` holding the samples of a [`Series`].
///
/// Columns: `timestamp` (raw text), `epoch_ms` (UTC milliseconds), `date` (UTC calendar day
/// as `YYYY-MM-DD`), `temperature`, `humidity`, `rainfall`. Operations are lazy until a
/// method collects.
#[derive(Clone)]
pub struct SeriesFrame {
    /// The underlying polars LazyFrame.
    pub frame: LazyFrame,
}

impl SeriesFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Builds the frame from a series, in the series' (ascending) order.
    pub fn from_series(series: &Series) -> Result<Self, FrameError> {
        let timestamps: Vec<String> = series.iter().map(|s| s.timestamp().to_string()).collect();
        let epoch_ms: Vec<i64> = series.iter().map(|s| s.instant().timestamp_millis()).collect();
        let dates: Vec<String> = series
            .iter()
            .map(|s| s.instant().date_naive().format(DATE_FORMAT).to_string())
            .collect();
        let temperature: Vec<f64> = series.iter().map(|s| s.temperature()).collect();
        let humidity: Vec<f64> = series.iter().map(|s| s.humidity()).collect();
        let rainfall: Vec<f64> = series.iter().map(|s| s.rainfall()).collect();

        let df = df!(
            "timestamp" => timestamps,
            "epoch_ms" => epoch_ms,
            "date" => dates,
            "temperature" => temperature,
            "humidity" => humidity,
            "rainfall" => rainfall,
        )?;
        Ok(Self::new(df.lazy()))
    }

    /// Keeps only samples with `start <= instant <= end`.
    ///
    /// # Errors
    ///
    /// Returns [`WeatherAnalyticsError::DateParsingError`] if either bound can't be resolved.
    pub fn get_range(
        &self,
        start: impl AnyInstant,
        end: impl AnyInstant,
    ) -> Result<SeriesFrame, WeatherAnalyticsError> {
        let start_ms = start
            .get_instant()
            .ok_or(WeatherAnalyticsError::DateParsingError)?
            .timestamp_millis();
        let end_ms = end
            .get_instant()
            .ok_or(WeatherAnalyticsError::DateParsingError)?
            .timestamp_millis();

        Ok(SeriesFrame::new(self.frame.clone().filter(
            col("epoch_ms")
                .gt_eq(lit(start_ms))
                .and(col("epoch_ms").lt_eq(lit(end_ms))),
        )))
    }

    /// Averages every metric per UTC calendar day, oldest day first.
    pub fn daily_means(&self) -> Result<Vec<DailyRecord>, FrameError> {
        let df = self
            .frame
            .clone()
            .group_by([col("date")])
            .agg([
                col("temperature").mean(),
                col("humidity").mean(),
                col("rainfall").mean(),
            ])
            .sort(["date"], SortMultipleOptions::default())
            .collect()?;

        let dates = df.column("date")?.str()?;
        let temperature = df.column("temperature")?.f64()?;
        let humidity = df.column("humidity")?.f64()?;
        let rainfall = df.column("rainfall")?.f64()?;

        let value = |column: &str, v: Option<f64>, row: usize| {
            v.ok_or_else(|| FrameError::UnexpectedNull {
                column: column.to_string(),
                row,
            })
        };

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let raw_date = dates.get(row).ok_or_else(|| FrameError::UnexpectedNull {
                column: "date".to_string(),
                row,
            })?;
            let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| {
                FrameError::InvalidDate {
                    column: "date".to_string(),
                    value: raw_date.to_string(),
                }
            })?;
            records.push(DailyRecord {
                date,
                temperature: value("temperature", temperature.get(row), row)?,
                humidity: value("humidity", humidity.get(row), row)?,
                rainfall: value("rainfall", rainfall.get(row), row)?,
            });
        }
        Ok(records)
    }

    /// Number of samples left after the lazy operations so far.
    pub fn count(&self) -> Result<usize, FrameError> {
        Ok(self.frame.clone().collect()?.height())
    }
}
