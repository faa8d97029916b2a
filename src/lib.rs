mod analysis;
mod dashboard;
mod error;
mod export;
mod series;
mod server;
mod sources;
mod types;

#[cfg(test)]
mod test_support;

pub use error::WeatherAnalyticsError;

pub use types::change_event::ChangeEvent;
pub use types::daily_record::DailyRecord;
pub use types::error::SampleError;
pub use types::location::LatLon;
pub use types::metric::Metric;
pub use types::sample::Sample;
pub use types::trend::{Trend, TREND_DEADBAND};
pub use types::traits::any_date::AnyDate;
pub use types::traits::any_instant::AnyInstant;

pub use series::error::FrameError;
pub use series::frame::SeriesFrame;
pub use series::store::Series;

pub use analysis::change_detector::detect_changes;
pub use analysis::trends::MetricTrends;

pub use export::csv_export::{serialize_csv, suggested_filename, CSV_HEADER};
pub use export::error::ExportError;

pub use sources::error::SourceError;
pub use sources::openweather::{
    CityDaily, CurrentConditions, OpenWeatherClient, DEFAULT_BASE_URL, DEFAULT_CITY_ID,
};
pub use sources::realtime_db::RealtimeDbClient;
pub use sources::{DailySource, Observation, WeatherSource};

pub use dashboard::config::{SchedulerConfig, DEFAULT_REFRESH_PERIOD};
pub use dashboard::error::EvaluationError;
pub use dashboard::evaluate_source;
pub use dashboard::scheduler::RefreshScheduler;
pub use dashboard::snapshot::{DashboardSnapshot, DashboardState, FETCH_ERROR_MESSAGE};

pub use server::config::ProxyConfig;
pub use server::error::ApiError;
pub use server::{build_router, AppState};
