use bon::Builder;
use chrono::TimeDelta;
use std::time::Duration;

/// Period between refresh cycles when none is configured.
pub const DEFAULT_REFRESH_PERIOD: Duration = Duration::from_secs(60);

/// Settings for [`crate::RefreshScheduler`].
///
/// ```
/// use weather_analytics::SchedulerConfig;
/// use std::time::Duration;
///
/// let config = SchedulerConfig::builder()
///     .period(Duration::from_secs(30))
///     .keep_stale_on_error(false)
///     .build();
/// assert_eq!(config.period, Duration::from_secs(30));
/// assert!(!config.keep_stale_on_error);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct SchedulerConfig {
    /// Time between the starts of two refresh cycles.
    #[builder(default = DEFAULT_REFRESH_PERIOD)]
    pub period: Duration,

    /// How much history to keep for sources that only report current conditions,
    /// measured back from the newest sample.
    #[builder(default = TimeDelta::hours(24))]
    pub retention: TimeDelta,

    /// After a failed cycle, keep serving the last successful snapshot alongside the error.
    #[builder(default = true)]
    pub keep_stale_on_error: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
