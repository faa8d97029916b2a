//! Periodic fetch-then-evaluate driver.
//!
//! A single task owns the [`Series`] and publishes whole [`DashboardState`] values through
//! a `watch` channel, so readers never observe a half-built snapshot.

use crate::dashboard::config::{SchedulerConfig, DEFAULT_REFRESH_PERIOD};
use crate::dashboard::snapshot::{DashboardSnapshot, DashboardState, FETCH_ERROR_MESSAGE};
use crate::error::WeatherAnalyticsError;
use crate::series::store::Series;
use crate::sources::error::SourceError;
use crate::sources::{Observation, WeatherSource};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

/// Runs one refresh immediately, then one per configured period, until stopped.
///
/// Cycles never overlap: a tick that comes due while a cycle is still running is
/// skipped. Stopping abandons an in-flight fetch and its result is never published.
///
/// Dropping the scheduler stops it as well; [`RefreshScheduler::stop`] additionally waits
/// for the driver task to finish.
///
/// ```no_run
/// use std::sync::Arc;
/// use weather_analytics::{RealtimeDbClient, RefreshScheduler, SchedulerConfig};
///
/// # #[tokio::main]
/// # async fn main() {
/// let source = RealtimeDbClient::builder()
///     .database_url("https://example-weather-default-rtdb.firebaseio.com")
///     .build();
/// let scheduler = RefreshScheduler::start(Arc::new(source), SchedulerConfig::default());
///
/// let mut updates = scheduler.subscribe();
/// updates.changed().await.unwrap();
/// println!("{:?}", *updates.borrow());
///
/// scheduler.stop().await;
/// # }
/// ```
#[derive(Debug)]
pub struct RefreshScheduler {
    state: watch::Receiver<DashboardState>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RefreshScheduler {
    /// Spawns the driver task on the current tokio runtime.
    ///
    /// A zero `period` is replaced by [`DEFAULT_REFRESH_PERIOD`].
    pub fn start(source: Arc<dyn WeatherSource>, mut config: SchedulerConfig) -> Self {
        if config.period.is_zero() {
            warn!(
                "Refresh period must be non-zero, using {:?}",
                DEFAULT_REFRESH_PERIOD
            );
            config.period = DEFAULT_REFRESH_PERIOD;
        }
        let (publisher, state) = watch::channel(DashboardState::Loading);
        let token = CancellationToken::new();
        let runner = CycleRunner {
            source,
            config,
            series: Series::default(),
            last_good: None,
            publisher,
        };
        let task = tokio::spawn(runner.run(token.clone()));
        Self {
            state,
            token,
            task: Some(task),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.clone()
    }

    pub fn current(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!("Refresh task ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

struct CycleRunner {
    source: Arc<dyn WeatherSource>,
    config: SchedulerConfig,
    series: Series,
    last_good: Option<Arc<DashboardSnapshot>>,
    publisher: watch::Sender<DashboardState>,
}

impl CycleRunner {
    async fn run(mut self, token: CancellationToken) {
        info!(
            "Refreshing from {} every {:?}",
            self.source.name(),
            self.config.period
        );
        let mut ticker = interval(self.config.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_cycle_end: Option<Instant> = None;

        loop {
            let due = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                due = ticker.tick() => due,
            };
            if last_cycle_end.is_some_and(|end| due < end) {
                debug!("Skipping tick that came due during the previous cycle");
                continue;
            }

            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => break,
                outcome = self.source.fetch() => outcome,
            };
            let state = self.apply(outcome, Utc::now());
            self.publisher.send_replace(state);
            last_cycle_end = Some(Instant::now());
        }
        info!("Stopped refreshing from {}", self.source.name());
    }

    fn apply(
        &mut self,
        outcome: Result<Observation, SourceError>,
        now: DateTime<Utc>,
    ) -> DashboardState {
        match self.evaluate(outcome, now) {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.last_good = Some(snapshot.clone());
                DashboardState::Ready { snapshot }
            }
            Err(e) => {
                warn!("Refresh from {} failed: {}", self.source.name(), e);
                let stale = if self.config.keep_stale_on_error {
                    self.last_good.clone()
                } else {
                    None
                };
                DashboardState::Error {
                    message: FETCH_ERROR_MESSAGE.to_string(),
                    stale,
                }
            }
        }
    }

    fn evaluate(
        &mut self,
        outcome: Result<Observation, SourceError>,
        now: DateTime<Utc>,
    ) -> Result<DashboardSnapshot, WeatherAnalyticsError> {
        match outcome? {
            Observation::History(samples) => self.series.replace_all(samples),
            Observation::Current(sample) => {
                // polling faster than the source updates repeats the same reading
                self.series.upsert(sample);
                if let Some(newest) = self.series.latest().map(|s| s.instant()) {
                    self.series.retain_since(newest - self.config.retention);
                }
            }
        }
        Ok(DashboardSnapshot::evaluate(&self.series, now)?)
    }
}
