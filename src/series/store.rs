//! The time-ordered history of [`Sample`]s and the "nearest sample at or before" queries
//! the rest of the pipeline is built on.

use crate::types::sample::Sample;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// An ordered history of samples.
///
/// Samples are kept sorted by instant, ascending. Input order doesn't matter; samples with
/// equal instants keep their relative input order, and every lookup that lands on a group
/// of equal instants returns the one that appeared first in the input.
///
/// # Examples
///
/// ```
/// use weather_analytics::{Sample, Series};
///
/// let series = Series::new(vec![
///     Sample::new("2024-01-01T12:00:00Z", 21.0, 40.0, 0.0).unwrap(),
///     Sample::new("2024-01-01T10:30:00Z", 18.0, 55.0, 0.0).unwrap(),
///     Sample::new("2024-01-01T11:30:00Z", 19.0, 50.0, 0.0).unwrap(),
/// ]);
///
/// let latest = series.latest().unwrap();
/// assert_eq!(latest.timestamp(), "2024-01-01T12:00:00Z");
///
/// let hour_ago = series.previous_hour(latest.instant()).unwrap();
/// assert_eq!(hour_ago.timestamp(), "2024-01-01T10:30:00Z");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(samples: impl IntoIterator<Item = Sample>) -> Self {
        let mut samples: Vec<Sample> = samples.into_iter().collect();
        // stable: equal instants keep input order
        samples.sort_by_key(Sample::instant);
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in ascending instant order.
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }

    /// The most recent sample.
    pub fn latest(&self) -> Option<&Sample> {
        let newest = self.samples.last()?.instant();
        self.first_at(newest)
    }

    /// The most recent sample whose instant is `<= target`.
    pub fn at_or_before(&self, target: DateTime<Utc>) -> Option<&Sample> {
        let end = self.samples.partition_point(|s| s.instant() <= target);
        let candidate = self.samples[..end].last()?.instant();
        self.first_at(candidate)
    }

    /// The most recent sample whose instant is strictly `< target`.
    pub fn before(&self, target: DateTime<Utc>) -> Option<&Sample> {
        let end = self.samples.partition_point(|s| s.instant() < target);
        let candidate = self.samples[..end].last()?.instant();
        self.first_at(candidate)
    }

    /// The most recent sample at least one hour (exactly 3600 seconds) older than `reference`.
    ///
    /// `None` means there is no baseline yet; it is not an error.
    pub fn previous_hour(&self, reference: DateTime<Utc>) -> Option<&Sample> {
        self.at_or_before(reference - Duration::hours(1))
    }

    /// The sample immediately preceding [`Series::latest`] in time.
    pub fn previous(&self) -> Option<&Sample> {
        let latest = self.latest()?;
        self.before(latest.instant())
    }

    /// Inserts a sample, keeping instant order. An equal instant goes after existing ones.
    pub fn push(&mut self, sample: Sample) {
        let index = self
            .samples
            .partition_point(|s| s.instant() <= sample.instant());
        self.samples.insert(index, sample);
    }

    /// Inserts a sample, replacing whatever was stored at the same instant.
    pub fn upsert(&mut self, sample: Sample) {
        let instant = sample.instant();
        self.samples.retain(|s| s.instant() != instant);
        self.push(sample);
    }

    /// Drops every sample older than `cutoff`.
    pub fn retain_since(&mut self, cutoff: DateTime<Utc>) {
        let start = self.samples.partition_point(|s| s.instant() < cutoff);
        self.samples.drain(..start);
    }

    pub fn replace_all(&mut self, samples: impl IntoIterator<Item = Sample>) {
        *self = Series::new(samples);
    }

    fn first_at(&self, instant: DateTime<Utc>) -> Option<&Sample> {
        let start = self.samples.partition_point(|s| s.instant() < instant);
        self.samples.get(start).filter(|s| s.instant() == instant)
    }
}

impl FromIterator<Sample> for Series {
    fn from_iter<T: IntoIterator<Item = Sample>>(iter: T) -> Self {
        Series::new(iter)
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn sample_at(minutes_before: i64, temperature: f64) -> Sample {
        Sample::at(t0() - Duration::minutes(minutes_before), temperature, 50.0, 0.0)
    }

    #[test]
    fn previous_hour_skips_samples_within_the_hour() {
        // deliberately unsorted
        let series = Series::new(vec![
            sample_at(30, 2.0),
            sample_at(90, 4.0),
            sample_at(0, 1.0),
            sample_at(61, 3.0),
        ]);

        let latest = series.latest().unwrap();
        assert_eq!(latest.instant(), t0());

        let previous = series.previous_hour(latest.instant()).unwrap();
        assert_eq!(previous.instant(), t0() - Duration::minutes(61));
        assert_eq!(previous.temperature(), 3.0);
    }

    #[test]
    fn previous_hour_boundary_is_inclusive() {
        let series = Series::new(vec![sample_at(0, 1.0), sample_at(60, 2.0)]);
        let previous = series.previous_hour(t0()).unwrap();
        assert_eq!(previous.temperature(), 2.0);
    }

    #[test]
    fn previous_hour_is_absent_without_old_samples() {
        let series = Series::new(vec![sample_at(0, 1.0), sample_at(59, 2.0)]);
        assert!(series.previous_hour(t0()).is_none());
        assert!(Series::default().previous_hour(t0()).is_none());
        assert!(Series::default().latest().is_none());
    }

    #[test]
    fn duplicates_resolve_to_first_in_input_order() {
        let series = Series::new(vec![
            sample_at(0, 10.0),
            sample_at(70, 1.0),
            sample_at(0, 11.0),
            sample_at(70, 2.0),
        ]);
        assert_eq!(series.latest().unwrap().temperature(), 10.0);
        assert_eq!(series.previous_hour(t0()).unwrap().temperature(), 1.0);
        assert_eq!(series.previous().unwrap().temperature(), 1.0);
    }

    #[test]
    fn previous_is_strictly_older_than_latest() {
        let series = Series::new(vec![sample_at(5, 2.0), sample_at(0, 1.0), sample_at(0, 9.0)]);
        assert_eq!(series.previous().unwrap().temperature(), 2.0);

        let single = Series::new(vec![sample_at(0, 1.0)]);
        assert!(single.previous().is_none());
    }

    #[test]
    fn upsert_replaces_samples_at_the_same_instant() {
        let mut series = Series::new(vec![sample_at(10, 1.0), sample_at(0, 2.0), sample_at(0, 3.0)]);
        series.upsert(sample_at(0, 4.0));
        assert_eq!(series.len(), 2);
        assert_eq!(series.latest().unwrap().temperature(), 4.0);

        series.upsert(sample_at(5, 5.0));
        assert_eq!(series.len(), 3);
        assert_eq!(series.previous().unwrap().temperature(), 5.0);
    }

    #[test]
    fn push_keeps_order_and_retain_prunes() {
        let mut series = Series::new(vec![sample_at(10, 2.0)]);
        series.push(sample_at(0, 3.0));
        series.push(sample_at(20, 1.0));
        series.push(sample_at(10, 2.5));

        let temps: Vec<f64> = series.iter().map(Sample::temperature).collect();
        assert_eq!(temps, vec![1.0, 2.0, 2.5, 3.0]);
        // the first pushed at an equal instant still wins lookups
        assert_eq!(
            series
                .at_or_before(t0() - Duration::minutes(10))
                .unwrap()
                .temperature(),
            2.0
        );

        series.retain_since(t0() - Duration::minutes(10));
        let temps: Vec<f64> = series.iter().map(Sample::temperature).collect();
        assert_eq!(temps, vec![2.0, 2.5, 3.0]);
    }
}
