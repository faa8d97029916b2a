//! Detection of significant metric changes between two readings.

use crate::types::change_event::ChangeEvent;
use crate::types::metric::Metric;
use crate::types::sample::Sample;

/// Compares `current` against `previous` and returns one [`ChangeEvent`] per metric whose
/// absolute change reaches that metric's threshold (see [`Metric::threshold`]).
///
/// Events always come out in [`Metric::ALL`] order. Without a `previous` sample there is
/// no baseline and nothing is reported. A change exactly equal to the threshold counts.
///
/// # Examples
///
/// ```
/// use weather_analytics::{detect_changes, Metric, Sample};
///
/// let previous = Sample::new("2024-01-01T11:00:00Z", 24.0, 50.0, 0.0).unwrap();
/// let current = Sample::new("2024-01-01T12:00:00Z", 30.0, 52.0, 0.0).unwrap();
///
/// let changes = detect_changes(&current, Some(&previous));
/// assert_eq!(changes.len(), 1);
/// assert_eq!(changes[0].metric, Metric::Temperature);
/// assert_eq!(changes[0].title, "Significant Temperature increase");
/// assert_eq!(changes[0].message, "Temperature increased by 6.0 °C");
///
/// assert!(detect_changes(&current, None).is_empty());
/// ```
pub fn detect_changes(current: &Sample, previous: Option<&Sample>) -> Vec<ChangeEvent> {
    let Some(previous) = previous else {
        return Vec::new();
    };
    Metric::ALL
        .into_iter()
        .filter_map(|metric| significant_change(metric, current, previous))
        .collect()
}

fn significant_change(metric: Metric, current: &Sample, previous: &Sample) -> Option<ChangeEvent> {
    let delta = metric.read(current) - metric.read(previous);
    if delta.is_nan() || delta.abs() < metric.threshold() {
        return None;
    }

    let direction = if delta > 0.0 { "increase" } else { "decrease" };
    Some(ChangeEvent {
        metric,
        title: format!("Significant {} {}", metric.label(), direction),
        message: format!(
            "{} {}d by {:.1} {}",
            metric.label(),
            direction,
            delta.abs(),
            metric.unit()
        ),
        delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(temperature: f64, humidity: f64, rainfall: f64) -> Sample {
        Sample::new("2024-01-01T12:00:00Z", temperature, humidity, rainfall).unwrap()
    }

    #[test]
    fn temperature_increase_above_threshold() {
        let changes = detect_changes(&sample(30.0, 50.0, 0.0), Some(&sample(24.0, 50.0, 0.0)));
        assert_eq!(
            changes,
            vec![ChangeEvent {
                metric: Metric::Temperature,
                title: "Significant Temperature increase".to_string(),
                message: "Temperature increased by 6.0 °C".to_string(),
                delta: 6.0,
            }]
        );
    }

    #[test]
    fn below_threshold_is_silent() {
        let changes = detect_changes(&sample(24.0, 50.0, 0.0), Some(&sample(20.0, 50.0, 0.0)));
        assert!(changes.is_empty());
    }

    #[test]
    fn boundary_is_inclusive_for_decrease() {
        let changes = detect_changes(&sample(20.0, 40.0, 0.0), Some(&sample(20.0, 50.0, 0.0)));
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].metric, Metric::Humidity);
        assert_eq!(changes[0].title, "Significant Humidity decrease");
        assert_eq!(changes[0].message, "Humidity decreased by 10.0 %");
        assert_eq!(changes[0].delta, -10.0);
    }

    #[test]
    fn extreme_values_without_change_are_silent() {
        let extreme = sample(55.0, 100.0, 300.0);
        assert!(detect_changes(&extreme, Some(&extreme)).is_empty());
    }

    #[test]
    fn events_follow_metric_order() {
        let changes = detect_changes(&sample(0.0, 90.0, 5.0), Some(&sample(10.0, 60.0, 1.0)));
        let metrics: Vec<Metric> = changes.iter().map(|c| c.metric).collect();
        assert_eq!(
            metrics,
            vec![Metric::Temperature, Metric::Humidity, Metric::Rainfall]
        );
        assert_eq!(changes[2].message, "Rainfall increased by 4.0 mm");

        let changes = detect_changes(&sample(10.0, 90.0, 5.0), Some(&sample(10.0, 60.0, 1.0)));
        let metrics: Vec<Metric> = changes.iter().map(|c| c.metric).collect();
        assert_eq!(metrics, vec![Metric::Humidity, Metric::Rainfall]);
    }

    #[test]
    fn emits_iff_threshold_reached() {
        let deltas = [-12.0, -10.0, -5.0, -2.0, -1.99, 0.0, 1.99, 2.0, 4.99, 5.0, 9.99, 10.0];
        let base = sample(20.0, 50.0, 10.0);
        for &delta in &deltas {
            let current = sample(20.0 + delta, 50.0 + delta, 10.0 + delta);
            let changes = detect_changes(&current, Some(&base));
            for metric in Metric::ALL {
                let actual = metric.read(&current) - metric.read(&base);
                let expected = actual.abs() >= metric.threshold();
                assert_eq!(
                    changes.iter().any(|c| c.metric == metric),
                    expected,
                    "{metric} delta {delta}"
                );
            }
        }
    }

    #[test]
    fn nan_readings_never_fire() {
        let changes = detect_changes(&sample(f64::NAN, 50.0, 0.0), Some(&sample(20.0, 50.0, 0.0)));
        assert!(changes.is_empty());
    }
}
