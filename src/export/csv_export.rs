//! Renders samples as the dashboard's CSV export.

use crate::export::error::ExportError;
use crate::types::metric::Metric;
use crate::types::sample::Sample;
use chrono::{DateTime, SecondsFormat, Utc};

pub const CSV_HEADER: &str = "Timestamp,Temperature (°C),Humidity (%),Rainfall (mm)";

/// Renders `current` followed by `history` (in the order given) as CSV text.
///
/// Every number is written with exactly two decimals. Fields are not quoted, and lines are
/// joined with `\n` without a trailing newline.
///
/// # Errors
///
/// Returns [`ExportError::NonFiniteValue`] for the first NaN or infinite reading instead of
/// writing a corrupt export.
///
/// # Examples
///
/// ```
/// use weather_analytics::{serialize_csv, Sample};
///
/// let current = Sample::new("2024-01-01T00:00:00Z", 20.0, 50.0, 0.0).unwrap();
/// let csv = serialize_csv(&current, &[]).unwrap();
/// assert_eq!(
///     csv,
///     "Timestamp,Temperature (°C),Humidity (%),Rainfall (mm)\n2024-01-01T00:00:00Z,20.00,50.00,0.00"
/// );
/// ```
pub fn serialize_csv<'a>(
    current: &'a Sample,
    history: impl IntoIterator<Item = &'a Sample>,
) -> Result<String, ExportError> {
    let mut out = String::from(CSV_HEADER);
    for sample in std::iter::once(current).chain(history) {
        out.push('\n');
        write_row(&mut out, sample)?;
    }
    Ok(out)
}

fn write_row(out: &mut String, sample: &Sample) -> Result<(), ExportError> {
    out.push_str(sample.timestamp());
    for metric in Metric::ALL {
        let value = metric.read(sample);
        if !value.is_finite() {
            return Err(ExportError::NonFiniteValue {
                metric,
                timestamp: sample.timestamp().to_string(),
                value,
            });
        }
        out.push_str(&format!(",{value:.2}"));
    }
    Ok(())
}

/// Suggested download name, e.g. `weather_data_2024-01-01T00:00:00.000Z.csv`.
pub fn suggested_filename(at: DateTime<Utc>) -> String {
    format!(
        "weather_data_{}.csv",
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}
