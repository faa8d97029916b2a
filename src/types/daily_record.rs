use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weather summary for one calendar day, as returned by the date-range endpoint and
/// by the daily rollup of a [`crate::Series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub temperature: f64,
    pub humidity: f64,
    pub rainfall: f64,
}
