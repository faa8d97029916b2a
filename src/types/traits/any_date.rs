use crate::types::traits::any_instant::AnyInstant;
use chrono::NaiveDate;

/// Resolves a calendar day from a date string or a full timestamp.
pub trait AnyDate {
    fn get_date(self) -> Option<NaiveDate>;
}

impl AnyDate for NaiveDate {
    fn get_date(self) -> Option<NaiveDate> {
        Some(self)
    }
}

impl AnyDate for &str {
    fn get_date(self) -> Option<NaiveDate> {
        let text = self.trim();
        if let Ok(naive_date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Some(naive_date);
        }
        // Full timestamps are accepted too; the UTC calendar day is used
        text.get_instant().map(|instant| instant.date_naive())
    }
}

impl AnyDate for String {
    fn get_date(self) -> Option<NaiveDate> {
        self.as_str().get_date()
    }
}
