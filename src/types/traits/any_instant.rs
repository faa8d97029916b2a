use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Resolves the timestamp shapes weather backends hand out into a single UTC instant.
///
/// Naive values (no offset) are interpreted as UTC. A bare calendar date resolves to
/// midnight UTC of that day.
pub trait AnyInstant {
    fn get_instant(self) -> Option<DateTime<Utc>>;
}

impl AnyInstant for NaiveDateTime {
    fn get_instant(self) -> Option<DateTime<Utc>> {
        Some(Utc.from_utc_datetime(&self))
    }
}

impl AnyInstant for DateTime<Local> {
    fn get_instant(self) -> Option<DateTime<Utc>> {
        Some(self.with_timezone(&Utc))
    }
}

impl AnyInstant for DateTime<Utc> {
    fn get_instant(self) -> Option<DateTime<Utc>> {
        Some(self)
    }
}

impl AnyInstant for DateTime<FixedOffset> {
    fn get_instant(self) -> Option<DateTime<Utc>> {
        Some(self.with_timezone(&Utc))
    }
}

impl AnyInstant for NaiveDate {
    fn get_instant(self) -> Option<DateTime<Utc>> {
        self.and_hms_opt(0, 0, 0)?.get_instant()
    }
}

impl AnyInstant for &String {
    fn get_instant(self) -> Option<DateTime<Utc>> {
        self.as_str().get_instant()
    }
}

impl AnyInstant for String {
    fn get_instant(self) -> Option<DateTime<Utc>> {
        self.as_str().get_instant()
    }
}

impl AnyInstant for &str {
    fn get_instant(self) -> Option<DateTime<Utc>> {
        let text = self.trim();
        // RFC 3339 with 'Z' or an explicit offset
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return dt.get_instant();
        }
        // chrono's own parser also accepts a space between date and time
        if let Ok(dt) = text.parse::<DateTime<FixedOffset>>() {
            return dt.get_instant();
        }
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
            if let Ok(naive_dt) = NaiveDateTime::parse_from_str(text, format) {
                return naive_dt.get_instant();
            }
        }
        if let Ok(naive_date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return naive_date.get_instant();
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn parses_rfc3339_with_zulu_and_offset() {
        assert_eq!(
            "2024-01-01T00:00:00Z".get_instant(),
            Some(utc(2024, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            "2024-01-01T02:30:00+02:00".get_instant(),
            Some(utc(2024, 1, 1, 0, 30, 0))
        );
    }

    #[test]
    fn naive_timestamps_are_utc() {
        assert_eq!(
            "2024-03-10 14:05:09".get_instant(),
            Some(utc(2024, 3, 10, 14, 5, 9))
        );
        assert_eq!(
            "2024-03-10T14:05:09.250".get_instant().map(|i| i.timestamp_millis()),
            Some(utc(2024, 3, 10, 14, 5, 9).timestamp_millis() + 250)
        );
        assert_eq!(
            "2024-03-10T14:05".get_instant(),
            Some(utc(2024, 3, 10, 14, 5, 0))
        );
    }

    #[test]
    fn bare_date_is_midnight() {
        assert_eq!("2024-03-10".get_instant(), Some(utc(2024, 3, 10, 0, 0, 0)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!("yesterday".get_instant(), None);
        assert_eq!("".get_instant(), None);
        assert_eq!("2024-13-40".get_instant(), None);
    }
}
