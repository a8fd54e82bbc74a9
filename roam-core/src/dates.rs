//! Calendar date parsing for wire values.
//!
//! Browsers post `Date` objects as RFC 3339 timestamps while hand-written
//! clients send plain `YYYY-MM-DD`; both reduce to a UTC calendar date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer};

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
}

/// `deserialize_with` helper for required date fields.
pub fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(parse_date("2024-01-10"), NaiveDate::from_ymd_opt(2024, 1, 10));
    }

    #[test]
    fn test_parse_timestamp_uses_utc_date() {
        assert_eq!(
            parse_date("2024-01-10T03:00:00.000Z"),
            NaiveDate::from_ymd_opt(2024, 1, 10)
        );
        // 23:30 at -03:00 is already the next day in UTC
        assert_eq!(
            parse_date("2024-01-10T23:30:00-03:00"),
            NaiveDate::from_ymd_opt(2024, 1, 11)
        );
    }

    #[test]
    fn test_timestamps_count_calendar_nights() {
        use crate::trip::DateRange;

        // 26 hours elapsed, but two check-in days apart
        let range = DateRange::new(
            parse_date("2024-01-10T23:00:00Z").unwrap(),
            parse_date("2024-01-12T01:00:00Z").unwrap(),
        );
        assert_eq!(range.days(), 2);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_date("null"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }
}
