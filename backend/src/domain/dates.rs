//! Date parsing and formatting shared by the calendar and review services.
//!
//! Evaluations carry their dates as strings (RFC 3339 timestamps written by the
//! app, or bare `YYYY-MM-DD` values entered in forms). Everything downstream of
//! this module works with `NaiveDate` calendar days.

use chrono::{DateTime, FixedOffset, NaiveDate};

/// Parse an RFC 3339 timestamp
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).ok()
}

/// Normalize a stored date to a calendar day.
///
/// Timestamps keep the calendar day of their own offset, so
/// `2024-03-01T00:30:00+09:00` is March 1st.
pub fn parse_calendar_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Some(timestamp) = parse_timestamp(value) {
        return Some(timestamp.date_naive());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Short month/day form used in bar labels, e.g. `3/5`
pub fn format_month_day(date: NaiveDate) -> String {
    date.format("%-m/%-d").to_string()
}

/// Feeding period text: `3/1~3/10`, or `3/1~` while still feeding
pub fn format_period(start: NaiveDate, end: Option<NaiveDate>) -> String {
    match end {
        Some(end) => format!("{}~{}", format_month_day(start), format_month_day(end)),
        None => format!("{}~", format_month_day(start)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_calendar_day_formats() {
        assert_eq!(parse_calendar_day("2024-03-01T09:00:00+09:00"), Some(date(2024, 3, 1)));
        assert_eq!(parse_calendar_day("2024-03-01T23:30:00-04:00"), Some(date(2024, 3, 1)));
        assert_eq!(parse_calendar_day(" 2024-03-05 "), Some(date(2024, 3, 5)));
        assert_eq!(parse_calendar_day("2024-02-30"), None);
        assert_eq!(parse_calendar_day("yesterday"), None);
        assert_eq!(parse_calendar_day(""), None);
    }

    #[test]
    fn test_format_period() {
        assert_eq!(format_period(date(2024, 8, 3), Some(date(2024, 8, 10))), "8/3~8/10");
        assert_eq!(format_period(date(2024, 12, 25), None), "12/25~");
    }
}
