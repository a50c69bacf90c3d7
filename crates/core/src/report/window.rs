//! Date window parsing and event timestamp normalization.
//!
//! Window bounds arrive in day/month/year textual form. Event timestamps
//! arrive in whatever format the upstream API felt like producing, so
//! parsing tries an ordered list of formats; everything collapses to a
//! calendar day in the local reporting timezone.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Display format used in report rows.
const DISPLAY_FORMAT: &str = "%d-%m-%Y";

/// Accepted formats for window bounds.
const WINDOW_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y"];

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("invalid date '{0}', expected dd/mm/yyyy")]
    InvalidDate(String),
}

/// The inclusive `[start, end]` calendar range filtering reportable events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportWindow {
    /// Parse both bounds from day/month/year text.
    pub fn parse(start: &str, end: &str) -> Result<Self, WindowError> {
        Ok(Self {
            start: parse_bound(start)?,
            end: parse_bound(end)?,
        })
    }

    /// Inclusive containment at calendar-day granularity.
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }
}

fn parse_bound(value: &str) -> Result<NaiveDate, WindowError> {
    let trimmed = value.trim();
    WINDOW_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| WindowError::InvalidDate(value.to_string()))
}

/// Parse an event timestamp down to a local calendar day.
///
/// Tries RFC 3339, common naive datetime shapes, a bare date, and unix
/// epoch seconds (milliseconds for large values). Returns `None` for
/// anything unparseable; the caller drops the event.
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local).date_naive());
    }

    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ndt.date());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(n) = raw.parse::<i64>() {
        let secs = if n.abs() >= 1_000_000_000_000 { n / 1000 } else { n };
        return DateTime::from_timestamp(secs, 0)
            .map(|dt| dt.with_timezone(&Local).date_naive());
    }

    None
}

/// Render a calendar day in the fixed report display format.
pub fn format_display(day: NaiveDate) -> String {
    day.format(DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_window() {
        let window = ReportWindow::parse("01/03/2024", "31/03/2024").unwrap();
        assert_eq!(window.start, day(2024, 3, 1));
        assert_eq!(window.end, day(2024, 3, 31));
    }

    #[test]
    fn test_parse_window_dash_separator() {
        let window = ReportWindow::parse("01-03-2024", "31-03-2024").unwrap();
        assert_eq!(window.start, day(2024, 3, 1));
    }

    #[test]
    fn test_parse_window_invalid() {
        assert!(ReportWindow::parse("2024-03-01", "31/03/2024").is_err());
        assert!(ReportWindow::parse("01/03/2024", "not a date").is_err());
        assert!(ReportWindow::parse("32/03/2024", "31/03/2024").is_err());
    }

    #[test]
    fn test_contains_is_inclusive() {
        let window = ReportWindow::parse("01/03/2024", "31/03/2024").unwrap();
        assert!(window.contains(day(2024, 3, 1)));
        assert!(window.contains(day(2024, 3, 15)));
        assert!(window.contains(day(2024, 3, 31)));
        assert!(!window.contains(day(2024, 2, 29)));
        assert!(!window.contains(day(2024, 4, 1)));
    }

    #[test]
    fn test_parse_event_date_naive_datetime() {
        assert_eq!(
            parse_event_date("2024-03-15 10:30:00"),
            Some(day(2024, 3, 15))
        );
        assert_eq!(
            parse_event_date("2024-03-15T10:30:00"),
            Some(day(2024, 3, 15))
        );
    }

    #[test]
    fn test_parse_event_date_bare_date() {
        assert_eq!(parse_event_date("2024-04-05"), Some(day(2024, 4, 5)));
    }

    #[test]
    fn test_parse_event_date_rfc3339() {
        assert!(parse_event_date("2024-03-15T10:30:00Z").is_some());
        assert!(parse_event_date("2024-03-15T10:30:00+02:00").is_some());
    }

    #[test]
    fn test_parse_event_date_epoch() {
        // 2024-03-15T10:30:00Z in seconds and milliseconds
        assert!(parse_event_date("1710498600").is_some());
        assert!(parse_event_date("1710498600000").is_some());
        assert_eq!(
            parse_event_date("1710498600"),
            parse_event_date("1710498600000")
        );
    }

    #[test]
    fn test_parse_event_date_invalid() {
        assert_eq!(parse_event_date(""), None);
        assert_eq!(parse_event_date("yesterday"), None);
        assert_eq!(parse_event_date("15/03/2024 10:30"), None);
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display(day(2024, 3, 5)), "05-03-2024");
        assert_eq!(format_display(day(2024, 12, 31)), "31-12-2024");
    }
}
