//! Date handling utilities for contribution data.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};

use crate::error::{GraphError, GraphResult};

/// Number of whole days from `a` forward to `b`.
///
/// The difference is taken in hours and divided by 24, truncating toward
/// zero, so `days_between(d, d) == 0` and a date one day before `b` yields 1.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_hours() / 24
}

/// Like [`days_between`], for instants with a time of day.
///
/// Two instants 23 hours apart are 0 days apart.
pub fn days_between_instants(a: DateTime<Utc>, b: DateTime<Utc>) -> i64 {
    b.signed_duration_since(a).num_hours() / 24
}

/// The Sunday on or before the given date.
pub fn previous_sunday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Shift a date by a (possibly negative) number of days.
pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// True if the date falls within the first seven days of its month.
pub fn is_first_week_of_month(date: NaiveDate) -> bool {
    (1..=7).contains(&date.day())
}

/// Weekday following the given one, wrapping Saturday to Sunday.
pub fn next_weekday(day: Weekday) -> Weekday {
    day.succ()
}

/// Parse a timestamp.
///
/// Supports:
/// - RFC 3339: "2024-01-15T12:00:00Z", "2024-01-15T12:00:00+02:00"
/// - Naive datetime (assumed UTC): "2024-01-15T12:00:00"
/// - Date only (midnight UTC): "2024-01-15"
pub fn parse_timestamp(s: &str) -> GraphResult<DateTime<Utc>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(ndt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&ndt));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(ndt) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&ndt));
        }
    }

    Err(GraphError::InvalidTime(s.to_string()))
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> GraphResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| GraphError::InvalidTime(s.to_string()))
}

/// Today's date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Short month name used for column labels ("Jan").
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b").to_string()
}

/// Date as shown in tooltips ("Jan 2, 2006").
pub fn tooltip_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_previous_sunday_of_sunday() {
        let sunday = date(2023, 1, 15);
        assert_eq!(previous_sunday(sunday), sunday);
    }

    #[test]
    fn test_previous_sunday_of_week() {
        let sunday = date(2023, 1, 8);
        for i in 0..7 {
            let day = shift_days(date(2023, 1, 14), -i);
            assert_eq!(previous_sunday(day), sunday);
        }
    }

    #[test]
    fn test_days_between_same_day() {
        let day = date(2023, 1, 15);
        assert_eq!(days_between(day, day), 0);
    }

    #[test]
    fn test_days_between_truncates_hours() {
        let a = parse_timestamp("2023-01-15T00:00:00Z").unwrap();
        let b = a + Duration::hours(23);
        assert_eq!(days_between_instants(a, b), 0);
        assert_eq!(days_between_instants(b, a), 0);
    }

    #[test]
    fn test_days_between_month_and_leap_year() {
        // 2023-01-15 + 1 month + 2 days
        assert_eq!(days_between(date(2023, 1, 15), date(2023, 2, 17)), 33);
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)), 2);
        assert_eq!(days_between(date(2023, 2, 28), date(2023, 3, 1)), 1);
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let dt = parse_timestamp("2024-01-15T12:00:00Z").unwrap();
        assert_eq!(dt.hour(), 12);

        let dt = parse_timestamp("2024-01-15T23:30:00-02:00").unwrap();
        assert_eq!(dt.date_naive(), date(2024, 1, 16));

        let dt = parse_timestamp("2024-01-15T08:00:00").unwrap();
        assert_eq!(dt.hour(), 8);

        let dt = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(dt.date_naive(), date(2024, 1, 15));

        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(month_label(date(2006, 1, 2)), "Jan");
        assert_eq!(tooltip_date(date(2006, 1, 2)), "Jan 2, 2006");
        assert_eq!(tooltip_date(date(2013, 4, 22)), "Apr 22, 2013");
    }

    #[test]
    fn test_first_week_of_month() {
        assert!(is_first_week_of_month(date(2023, 5, 1)));
        assert!(is_first_week_of_month(date(2023, 5, 7)));
        assert!(!is_first_week_of_month(date(2023, 5, 8)));
    }
}
