//! Common test fixtures for contribution graph tests.
//!
//! This module provides pre-defined dates and files that represent the
//! interesting cases for calendar layout.

use std::io::Write;

use chrono::{Duration, NaiveDate};
use tempfile::NamedTempFile;

/// Well-known calendar end dates.
pub mod dates {
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("fixture date is valid")
    }

    /// A Monday; the window starts on a Tuesday.
    pub fn monday() -> NaiveDate {
        ymd(2013, 4, 22)
    }

    /// A Saturday; the window is exactly 52 full weeks.
    pub fn saturday() -> NaiveDate {
        ymd(2023, 4, 22)
    }

    /// A Sunday; the last week holds a single day.
    pub fn sunday() -> NaiveDate {
        ymd(2023, 4, 23)
    }

    /// Day after a leap day; the window contains Feb 29.
    pub fn after_leap_day() -> NaiveDate {
        ymd(2024, 3, 1)
    }

    /// A Friday in the last week of a year.
    pub fn year_end() -> NaiveDate {
        ymd(2022, 12, 30)
    }
}

/// Every day of a span long enough to hit each weekday in leap and
/// non-leap years.
///
/// Yields `days` consecutive dates starting at 2019-06-01.
pub fn sample_last_dates(days: usize) -> impl Iterator<Item = NaiveDate> {
    let start = NaiveDate::from_ymd_opt(2019, 6, 1).expect("fixture date is valid");
    (0..days as i64).map(move |i| start + Duration::days(i))
}

/// Seven consecutive end dates, one per weekday, starting on a Sunday.
pub fn one_of_each_weekday() -> Vec<NaiveDate> {
    sample_last_dates(7)
        .map(|d| d + Duration::days(1))
        .collect()
}

/// Writes `contents` to a temporary file with the given extension.
///
/// The file is deleted when the returned handle is dropped.
pub fn temp_event_file(extension: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("events-")
        .suffix(&format!(".{extension}"))
        .tempfile()
        .expect("create temporary event file");
    file.write_all(contents.as_bytes())
        .expect("write temporary event file");
    file
}
