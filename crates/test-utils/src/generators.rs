//! Generators for synthetic contribution data.
//!
//! These generators create predictable, verifiable patterns plus a seeded
//! random stream for benchmarks.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use graph_common::{Calendar, ContributionEvent, WINDOW_DAYS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Noon UTC on `date`.
pub fn noon(date: NaiveDate) -> chrono::DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).expect("noon is a valid time"))
}

/// One event of `weight` at noon on each of the `days` days ending at
/// `last_date`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use test_utils::daily_events;
///
/// let last = NaiveDate::from_ymd_opt(2023, 4, 22).unwrap();
/// let events = daily_events(last, 3, 2);
/// assert_eq!(events.len(), 3);
/// assert_eq!(events[2].date(), last);
/// ```
pub fn daily_events(last_date: NaiveDate, days: usize, weight: u32) -> Vec<ContributionEvent> {
    (0..days)
        .map(|i| {
            let date = last_date - Duration::days((days - 1 - i) as i64);
            ContributionEvent::new(noon(date), weight)
        })
        .collect()
}

/// A full calendar whose count at index `i` is `i`.
///
/// The busiest day is the last one with a count of 363, and the sum of all
/// counts is 363 * 364 / 2.
pub fn ramp_calendar(last_date: NaiveDate) -> Calendar {
    let mut calendar = Calendar::new(last_date);
    for i in 0..WINDOW_DAYS {
        let date = last_date - Duration::days((WINDOW_DAYS - 1 - i) as i64);
        calendar
            .increment(date, i as u64)
            .expect("ramp date is inside the window");
    }
    calendar
}

/// A calendar with activity on weekdays only, `weight` per working day.
pub fn workweek_calendar(last_date: NaiveDate, weight: u64) -> Calendar {
    use chrono::Datelike;

    let mut calendar = Calendar::new(last_date);
    let dates: Vec<NaiveDate> = calendar.iter().map(|r| r.date).collect();
    for date in dates {
        if date.weekday().number_from_monday() <= 5 {
            calendar
                .increment(date, weight)
                .expect("calendar date is inside its own window");
        }
    }
    calendar
}

/// `count` events with random weights `1..=max_weight`, scattered over the
/// window ending at `last_date` plus some days on either side of it.
///
/// The stream is reproducible for a given `seed`.
pub fn scattered_events(
    last_date: NaiveDate,
    count: usize,
    max_weight: u32,
    seed: u64,
) -> Vec<ContributionEvent> {
    let mut rng = StdRng::seed_from_u64(seed);
    let span = WINDOW_DAYS as i64 + 60;
    (0..count)
        .map(|_| {
            let back = rng.gen_range(-30..span - 30);
            let minutes = rng.gen_range(0..24 * 60);
            let timestamp = noon(last_date - Duration::days(back))
                - Duration::hours(12)
                + Duration::minutes(minutes);
            ContributionEvent::new(timestamp, rng.gen_range(1..=max_weight.max(1)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last() -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 4, 22).unwrap()
    }

    #[test]
    fn test_ramp_calendar() {
        let calendar = ramp_calendar(last());
        assert_eq!(calendar.get(0).unwrap().count, 0);
        assert_eq!(calendar.get(363).unwrap().count, 363);
        assert_eq!(calendar.total(), 363 * 364 / 2);
    }

    #[test]
    fn test_workweek_calendar() {
        let calendar = workweek_calendar(last(), 2);
        assert_eq!(calendar.total(), 52 * 5 * 2);
    }

    #[test]
    fn test_scattered_events_are_reproducible() {
        let a = scattered_events(last(), 100, 5, 7);
        let b = scattered_events(last(), 100, 5, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|e| (1..=5).contains(&e.weight)));
    }
}
