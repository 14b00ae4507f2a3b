//! Partitioning of a calendar into Sunday..Saturday week columns.

use chrono::{Datelike, NaiveDate, Weekday};
use graph_common::time::{is_first_week_of_month, next_weekday, previous_sunday, shift_days};
use graph_common::{Calendar, DayRecord};

use crate::error::PartitionDefect;

/// Columns in the general case: 51 full weeks and two partial ones.
pub const DEFAULT_SLICE_COUNT: usize = 53;

/// Columns when the window ends on a Saturday: 52 full weeks.
pub const ALIGNED_SLICE_COUNT: usize = 52;

/// Number of week columns needed for a window ending at `last_date`.
pub fn slice_count(last_date: NaiveDate) -> usize {
    if last_date.weekday() == Weekday::Sat {
        ALIGNED_SLICE_COUNT
    } else {
        DEFAULT_SLICE_COUNT
    }
}

/// One (possibly partial) calendar week, borrowed from the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekSlice<'a> {
    reference_date: NaiveDate,
    first: Weekday,
    last: Weekday,
    records: &'a [DayRecord],
    index: usize,
}

impl<'a> WeekSlice<'a> {
    /// Creates a week slice, checking that `reference_date` is a Sunday,
    /// that the slice is only partial on one side and that `records` holds
    /// exactly one record per day of `first..=last`.
    pub fn new(
        reference_date: NaiveDate,
        first: Weekday,
        last: Weekday,
        records: &'a [DayRecord],
        index: usize,
    ) -> Result<Self, PartitionDefect> {
        if reference_date.weekday() != Weekday::Sun {
            return Err(PartitionDefect::ReferenceNotSunday(reference_date));
        }
        if first != Weekday::Sun && last != Weekday::Sat {
            return Err(PartitionDefect::MalformedRange { first, last });
        }
        let expected = span(first, last);
        if records.len() != expected {
            return Err(PartitionDefect::RecordCountMismatch {
                index,
                expected,
                actual: records.len(),
            });
        }
        Ok(Self {
            reference_date,
            first,
            last,
            records,
            index,
        })
    }

    /// The Sunday anchoring this week.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    pub fn first(&self) -> Weekday {
        self.first
    }

    pub fn last(&self) -> Weekday {
        self.last
    }

    pub fn records(&self) -> &'a [DayRecord] {
        self.records
    }

    /// Column position among all slices of the render.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_partial(&self) -> bool {
        self.records.len() < 7
    }

    /// True when the anchoring Sunday is one of the first seven days of its
    /// month, which is where month labels go.
    pub fn is_first_week_of_month(&self) -> bool {
        is_first_week_of_month(self.reference_date)
    }
}

/// Days in `first..=last`; 0 for an inverted range.
fn span(first: Weekday, last: Weekday) -> usize {
    let first = first.num_days_from_sunday() as i64;
    let last = last.num_days_from_sunday() as i64;
    (last - first + 1).max(0) as usize
}

/// Split the calendar into week slices, oldest first.
///
/// The first slice starts on the weekday after `last_date`'s weekday and the
/// last slice ends on `last_date`'s weekday. Every record is consumed exactly
/// once and in order; anything else is reported as a defect.
pub fn partition(calendar: &Calendar) -> Result<Vec<WeekSlice<'_>>, PartitionDefect> {
    let last_date = calendar.last_date();
    let count = slice_count(last_date);

    let mut slices = Vec::with_capacity(count);
    let mut remaining = calendar.records();

    for i in 0..count {
        let mut first = Weekday::Sun;
        let mut last = Weekday::Sat;
        if i == 0 {
            first = next_weekday(last_date.weekday());
        }
        if i == count - 1 {
            last = last_date.weekday();
        }

        let wanted = span(first, last);
        if remaining.len() < wanted {
            return Err(PartitionDefect::RecordCountMismatch {
                index: i,
                expected: wanted,
                actual: remaining.len(),
            });
        }
        let (taken, rest) = remaining.split_at(wanted);
        remaining = rest;

        let weeks_back = (count - i - 1) as i64;
        let reference_date = previous_sunday(shift_days(last_date, -7 * weeks_back));
        slices.push(WeekSlice::new(reference_date, first, last, taken, i)?);
    }

    if !remaining.is_empty() {
        return Err(PartitionDefect::UnconsumedRecords(remaining.len()));
    }

    Ok(slices)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_span() {
        assert_eq!(span(Weekday::Sun, Weekday::Sat), 7);
        assert_eq!(span(Weekday::Tue, Weekday::Sat), 5);
        assert_eq!(span(Weekday::Sun, Weekday::Sun), 1);
        assert_eq!(span(Weekday::Sat, Weekday::Sun), 0);
    }

    #[test]
    fn test_new_rejects_non_sunday_reference() {
        let records = [DayRecord::empty(date(2023, 1, 2)); 7];
        let err = WeekSlice::new(date(2023, 1, 2), Weekday::Sun, Weekday::Sat, &records, 0)
            .unwrap_err();
        assert_eq!(err, PartitionDefect::ReferenceNotSunday(date(2023, 1, 2)));
    }

    #[test]
    fn test_new_rejects_two_sided_partial_week() {
        let records = [DayRecord::empty(date(2023, 1, 2)); 3];
        let err = WeekSlice::new(date(2023, 1, 1), Weekday::Mon, Weekday::Wed, &records, 0)
            .unwrap_err();
        assert!(matches!(err, PartitionDefect::MalformedRange { .. }));
    }

    #[test]
    fn test_new_rejects_wrong_record_count() {
        let records = [DayRecord::empty(date(2023, 1, 1)); 6];
        let err = WeekSlice::new(date(2023, 1, 1), Weekday::Sun, Weekday::Sat, &records, 3)
            .unwrap_err();
        assert_eq!(
            err,
            PartitionDefect::RecordCountMismatch {
                index: 3,
                expected: 7,
                actual: 6
            }
        );
    }

    #[test]
    fn test_partition_rejects_short_calendar() {
        let calendar = Calendar::with_window(date(2023, 4, 22), 30);
        assert!(partition(&calendar).is_err());
    }
}
