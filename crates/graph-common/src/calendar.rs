//! Fixed-size, date-indexed activity calendar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::event::{ContributionEvent, EventSource};
use crate::time::{days_between, shift_days};

/// Days covered by a calendar: 52 weeks.
pub const WINDOW_DAYS: usize = 52 * 7;

/// Activity of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub count: u64,
}

impl DayRecord {
    pub fn empty(date: NaiveDate) -> Self {
        Self { date, count: 0 }
    }
}

/// Outcome of feeding a batch of events into a calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateSummary {
    /// Events counted into a bucket.
    pub accepted: usize,
    /// Events skipped because they fall outside the window.
    pub dropped: usize,
}

impl AggregateSummary {
    pub fn merge(self, other: AggregateSummary) -> AggregateSummary {
        AggregateSummary {
            accepted: self.accepted + other.accepted,
            dropped: self.dropped + other.dropped,
        }
    }
}

/// Contiguous, ascending run of day records ending at `last_date`.
///
/// `records[len - 1].date == last_date` and
/// `records[0].date == last_date - (len - 1) days` always hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Calendar {
    records: Vec<DayRecord>,
    last_date: NaiveDate,
}

impl Calendar {
    /// A zeroed 364-day calendar ending at `last_date`.
    pub fn new(last_date: NaiveDate) -> Self {
        Self::with_window(last_date, WINDOW_DAYS)
    }

    /// A zeroed calendar of `window_days` days (at least one) ending at
    /// `last_date`.
    pub fn with_window(last_date: NaiveDate, window_days: usize) -> Self {
        let window = window_days.max(1);
        let records = (0..window)
            .map(|i| DayRecord::empty(shift_days(last_date, -((window - 1 - i) as i64))))
            .collect();
        Self { records, last_date }
    }

    pub fn last_date(&self) -> NaiveDate {
        self.last_date
    }

    pub fn first_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Read-only view of all records, oldest first.
    pub fn records(&self) -> &[DayRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DayRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&DayRecord> {
        self.records.get(index)
    }

    /// Bucket index of `date`, or `None` if it lies outside the window.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        if date > self.last_date {
            return None;
        }
        let last_index = self.records.len() as i64 - 1;
        let index = last_index - days_between(date, self.last_date);
        if (0..=last_index).contains(&index) {
            Some(index as usize)
        } else {
            None
        }
    }

    /// Add `weight` to the bucket of `date` and return the bucket index.
    ///
    /// Dates outside the window leave the calendar untouched and yield
    /// [`GraphError::DateOutOfRange`].
    pub fn increment(&mut self, date: NaiveDate, weight: u64) -> GraphResult<usize> {
        let index = self
            .index_of(date)
            .ok_or_else(|| GraphError::DateOutOfRange {
                date,
                first: self.first_date(),
                last: self.last_date,
            })?;
        let record = &mut self.records[index];
        record.count = record.count.saturating_add(weight);
        Ok(index)
    }

    /// Count a single event on its UTC date.
    pub fn record_event(&mut self, event: &ContributionEvent) -> GraphResult<usize> {
        self.increment(event.date(), u64::from(event.weight))
    }

    /// Count every in-window event, skipping the others.
    pub fn aggregate<I>(&mut self, events: I) -> AggregateSummary
    where
        I: IntoIterator<Item = ContributionEvent>,
    {
        let mut summary = AggregateSummary::default();
        for event in events {
            match self.record_event(&event) {
                Ok(_) => summary.accepted += 1,
                Err(err) => {
                    debug!(timestamp = %event.timestamp, error = %err, "Dropping event");
                    summary.dropped += 1;
                }
            }
        }
        summary
    }

    /// Pull all events from a source and aggregate them.
    pub fn aggregate_source(&mut self, source: &dyn EventSource) -> GraphResult<AggregateSummary> {
        let events = source.events()?;
        let summary = self.aggregate(events);
        debug!(
            source = %source.name(),
            accepted = summary.accepted,
            dropped = summary.dropped,
            "Aggregated event source"
        );
        Ok(summary)
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.records.iter().map(|r| r.count).sum()
    }

    /// Largest single-day count, 0 for an empty calendar.
    pub fn max_count(&self) -> u64 {
        self.records.iter().map(|r| r.count).max().unwrap_or(0)
    }
}

impl<'a> IntoIterator for &'a Calendar {
    type Item = &'a DayRecord;
    type IntoIter = std::slice::Iter<'a, DayRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_is_zeroed() {
        let calendar = Calendar::new(date(2022, 12, 30));
        assert_eq!(calendar.len(), WINDOW_DAYS);
        assert_eq!(calendar.total(), 0);
        assert_eq!(calendar.max_count(), 0);
    }

    #[test]
    fn test_custom_window() {
        let calendar = Calendar::with_window(date(2023, 1, 10), 10);
        assert_eq!(calendar.len(), 10);
        assert_eq!(calendar.first_date(), date(2023, 1, 1));
        assert_eq!(calendar.index_of(date(2023, 1, 10)), Some(9));
        assert_eq!(calendar.index_of(date(2022, 12, 31)), None);
    }

    #[test]
    fn test_increment_out_of_range_is_noop() {
        let mut calendar = Calendar::new(date(2023, 1, 10));
        let err = calendar.increment(date(2023, 1, 11), 3).unwrap_err();
        assert!(err.is_input_range());
        assert_eq!(calendar.total(), 0);
    }

    #[test]
    fn test_summary_merge() {
        let a = AggregateSummary { accepted: 2, dropped: 1 };
        let b = AggregateSummary { accepted: 3, dropped: 0 };
        assert_eq!(a.merge(b), AggregateSummary { accepted: 5, dropped: 1 });
    }
}
