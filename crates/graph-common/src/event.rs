//! Dated contribution events and the sources producing them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GraphResult;

/// A single weighted activity event (commit, opened issue, review, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

impl ContributionEvent {
    pub fn new(timestamp: DateTime<Utc>, weight: u32) -> Self {
        Self { timestamp, weight }
    }

    /// Single contribution at the given instant.
    pub fn single(timestamp: DateTime<Utc>) -> Self {
        Self::new(timestamp, 1)
    }

    /// Calendar day (UTC) the event is counted on.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

/// Anything that yields contribution events for aggregation.
///
/// Sources never filter by date; the calendar drops events outside its
/// window.
pub trait EventSource {
    /// Human readable identifier used in logs.
    fn name(&self) -> String;

    /// All events of this source.
    fn events(&self) -> GraphResult<Vec<ContributionEvent>>;
}

/// In-memory source, mostly useful in tests and for already collected data.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    name: String,
    events: Vec<ContributionEvent>,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, events: Vec<ContributionEvent>) -> Self {
        Self {
            name: name.into(),
            events,
        }
    }
}

impl EventSource for StaticSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn events(&self) -> GraphResult<Vec<ContributionEvent>> {
        Ok(self.events.clone())
    }
}
