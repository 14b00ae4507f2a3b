//! Common types and utilities shared by the contribution graph crates.

pub mod calendar;
pub mod color;
pub mod error;
pub mod event;
pub mod time;

pub use calendar::{AggregateSummary, Calendar, DayRecord, WINDOW_DAYS};
pub use color::Rgb;
pub use error::{GraphError, GraphResult};
pub use event::{ContributionEvent, EventSource, StaticSource};
