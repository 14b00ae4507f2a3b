//! Error types for heatmap rendering.

use std::sync::Arc;

use chrono::{NaiveDate, Weekday};
use thiserror::Error;

/// Result type alias using RenderError.
pub type RenderResult<T> = Result<T, RenderError>;

/// Failure of a single render. Every variant aborts the render.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The calendar could not be split into week slices. Unreachable for a
    /// well-formed calendar; indicates a bug rather than bad input.
    #[error("Internal consistency violation: {0}")]
    Defect(#[from] PartitionDefect),

    #[error("Failed to encode markup: {0}")]
    Encoding(quick_xml::Error),

    /// The output sink rejected a write.
    #[error("Failed to write markup: {0}")]
    Io(Arc<std::io::Error>),
}

impl From<quick_xml::Error> for RenderError {
    fn from(err: quick_xml::Error) -> Self {
        match err {
            quick_xml::Error::Io(io) => RenderError::Io(io),
            other => RenderError::Encoding(other),
        }
    }
}

impl RenderError {
    pub fn is_defect(&self) -> bool {
        matches!(self, RenderError::Defect(_))
    }
}

/// Week slice invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionDefect {
    #[error("Reference date {0} of week slice is not a Sunday")]
    ReferenceNotSunday(NaiveDate),

    #[error("Week slice spans {first:?}..={last:?}; first must be Sun or last must be Sat")]
    MalformedRange { first: Weekday, last: Weekday },

    #[error("Week slice {index} needs {expected} records but got {actual}")]
    RecordCountMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("{0} calendar records were not assigned to any week slice")]
    UnconsumedRecords(usize),
}
