//! Error types shared by the contribution graph crates.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using GraphError.
pub type GraphResult<T> = Result<T, GraphError>;

/// Primary error type for calendar aggregation and configuration.
#[derive(Debug, Error)]
pub enum GraphError {
    // === Input Range Errors ===
    #[error("Date {date} is outside the calendar window {first}..={last}")]
    DateOutOfRange {
        date: NaiveDate,
        first: NaiveDate,
        last: NaiveDate,
    },

    // === Configuration Errors ===
    #[error("Invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    #[error("Color levels must be within {min}..={max}, got {value}")]
    InvalidLevels { value: u32, min: u32, max: u32 },

    #[error("Invalid time specification: {0}")]
    InvalidTime(String),

    // === Event Source Errors ===
    #[error("Invalid event in {source_name}: {message}")]
    InvalidEvent { source_name: String, message: String },

    #[error("Event source failed: {0}")]
    SourceError(String),
}

impl GraphError {
    /// True for per-event errors that aggregation skips instead of failing.
    pub fn is_input_range(&self) -> bool {
        matches!(self, GraphError::DateOutOfRange { .. })
    }

    /// True for errors that must stop a run before any aggregation starts.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GraphError::InvalidColor(_)
                | GraphError::InvalidLevels { .. }
                | GraphError::InvalidTime(_)
        )
    }
}

impl From<std::io::Error> for GraphError {
    fn from(err: std::io::Error) -> Self {
        GraphError::SourceError(err.to_string())
    }
}

impl From<serde_json::Error> for GraphError {
    fn from(err: serde_json::Error) -> Self {
        GraphError::SourceError(format!("JSON error: {}", err))
    }
}
