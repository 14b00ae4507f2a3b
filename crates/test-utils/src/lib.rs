//! Shared test utilities for the contribution-graph workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Well-known calendar end dates (weekday and leap year edge cases)
//! - Synthetic event and calendar generators
//! - Temporary event files for source tests
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, ramp_calendar};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
