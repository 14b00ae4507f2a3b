//! SVG heatmap rendering for contribution calendars.
//!
//! Implements the stages between an aggregated calendar and the finished
//! document:
//! - Color quantization (counts to levels to colors)
//! - Week partitioning (calendar to Sunday..Saturday columns)
//! - Tooltip placement
//! - Stylesheet generation and SVG composition

pub mod error;
pub mod heatmap;
pub mod quantize;
pub mod style;
pub mod svg;
pub mod tooltip;
pub mod weeks;

pub use error::{PartitionDefect, RenderError, RenderResult};
pub use heatmap::{HeatmapRenderer, RenderSummary, CANVAS_HEIGHT, CANVAS_WIDTH};
pub use quantize::{ColorScheme, ColorSpectrum, Levels, Quantizer};
pub use svg::SvgWriter;
pub use tooltip::{HorizontalAnchor, TooltipAnchor, VerticalAnchor};
pub use weeks::{partition, slice_count, WeekSlice};
