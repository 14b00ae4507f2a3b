//! Heatmap rendering of a contribution calendar.
//!
//! A render runs in a fixed order: stylesheet, weekday axis, the cell
//! matrix, the overall count label and the legend. The matrix itself is
//! drawn in two passes over the week slices. The first pass draws the
//! colored cells and month labels. The second draws a transparent overlay
//! per cell followed by its tooltip, so every tooltip is painted above all
//! cells and directly follows the overlay whose hover reveals it.

use std::io::Write;

use chrono::{Datelike, NaiveDate, Weekday};
use graph_common::time::{month_label, tooltip_date};
use graph_common::{Calendar, DayRecord};
use tracing::{debug, info};

use crate::error::RenderResult;
use crate::quantize::Quantizer;
use crate::style::{classes, Stylesheet};
use crate::svg::{rounded_rect, Element, Point, SvgWriter, TextAnchor, SVG_NAMESPACE};
use crate::tooltip::{TooltipAnchor, BOX_HEIGHT, BOX_RADIUS, BOX_WIDTH};
use crate::weeks::{partition, WeekSlice};

pub const CANVAS_WIDTH: i32 = 700;
pub const CANVAS_HEIGHT: i32 = 150;

/// Distance between neighbouring cells, both horizontally and vertically.
pub const CELL_PITCH: i32 = 12;

const MATRIX_ORIGIN: Point = Point::new(50, 10);
const DAY_ROWS_OFFSET: Point = Point::new(0, 20);
const MONTH_LABEL_Y: i32 = 10;
const MONTH_LABEL_END_DX: i32 = 10;

const AXIS_X: i32 = 40;
const AXIS_LABELS: [(&str, i32); 3] = [("Mon", 51), ("Wed", 75), ("Fri", 99)];

const OVERALL_ORIGIN: Point = Point::new(65, 125);
const LEGEND_ORIGIN: Point = Point::new(565, 125);
const LEGEND_SWATCH_DX: i32 = 29;

/// Offset from a label's top edge to its baseline.
const BASELINE: i32 = 9;

const NBSP: char = '\u{a0}';

/// Figures of a completed render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderSummary {
    pub slices: usize,
    pub total: u64,
    pub max_count: u64,
}

/// Renders calendars into SVG documents for a fixed color configuration.
#[derive(Debug, Clone)]
pub struct HeatmapRenderer {
    quantizer: Quantizer,
    stylesheet: String,
}

impl HeatmapRenderer {
    pub fn new(quantizer: Quantizer) -> Self {
        let stylesheet = Stylesheet::new(&quantizer).to_string();
        Self {
            quantizer,
            stylesheet,
        }
    }

    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    /// Render `calendar` as a complete SVG document into `out`.
    ///
    /// The calendar is partitioned before anything is written, so a
    /// partition defect leaves `out` untouched. Sink failures abort the
    /// render at the failing element.
    pub fn render<W: Write>(
        &self,
        calendar: &Calendar,
        out: &mut SvgWriter<W>,
    ) -> RenderResult<RenderSummary> {
        let slices = partition(calendar)?;
        let summary = RenderSummary {
            slices: slices.len(),
            total: calendar.total(),
            max_count: calendar.max_count(),
        };
        debug!(
            last_date = %calendar.last_date(),
            slices = summary.slices,
            "Partitioned calendar"
        );

        let root = Element::new("svg")
            .attr("xmlns", SVG_NAMESPACE)
            .class(&[classes::ROOT, classes::VARIABLES])
            .attr("width", CANVAS_WIDTH)
            .attr("height", CANVAS_HEIGHT);

        out.non_empty(root, |w| {
            w.style(&self.stylesheet)?;
            self.render_weekday_axis(w)?;
            self.render_matrix(w, calendar.last_date(), &slices, summary.max_count)?;
            self.render_overall(w, summary.total)?;
            self.render_legend(w)
        })?;

        info!(
            slices = summary.slices,
            total = summary.total,
            max_count = summary.max_count,
            "Rendered contribution graph"
        );
        Ok(summary)
    }

    /// Render into a fresh buffer, compact or indented by two spaces.
    pub fn render_to_vec(
        &self,
        calendar: &Calendar,
        indent: bool,
    ) -> RenderResult<(Vec<u8>, RenderSummary)> {
        let mut writer = if indent {
            SvgWriter::new_indented(Vec::new())
        } else {
            SvgWriter::new(Vec::new())
        };
        let summary = self.render(calendar, &mut writer)?;
        Ok((writer.into_inner(), summary))
    }

    fn render_weekday_axis<W: Write>(&self, w: &mut SvgWriter<W>) -> RenderResult<()> {
        for (label, y) in AXIS_LABELS {
            w.simple_text(
                Point::new(AXIS_X, y),
                TextAnchor::End,
                &[classes::FOREGROUND],
                label,
            )?;
        }
        Ok(())
    }

    fn render_matrix<W: Write>(
        &self,
        w: &mut SvgWriter<W>,
        last_date: NaiveDate,
        slices: &[WeekSlice<'_>],
        max_count: u64,
    ) -> RenderResult<()> {
        let origin = matrix_origin(last_date);
        let last_index = slices.len().saturating_sub(1);

        w.translated(origin, |w| {
            for slice in slices {
                w.translated(column_offset(slice), |w| {
                    self.render_cells(w, slice, last_index, max_count)
                })?;
            }
            for slice in slices {
                w.translated(column_offset(slice), |w| self.render_overlays(w, slice))?;
            }
            Ok(())
        })
    }

    fn render_cells<W: Write>(
        &self,
        w: &mut SvgWriter<W>,
        slice: &WeekSlice<'_>,
        last_index: usize,
        max_count: u64,
    ) -> RenderResult<()> {
        if slice.is_first_week_of_month() {
            let (anchor, dx) = if slice.index() == last_index {
                (TextAnchor::End, MONTH_LABEL_END_DX)
            } else {
                (TextAnchor::Start, 0)
            };
            w.simple_text(
                Point::new(dx, MONTH_LABEL_Y),
                anchor,
                &[classes::FOREGROUND],
                &month_label(slice.reference_date()),
            )?;
        }

        w.translated(DAY_ROWS_OFFSET, |w| {
            for record in slice.records() {
                let level = self.quantizer.level_for_count(record.count, max_count);
                let fill = self.quantizer.color_for_level(level, false);
                let level_class = classes::level_background(level);
                w.empty(
                    rounded_rect(cell_location(record))
                        .attr("fill", fill)
                        .class(&[classes::CELL, level_class.as_str()]),
                )?;
            }
            Ok(())
        })
    }

    fn render_overlays<W: Write>(
        &self,
        w: &mut SvgWriter<W>,
        slice: &WeekSlice<'_>,
    ) -> RenderResult<()> {
        w.translated(DAY_ROWS_OFFSET, |w| {
            for record in slice.records() {
                let location = cell_location(record);
                w.empty(
                    rounded_rect(location)
                        .attr("fill-opacity", "0.0")
                        .class(&[classes::OVERLAY]),
                )?;
                let anchor = TooltipAnchor::for_cell(slice.index(), record.date.weekday());
                self.render_tooltip(w, tooltip_location(record), anchor, record)?;
            }
            Ok(())
        })
    }

    fn render_tooltip<W: Write>(
        &self,
        w: &mut SvgWriter<W>,
        location: Point,
        anchor: TooltipAnchor,
        record: &DayRecord,
    ) -> RenderResult<()> {
        let group = Element::new("g").class(&[classes::TOOLTIP]);
        w.non_empty(group, |w| {
            let origin = anchor.box_origin(location);
            w.empty(
                Element::new("rect")
                    .attr("x", origin.x)
                    .attr("y", origin.y)
                    .attr("width", BOX_WIDTH)
                    .attr("height", BOX_HEIGHT)
                    .attr("rx", BOX_RADIUS),
            )?;
            w.empty(Element::new("polygon").attr("points", anchor.tip_points(location)))?;

            let center = origin + Point::new(BOX_WIDTH / 2, BOX_HEIGHT / 2 + 4);
            w.text(center, TextAnchor::Middle, &[], |w| {
                w.emphasized(
                    &format!("{} contributions{NBSP}", record.count),
                    &format!("on {}", tooltip_date(record.date)),
                )
            })
        })
    }

    fn render_overall<W: Write>(&self, w: &mut SvgWriter<W>, total: u64) -> RenderResult<()> {
        w.text(
            OVERALL_ORIGIN + Point::new(0, BASELINE),
            TextAnchor::Start,
            &[classes::FOREGROUND],
            |w| w.emphasized(&format!("{total} contributions{NBSP}"), "in the last year"),
        )
    }

    fn render_legend<W: Write>(&self, w: &mut SvgWriter<W>) -> RenderResult<()> {
        w.simple_text(
            LEGEND_ORIGIN + Point::new(0, BASELINE),
            TextAnchor::Start,
            &[classes::FOREGROUND],
            "Less",
        )?;

        let levels = self.quantizer.legend_levels();
        let intensities = Quantizer::legend_intensities();
        let mut x = LEGEND_ORIGIN.x + LEGEND_SWATCH_DX;
        for (level, intensity) in levels.into_iter().zip(intensities) {
            let fill = self.quantizer.color_for_intensity(intensity, false);
            let level_class = classes::level_background(level);
            w.empty(
                rounded_rect(Point::new(x, LEGEND_ORIGIN.y))
                    .attr("fill", fill)
                    .class(&[classes::CELL, level_class.as_str()]),
            )?;
            x += CELL_PITCH;
        }

        w.simple_text(
            Point::new(x + 1, LEGEND_ORIGIN.y + BASELINE),
            TextAnchor::Start,
            &[classes::FOREGROUND],
            "More",
        )
    }
}

/// Origin of the cell matrix.
///
/// A window ending on Saturday has no trailing partial column, so the grid
/// moves one column right to stay flush with the right edge.
fn matrix_origin(last_date: NaiveDate) -> Point {
    if last_date.weekday() == Weekday::Sat {
        MATRIX_ORIGIN + Point::new(CELL_PITCH, 0)
    } else {
        MATRIX_ORIGIN
    }
}

fn column_offset(slice: &WeekSlice<'_>) -> Point {
    Point::new(CELL_PITCH * slice.index() as i32, 0)
}

fn cell_location(record: &DayRecord) -> Point {
    Point::new(0, record.date.weekday().num_days_from_sunday() as i32 * CELL_PITCH)
}

/// Tip apex of a cell's tooltip: the cell center.
fn tooltip_location(record: &DayRecord) -> Point {
    cell_location(record) + Point::new(5, 5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantize::{ColorScheme, Levels};
    use graph_common::Rgb;

    fn renderer() -> HeatmapRenderer {
        HeatmapRenderer::new(Quantizer::new(
            Levels::default(),
            ColorScheme::from_primary(Rgb::new(0x21, 0x6e, 0x39)),
        ))
    }

    #[test]
    fn test_cell_location_by_weekday() {
        let sunday = DayRecord::empty(NaiveDate::from_ymd_opt(2023, 4, 16).unwrap());
        let saturday = DayRecord::empty(NaiveDate::from_ymd_opt(2023, 4, 22).unwrap());
        assert_eq!(cell_location(&sunday), Point::new(0, 0));
        assert_eq!(cell_location(&saturday), Point::new(0, 72));
    }

    #[test]
    fn test_tooltip_boxes_stay_inside_canvas() {
        for last_date in test_utils::one_of_each_weekday() {
            let calendar = Calendar::new(last_date);
            let slices = partition(&calendar).unwrap();
            let origin = matrix_origin(last_date);

            for slice in &slices {
                for record in slice.records() {
                    let tip = origin
                        + column_offset(slice)
                        + DAY_ROWS_OFFSET
                        + tooltip_location(record);
                    let anchor = TooltipAnchor::for_cell(slice.index(), record.date.weekday());
                    let corner = anchor.box_origin(tip);

                    assert!(
                        corner.x >= 0 && corner.x + BOX_WIDTH <= CANVAS_WIDTH,
                        "{} (slice {}): box x {}..{}",
                        record.date,
                        slice.index(),
                        corner.x,
                        corner.x + BOX_WIDTH
                    );
                    assert!(
                        corner.y >= 0 && corner.y + BOX_HEIGHT <= CANVAS_HEIGHT,
                        "{} (slice {}): box y {}..{}",
                        record.date,
                        slice.index(),
                        corner.y,
                        corner.y + BOX_HEIGHT
                    );
                }
            }
        }
    }

    #[test]
    fn test_saturday_window_shifts_matrix() {
        let saturday = NaiveDate::from_ymd_opt(2023, 4, 22).unwrap();
        let sunday = NaiveDate::from_ymd_opt(2023, 4, 23).unwrap();
        assert_eq!(matrix_origin(saturday), Point::new(62, 10));
        assert_eq!(matrix_origin(sunday), MATRIX_ORIGIN);
    }

    #[test]
    fn test_partition_failure_writes_nothing() {
        let calendar = Calendar::with_window(NaiveDate::from_ymd_opt(2023, 4, 22).unwrap(), 10);
        let mut writer = SvgWriter::new(Vec::new());
        let err = renderer().render(&calendar, &mut writer).unwrap_err();
        assert!(err.is_defect());
        assert!(writer.into_inner().is_empty());
    }

    #[test]
    fn test_legend_end_label_position() {
        let calendar = Calendar::new(NaiveDate::from_ymd_opt(2023, 4, 22).unwrap());
        let (bytes, _) = renderer().render_to_vec(&calendar, false).unwrap();
        let svg = String::from_utf8(bytes).unwrap();
        assert!(svg.contains(r#"<text x="655" y="134""#));
        assert!(svg.contains(r#"<text x="565" y="134""#));
    }
}
