//! Tooltip placement.
//!
//! The anchor of a tooltip is chosen from the hovered cell's position so the
//! box always stays inside the fixed canvas: cells near the left edge get a
//! box extending right, cells near the right edge a box extending left, and
//! the top three weekday rows show the box below the cell.

use chrono::Weekday;

use crate::svg::Point;

/// Half-width of the triangular tip.
pub const TIP_SIZE: i32 = 5;

/// Distance between the cell center and the tip apex.
pub const TIP_OFFSET: i32 = 10;

pub const BOX_WIDTH: i32 = 230;
pub const BOX_HEIGHT: i32 = 30;
pub const BOX_RADIUS: i32 = 4;

/// Slices with a lower index anchor their tooltip on the left.
const LEFT_ANCHOR_BELOW: usize = 10;

/// Slices with a higher index anchor their tooltip on the right.
const RIGHT_ANCHOR_ABOVE: usize = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAnchor {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAnchor {
    /// Box above the cell.
    Top,
    /// Box below the cell.
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TooltipAnchor {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
}

impl TooltipAnchor {
    /// Anchor for the cell of `weekday` in the slice at `slice_index`.
    pub fn for_cell(slice_index: usize, weekday: Weekday) -> Self {
        let horizontal = if slice_index < LEFT_ANCHOR_BELOW {
            HorizontalAnchor::Left
        } else if slice_index > RIGHT_ANCHOR_ABOVE {
            HorizontalAnchor::Right
        } else {
            HorizontalAnchor::Center
        };

        // Sunday, Monday and Tuesday rows are too close to the top edge.
        let vertical = if weekday.num_days_from_sunday() <= 2 {
            VerticalAnchor::Bottom
        } else {
            VerticalAnchor::Top
        };

        Self {
            horizontal,
            vertical,
        }
    }

    /// Top-left corner of the tooltip box for a tip pointing at `location`.
    pub fn box_origin(&self, location: Point) -> Point {
        let dx = match self.horizontal {
            HorizontalAnchor::Left => -4 * TIP_SIZE,
            HorizontalAnchor::Center => -BOX_WIDTH / 2,
            HorizontalAnchor::Right => -BOX_WIDTH + 4 * TIP_SIZE,
        };
        let dy = match self.vertical {
            VerticalAnchor::Top => -(TIP_SIZE + BOX_HEIGHT + TIP_OFFSET),
            VerticalAnchor::Bottom => TIP_SIZE + TIP_OFFSET,
        };
        location + Point::new(dx, dy)
    }

    /// `points` attribute of the triangle joining the box to `location`.
    pub fn tip_points(&self, location: Point) -> String {
        let (m, offset) = match self.vertical {
            VerticalAnchor::Top => (TIP_SIZE, TIP_OFFSET),
            VerticalAnchor::Bottom => (-TIP_SIZE, -TIP_OFFSET),
        };
        format!(
            "{},{} {},{} {},{}",
            location.x - TIP_SIZE,
            location.y - m - offset,
            location.x + TIP_SIZE,
            location.y - m - offset,
            location.x,
            location.y - offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_thresholds() {
        let h = |i| TooltipAnchor::for_cell(i, Weekday::Wed).horizontal;
        assert_eq!(h(0), HorizontalAnchor::Left);
        assert_eq!(h(9), HorizontalAnchor::Left);
        assert_eq!(h(10), HorizontalAnchor::Center);
        assert_eq!(h(42), HorizontalAnchor::Center);
        assert_eq!(h(43), HorizontalAnchor::Right);
        assert_eq!(h(52), HorizontalAnchor::Right);
    }

    #[test]
    fn test_vertical_by_weekday() {
        let v = |d| TooltipAnchor::for_cell(20, d).vertical;
        assert_eq!(v(Weekday::Sun), VerticalAnchor::Bottom);
        assert_eq!(v(Weekday::Mon), VerticalAnchor::Bottom);
        assert_eq!(v(Weekday::Tue), VerticalAnchor::Bottom);
        assert_eq!(v(Weekday::Wed), VerticalAnchor::Top);
        assert_eq!(v(Weekday::Sat), VerticalAnchor::Top);
    }

    #[test]
    fn test_box_origin() {
        let at = Point::new(5, 41);
        let anchor = TooltipAnchor {
            horizontal: HorizontalAnchor::Center,
            vertical: VerticalAnchor::Top,
        };
        assert_eq!(anchor.box_origin(at), Point::new(-110, -4));

        let anchor = TooltipAnchor {
            horizontal: HorizontalAnchor::Right,
            vertical: VerticalAnchor::Bottom,
        };
        assert_eq!(anchor.box_origin(at), Point::new(-205, 56));
    }

    #[test]
    fn test_tip_points() {
        let top = TooltipAnchor::for_cell(0, Weekday::Fri);
        assert_eq!(top.tip_points(Point::new(5, 65)), "0,50 10,50 5,55");

        let bottom = TooltipAnchor::for_cell(0, Weekday::Sun);
        assert_eq!(bottom.tip_points(Point::new(5, 5)), "0,20 10,20 5,15");
    }
}
