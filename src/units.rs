#[cfg(test)]
#[path = "units_test.rs"]
mod units_test;

use crate::consts::{FIT_MARGIN_PX, MIN_SCALE};

/// A point in either board space (mm) or screen space (px).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Convert a board-space length (mm) to screen pixels at the given scale.
#[must_use]
pub fn mm_to_px(mm: f64, scale: f64) -> f64 {
    mm * scale
}

/// Convert a screen-space length (pixels) to millimeters at the given scale.
///
/// A zero scale divides by zero and propagates an infinity or NaN; callers
/// that need a finite result must guard the scale themselves.
#[must_use]
pub fn px_to_mm(px: f64, scale: f64) -> f64 {
    px / scale
}

/// Convert a screen-space point to board coordinates (mm).
#[must_use]
pub fn point_to_mm(screen: Point, scale: f64) -> Point {
    Point {
        x: px_to_mm(screen.x, scale),
        y: px_to_mm(screen.y, scale),
    }
}

/// Convert a board-space point (mm) to screen coordinates.
#[must_use]
pub fn point_to_px(board: Point, scale: f64) -> Point {
    Point {
        x: mm_to_px(board.x, scale),
        y: mm_to_px(board.y, scale),
    }
}

/// Scale (px per mm) that fits a board of `board_width_mm` into a container
/// `container_width_px` wide, leaving [`FIT_MARGIN_PX`] for padding.
///
/// The result is clamped between [`MIN_SCALE`] and `max_scale` no matter the
/// inputs, so a degenerate board width still yields a usable scale.
#[must_use]
pub fn fit_scale(container_width_px: f64, board_width_mm: f64, max_scale: f64) -> f64 {
    let raw = (container_width_px - FIT_MARGIN_PX) / board_width_mm;
    raw.min(max_scale).max(MIN_SCALE)
}
