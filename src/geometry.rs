//! Pure placement geometry for the board: grid snapping, bounds and overlap
//! checks, free-slot search, clamping and centering.
//!
//! Every function here is a total function over plain numbers with no engine
//! state attached. Degenerate inputs follow IEEE 754 through rather than
//! erroring: a zero grid pitch makes [`snap_to_grid`] return NaN, a zero
//! scale upstream produces NaN coordinates that simply fail every bounds
//! check. Validation belongs to callers.
//!
//! All coordinates are millimeters in board space, a y-down plane anchored at
//! the board's top-left corner.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::doc::Rotation;
use crate::units::Point;

/// A width/height pair in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The footprint one placement occupies, as seen by overlap checks.
///
/// Dimensions are the unrotated enclosure size; `rotation` is applied when
/// the footprint is compared, the stored numbers never change.
#[derive(Debug, Clone, Copy)]
pub struct Footprint {
    /// Left edge of the unrotated box in board mm.
    pub x: f64,
    /// Top edge of the unrotated box in board mm.
    pub y: f64,
    /// Enclosure width in mm, unrotated.
    pub width_mm: f64,
    /// Enclosure height in mm, unrotated.
    pub height_mm: f64,
    /// Rotation applied when computing the occupied rectangle.
    pub rotation: Rotation,
}

/// Result of a bounds-checked snap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub x: f64,
    pub y: f64,
    /// False when the snapped position would leave the board; `x`/`y` then
    /// hold the caller's original coordinates, untouched.
    pub snapped: bool,
}

/// Width and height actually occupied on the board after rotation.
///
/// Sideways rotations swap the axes; the stored dimensions are never
/// modified.
#[must_use]
pub fn effective_size(width: f64, height: f64, rotation: Rotation) -> Size {
    if rotation.swaps_axes() {
        Size::new(height, width)
    } else {
        Size::new(width, height)
    }
}

/// Quantize a coordinate to the nearest multiple of `grid`.
///
/// Ties round away from zero, so `snap_to_grid(2.5, 5.0)` is `5.0` and
/// `snap_to_grid(-2.5, 5.0)` is `-5.0`. A zero grid yields NaN; a negative
/// grid is accepted and lands on the same lattice as its magnitude.
#[must_use]
pub fn snap_to_grid(coord: f64, grid: f64) -> f64 {
    (coord / grid).round() * grid
}

/// Whether a rectangle placed at `(x, y)` lies fully inside the board.
///
/// The rectangle's occupied dimensions follow the rotation swap. Edge-flush
/// placement is legal: `x + width == board_width` passes.
#[must_use]
pub fn in_bounds(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    board_width: f64,
    board_height: f64,
    rotation: Rotation,
) -> bool {
    let eff = effective_size(width, height, rotation);
    x >= 0.0 && y >= 0.0 && x + eff.width <= board_width && y + eff.height <= board_height
}

/// Whether a candidate rectangle overlaps any existing footprint.
///
/// Axis-aligned interval arithmetic on both axes; rectangles that merely
/// touch along an edge or corner do not overlap. `exclude` skips one index in
/// `others` so a moving item is not compared against its own record. Every
/// footprint is tested under its own rotation.
#[must_use]
pub fn overlaps_any(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    others: &[Footprint],
    rotation: Rotation,
    exclude: Option<usize>,
) -> bool {
    let eff = effective_size(width, height, rotation);
    for (index, other) in others.iter().enumerate() {
        if exclude == Some(index) {
            continue;
        }
        let other_eff = effective_size(other.width_mm, other.height_mm, other.rotation);
        let separated = x + eff.width <= other.x
            || other.x + other_eff.width <= x
            || y + eff.height <= other.y
            || other.y + other_eff.height <= y;
        if !separated {
            return true;
        }
    }
    false
}

/// Snap a position to the grid, keeping the result only if it stays on the
/// board.
///
/// Both axes snap independently via [`snap_to_grid`], then the snapped
/// position is bounds-checked with the item's dimensions and rotation. An
/// off-board snap returns the input coordinates with `snapped == false` so
/// the caller can fall back to its own correction. Overlap is not checked
/// here.
#[must_use]
pub fn snap_to_grid_checked(
    x: f64,
    y: f64,
    grid: f64,
    item: Size,
    board: Size,
    rotation: Rotation,
) -> SnapResult {
    let snapped_x = snap_to_grid(x, grid);
    let snapped_y = snap_to_grid(y, grid);
    if in_bounds(snapped_x, snapped_y, item.width, item.height, board.width, board.height, rotation)
    {
        SnapResult { x: snapped_x, y: snapped_y, snapped: true }
    } else {
        SnapResult { x, y, snapped: false }
    }
}

/// First grid-aligned position where the item fits without overlapping
/// anything.
///
/// Row-major raster scan: `y` sweeps from 0 to the board height in `grid`
/// steps, and `x` sweeps each row the same way, so the top-most then
/// left-most slot wins. Returns `None` when every lattice point fails, and
/// for a zero, negative or NaN `grid`, where the scan could not terminate.
/// The lattice can step over gaps narrower than `grid`; that resolution limit
/// is accepted.
#[must_use]
pub fn find_free_position(
    item_width: f64,
    item_height: f64,
    board_width: f64,
    board_height: f64,
    others: &[Footprint],
    grid: f64,
    rotation: Rotation,
) -> Option<Point> {
    if grid <= 0.0 || grid.is_nan() {
        return None;
    }
    let mut y = 0.0;
    while y <= board_height {
        let mut x = 0.0;
        while x <= board_width {
            if in_bounds(x, y, item_width, item_height, board_width, board_height, rotation)
                && !overlaps_any(x, y, item_width, item_height, others, rotation, None)
            {
                return Some(Point::new(x, y));
            }
            x += grid;
        }
        y += grid;
    }
    None
}

/// Clamp a position so the rectangle stays on the board.
///
/// The upper bound applies before the lower one, so an item larger than the
/// board resolves to 0 on the oversized axis instead of a negative
/// coordinate.
#[must_use]
pub fn clamp_to_bounds(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    board_width: f64,
    board_height: f64,
    rotation: Rotation,
) -> Point {
    let eff = effective_size(width, height, rotation);
    Point {
        x: x.min(board_width - eff.width).max(0.0),
        y: y.min(board_height - eff.height).max(0.0),
    }
}

/// The center of the board.
#[must_use]
pub fn board_center(board_width: f64, board_height: f64) -> Point {
    Point::new(board_width / 2.0, board_height / 2.0)
}

/// Anchor position that centers the item on the board, honoring rotation.
///
/// Not clamped: components go negative when the item is larger than the
/// board, which callers detect with a bounds check.
#[must_use]
pub fn center_position(
    item_width: f64,
    item_height: f64,
    board_width: f64,
    board_height: f64,
    rotation: Rotation,
) -> Point {
    let eff = effective_size(item_width, item_height, rotation);
    Point::new((board_width - eff.width) / 2.0, (board_height - eff.height) / 2.0)
}

/// Euclidean distance between two points.
#[must_use]
pub fn distance(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}
