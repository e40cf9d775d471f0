//! Rotation-aware pointer math: which placement is under the cursor and how
//! to keep the grabbed point under it while dragging.
//!
//! A placed effect renders rotated about the center of its unrotated box, so
//! the tested rectangle on screen is not the stored one. Instead of rotating
//! the rectangle, the pointer is rotated the opposite way about that center
//! and compared against the stored box. Drag offsets live in the same
//! unrotated frame and are mapped back through the current rotation on every
//! move, which keeps the grabbed point exactly under the cursor at any
//! rotation.
//!
//! Quarter turns are exact coordinate swaps, so there is no trigonometry and
//! no rounding anywhere in this module.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::doc::{Effect, EffectCatalog, EffectId, LayoutData, PlacedEffect, Rotation};
use crate::units::Point;

/// Result of a hit test.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// Index of the placement in the layout's draw order.
    pub index: usize,
    /// Id of the placed effect.
    pub effect_id: EffectId,
}

/// Rotate `p` clockwise by `rotation` about `center`.
#[must_use]
pub fn rotate_about(p: Point, center: Point, rotation: Rotation) -> Point {
    let dx = p.x - center.x;
    let dy = p.y - center.y;
    let (rx, ry) = match rotation {
        Rotation::R0 => (dx, dy),
        Rotation::R90 => (-dy, dx),
        Rotation::R180 => (-dx, -dy),
        Rotation::R270 => (dy, -dx),
    };
    Point::new(center.x + rx, center.y + ry)
}

/// Undo a clockwise rotation: rotate `p` by the inverse of `rotation` about
/// `center`.
#[must_use]
pub fn unrotate_about(p: Point, center: Point, rotation: Rotation) -> Point {
    rotate_about(p, center, rotation.inverse())
}

/// Center of a placement's unrotated box, the pivot everything rotates
/// around.
#[must_use]
pub fn placement_center(placed: &PlacedEffect, effect: &Effect) -> Point {
    Point::new(placed.x + effect.width_mm / 2.0, placed.y + effect.height_mm / 2.0)
}

/// Whether `point` (board mm) falls inside a placement's rotated rectangle.
///
/// Boundary points count as inside.
#[must_use]
pub fn point_in_effect(point: Point, placed: &PlacedEffect, effect: &Effect) -> bool {
    let local = unrotate_about(point, placement_center(placed, effect), placed.rotation);
    local.x >= placed.x
        && local.x <= placed.x + effect.width_mm
        && local.y >= placed.y
        && local.y <= placed.y + effect.height_mm
}

/// Topmost placement under `point` (board mm).
///
/// Scans the layout back to front so later entries, which draw on top, win.
/// Placements whose effect id is missing from the catalog have no dimensions
/// and are skipped.
#[must_use]
pub fn hit_test(point: Point, layout: &LayoutData, catalog: &EffectCatalog) -> Option<Hit> {
    for (index, placed) in layout.effects.iter().enumerate().rev() {
        let Some(effect) = catalog.get(&placed.effect_id) else {
            continue;
        };
        if point_in_effect(point, placed, effect) {
            return Some(Hit { index, effect_id: placed.effect_id });
        }
    }
    None
}

/// Offset from the placement anchor to the grab point, in the unrotated
/// frame.
///
/// The pointer is unrotated about the box center first, so the offset is
/// meaningful for any rotation. Feed it back through [`drag_anchor`] on each
/// move.
#[must_use]
pub fn grab_offset(point: Point, placed: &PlacedEffect, effect: &Effect) -> Point {
    let local = unrotate_about(point, placement_center(placed, effect), placed.rotation);
    Point::new(local.x - placed.x, local.y - placed.y)
}

/// Candidate anchor for a drag in progress.
///
/// Maps the stored unrotated-frame `offset` back through the current
/// rotation about the box center, then subtracts it from the live pointer.
/// The result is the raw anchor before any snapping or clamping.
#[must_use]
pub fn drag_anchor(point: Point, offset: Point, effect: &Effect, rotation: Rotation) -> Point {
    let half = Point::new(effect.width_mm / 2.0, effect.height_mm / 2.0);
    let visual = rotate_about(offset, half, rotation);
    Point::new(point.x - visual.x, point.y - visual.y)
}
