//! Input model: mouse buttons, keys, persistent UI state, and the gesture
//! state machine.
//!
//! This module defines the types consumed by the engine's event handlers.
//! `UiState` is what the renderer reads between events (selection, grid
//! settings). `InputState` is the active gesture being tracked between
//! pointer-down and pointer-up, carrying the context needed to keep the
//! grabbed point under the cursor and to revert on cancel.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::DEFAULT_GRID_MM;
use crate::doc::EffectId;
use crate::units::Point;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key (simplified for v0).
///
/// The inner string holds the key name as reported by the host (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone)]
pub struct UiState {
    /// The id of the currently selected placement, if any.
    pub selected_id: Option<EffectId>,
    /// Whether dragged placements snap to the grid.
    pub snap_to_grid: bool,
    /// Grid pitch in millimeters.
    pub grid_mm: f64,
    /// Whether the renderer should draw grid lines.
    pub show_grid: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            selected_id: None,
            snap_to_grid: true,
            grid_mm: DEFAULT_GRID_MM,
            show_grid: true,
        }
    }
}

/// Internal state for the input state machine.
///
/// The active variant carries the gesture context needed to compute candidate
/// positions on every move and to revert on cancel.
#[derive(Debug, Clone)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    Idle,
    /// The user is moving a placed effect across the board.
    Dragging {
        /// Id of the placement being dragged.
        effect_id: EffectId,
        /// Grab offset in mm, in the placement's unrotated frame.
        offset: Point,
        /// Anchor at the start of the drag, used to revert and to tell a
        /// click from a move.
        orig: Point,
    },
}

impl Default for InputState {
    fn default() -> Self {
        Self::Idle
    }
}
