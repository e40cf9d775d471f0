//! The layout engine: owns a live editing session and turns pointer and key
//! events into layout mutations plus actions for the host to process.
//!
//! The engine stores everything in board millimeters. Pointer coordinates
//! arrive in board-local screen pixels and are converted through the current
//! scale on the way in; nothing else ever sees pixels.

use crate::consts::{
    DEFAULT_GRID_MM, DEFAULT_MAX_SCALE, DOUBLE_CLICK_MS, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};
use crate::doc::{Board, Effect, EffectCatalog, EffectId, LayoutData, PlacedEffect, Rotation};
use crate::geometry::{self, Footprint, Size};
use crate::hit;
use crate::input::{Button, InputState, Key, UiState};
use crate::units::{self, Point};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from handlers and operations for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    /// A new placement was added to the layout.
    EffectPlaced(PlacedEffect),
    /// A placement finished moving (pointer-up after a drag).
    EffectMoved { effect_id: EffectId, x: f64, y: f64 },
    /// A placement's rotation advanced a quarter turn.
    EffectRotated { effect_id: EffectId, rotation: Rotation },
    /// A placement was removed from the layout.
    EffectRemoved { effect_id: EffectId },
    /// The scene must be redrawn.
    RenderNeeded,
}

/// Error returned by layout-mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// The effect id is not in the catalog.
    #[error("unknown effect: {0}")]
    UnknownEffect(EffectId),
    /// The effect already has a placement; each effect goes on the board
    /// once.
    #[error("effect already placed: {0}")]
    AlreadyPlaced(EffectId),
    /// The operation needs an existing placement and there is none.
    #[error("effect not placed: {0}")]
    NotPlaced(EffectId),
    /// No grid-aligned free slot can hold the effect.
    #[error("no free position on the board")]
    NoFreeSpace,
}

/// The board layout editor engine.
///
/// Holds the board, the effect catalog, the live layout, view scale, and the
/// gesture state machine. Hosts feed it pointer and key events plus editor
/// operations, and apply the returned [`Action`]s (persist mutations,
/// redraw).
pub struct Engine {
    /// The board surface being laid out.
    pub board: Board,
    /// Catalog resolving effect ids to names and dimensions.
    pub catalog: EffectCatalog,
    /// The layout being edited.
    pub layout: LayoutData,
    /// Selection and grid settings, read by the renderer.
    pub ui: UiState,
    /// Active gesture, if any.
    pub input: InputState,
    /// View scale in px per mm; the pointer pipeline divides by this.
    pub scale: f64,
    /// Previous primary press, for double-click detection.
    last_press: Option<(EffectId, f64)>,
}

impl Engine {
    /// Create an engine for the given board with an empty catalog and
    /// layout.
    #[must_use]
    pub fn new(board: Board) -> Self {
        Self {
            board,
            catalog: EffectCatalog::new(),
            layout: LayoutData::default(),
            ui: UiState::default(),
            input: InputState::default(),
            scale: 1.0,
            last_press: None,
        }
    }

    // --- Data inputs ---

    /// Hydrate the effect catalog from a library snapshot.
    pub fn load_effects(&mut self, effects: Vec<Effect>) {
        tracing::debug!(count = effects.len(), "catalog loaded");
        self.catalog.load(effects);
    }

    /// Hydrate the layout from a saved snapshot, resetting selection and any
    /// gesture in flight.
    ///
    /// The snapshot is trusted as saved: positions are not re-validated, and
    /// placements referring to effects missing from the catalog are kept.
    pub fn load_layout(&mut self, layout: LayoutData) {
        tracing::debug!(count = layout.len(), "layout loaded");
        self.layout = layout;
        self.ui.selected_id = None;
        self.input = InputState::Idle;
        self.last_press = None;
    }

    /// Replace the board surface. Placements are left where they are, even
    /// if the new board no longer contains them.
    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    // --- Editor operations ---

    /// Place a catalog effect onto the board.
    ///
    /// The centered position is tried first; when the center is off the
    /// board or occupied, the first free grid slot wins. New placements go
    /// on top of the draw order, unrotated.
    ///
    /// # Errors
    ///
    /// [`LayoutError::AlreadyPlaced`] if the effect is already on the board,
    /// [`LayoutError::UnknownEffect`] if the id is not in the catalog, and
    /// [`LayoutError::NoFreeSpace`] if no legal position exists.
    pub fn add_effect(&mut self, effect_id: EffectId) -> Result<Action, LayoutError> {
        if self.layout.index_of(&effect_id).is_some() {
            return Err(LayoutError::AlreadyPlaced(effect_id));
        }
        let Some(effect) = self.catalog.get(&effect_id) else {
            return Err(LayoutError::UnknownEffect(effect_id));
        };
        let item = Size::new(effect.width_mm, effect.height_mm);
        let board_width = self.board.width_mm;
        let board_height = self.board.height_mm;
        let others = self.footprints(None);

        let centered =
            geometry::center_position(item.width, item.height, board_width, board_height, Rotation::R0);
        let center_is_free = geometry::in_bounds(
            centered.x,
            centered.y,
            item.width,
            item.height,
            board_width,
            board_height,
            Rotation::R0,
        ) && !geometry::overlaps_any(
            centered.x,
            centered.y,
            item.width,
            item.height,
            &others,
            Rotation::R0,
            None,
        );
        let position = if center_is_free {
            centered
        } else {
            let Some(found) = geometry::find_free_position(
                item.width,
                item.height,
                board_width,
                board_height,
                &others,
                DEFAULT_GRID_MM,
                Rotation::R0,
            ) else {
                tracing::debug!(%effect_id, "no free position for effect");
                return Err(LayoutError::NoFreeSpace);
            };
            found
        };

        let placed = PlacedEffect { effect_id, x: position.x, y: position.y, rotation: Rotation::R0 };
        self.layout.effects.push(placed);
        tracing::debug!(%effect_id, x = position.x, y = position.y, "effect placed");
        Ok(Action::EffectPlaced(placed))
    }

    /// Remove an effect's placement from the board.
    ///
    /// Clears the selection if the removed placement was selected, and drops
    /// an in-flight drag of it.
    ///
    /// # Errors
    ///
    /// [`LayoutError::NotPlaced`] if the effect is not on the board.
    pub fn remove_effect(&mut self, effect_id: EffectId) -> Result<Action, LayoutError> {
        let Some(index) = self.layout.index_of(&effect_id) else {
            return Err(LayoutError::NotPlaced(effect_id));
        };
        self.layout.effects.remove(index);
        if self.ui.selected_id == Some(effect_id) {
            self.ui.selected_id = None;
        }
        if let InputState::Dragging { effect_id: dragging, .. } = &self.input {
            if *dragging == effect_id {
                self.input = InputState::Idle;
            }
        }
        tracing::debug!(%effect_id, "effect removed");
        Ok(Action::EffectRemoved { effect_id })
    }

    /// Advance an effect's rotation one quarter turn clockwise.
    ///
    /// The anchor is re-clamped afterwards so the swapped footprint stays on
    /// the board.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownEffect`] if the id is not in the catalog, and
    /// [`LayoutError::NotPlaced`] if the effect is not on the board.
    pub fn rotate_effect(&mut self, effect_id: EffectId) -> Result<Action, LayoutError> {
        let Some(effect) = self.catalog.get(&effect_id) else {
            return Err(LayoutError::UnknownEffect(effect_id));
        };
        let item = Size::new(effect.width_mm, effect.height_mm);
        let board_width = self.board.width_mm;
        let board_height = self.board.height_mm;
        let Some(placed) = self.layout.effects.iter_mut().find(|p| p.effect_id == effect_id)
        else {
            return Err(LayoutError::NotPlaced(effect_id));
        };

        let rotation = placed.rotation.quarter_turn();
        let position = geometry::clamp_to_bounds(
            placed.x,
            placed.y,
            item.width,
            item.height,
            board_width,
            board_height,
            rotation,
        );
        placed.rotation = rotation;
        placed.x = position.x;
        placed.y = position.y;
        tracing::debug!(%effect_id, degrees = rotation.degrees(), "effect rotated");
        Ok(Action::EffectRotated { effect_id, rotation })
    }

    // --- View ---

    /// Fit the board width into a container, leaving the standard margin.
    pub fn fit_to_container(&mut self, container_width_px: f64) {
        self.scale = units::fit_scale(container_width_px, self.board.width_mm, DEFAULT_MAX_SCALE);
    }

    /// Step the scale up by one zoom increment, capped at the zoom ceiling.
    pub fn zoom_in(&mut self) {
        self.scale = (self.scale + ZOOM_STEP).min(MAX_ZOOM);
    }

    /// Step the scale down by one zoom increment, stopping at the zoom
    /// floor.
    pub fn zoom_out(&mut self) {
        self.scale = (self.scale - ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Restore the 1:1 scale.
    pub fn zoom_reset(&mut self) {
        self.scale = 1.0;
    }

    // --- Grid ---

    /// Set the grid pitch in millimeters.
    pub fn set_grid_mm(&mut self, grid_mm: f64) {
        self.ui.grid_mm = grid_mm;
    }

    /// Toggle snapping of dragged placements to the grid.
    pub fn set_snap_to_grid(&mut self, snap: bool) {
        self.ui.snap_to_grid = snap;
    }

    /// Toggle grid line rendering.
    pub fn set_show_grid(&mut self, show: bool) {
        self.ui.show_grid = show;
    }

    // --- Input events ---

    /// Handle a pointer press at `screen_pt` (board-local px).
    ///
    /// A primary press on a placement selects it and starts a drag; a second
    /// press on the same placement within the double-click window rotates it
    /// instead. A press on empty board clears the selection. `time_ms` is
    /// the host's event timestamp, used only for double-click detection.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, time_ms: f64) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        if !matches!(self.input, InputState::Idle) {
            // one gesture at a time
            return Vec::new();
        }
        let point = units::point_to_mm(screen_pt, self.scale);
        let Some(hit) = hit::hit_test(point, &self.layout, &self.catalog) else {
            self.last_press = None;
            if self.ui.selected_id.take().is_some() {
                return vec![Action::RenderNeeded];
            }
            return Vec::new();
        };

        let is_double = self
            .last_press
            .is_some_and(|(id, at)| id == hit.effect_id && time_ms - at <= DOUBLE_CLICK_MS);
        if is_double {
            self.last_press = None;
            // a hit guarantees the placement and its catalog entry exist
            return match self.rotate_effect(hit.effect_id) {
                Ok(action) => vec![action, Action::RenderNeeded],
                Err(_) => Vec::new(),
            };
        }

        self.last_press = Some((hit.effect_id, time_ms));
        self.ui.selected_id = Some(hit.effect_id);
        let Some(placed) = self.layout.effects.get(hit.index) else {
            return vec![Action::RenderNeeded];
        };
        let Some(effect) = self.catalog.get(&placed.effect_id) else {
            return vec![Action::RenderNeeded];
        };
        self.input = InputState::Dragging {
            effect_id: hit.effect_id,
            offset: hit::grab_offset(point, placed, effect),
            orig: Point::new(placed.x, placed.y),
        };
        vec![Action::RenderNeeded]
    }

    /// Handle pointer movement at `screen_pt` (board-local px).
    ///
    /// Only meaningful while dragging: computes the candidate anchor from
    /// the stored grab offset, then either snaps it (falling back to a plain
    /// clamp when the snapped spot leaves the board, and refusing candidates
    /// that would overlap another placement) or just clamps it when snapping
    /// is off.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let InputState::Dragging { effect_id, offset, .. } = &self.input else {
            return Vec::new();
        };
        let (effect_id, offset) = (*effect_id, *offset);
        let Some(effect) = self.catalog.get(&effect_id) else {
            // the catalog lost the dragged effect; drop the gesture
            self.input = InputState::Idle;
            return Vec::new();
        };
        let item = Size::new(effect.width_mm, effect.height_mm);
        let Some(placed) = self.layout.get(&effect_id) else {
            self.input = InputState::Idle;
            return Vec::new();
        };
        let rotation = placed.rotation;
        let prev = Point::new(placed.x, placed.y);

        let point = units::point_to_mm(screen_pt, self.scale);
        let candidate = hit::drag_anchor(point, offset, effect, rotation);
        let board = Size::new(self.board.width_mm, self.board.height_mm);

        let next = if self.ui.snap_to_grid {
            let snap = geometry::snap_to_grid_checked(
                candidate.x,
                candidate.y,
                self.ui.grid_mm,
                item,
                board,
                rotation,
            );
            let position = if snap.snapped {
                Point::new(snap.x, snap.y)
            } else {
                geometry::clamp_to_bounds(
                    candidate.x,
                    candidate.y,
                    item.width,
                    item.height,
                    board.width,
                    board.height,
                    rotation,
                )
            };
            let others = self.footprints(Some(&effect_id));
            if geometry::overlaps_any(
                position.x,
                position.y,
                item.width,
                item.height,
                &others,
                rotation,
                None,
            ) {
                prev
            } else {
                position
            }
        } else {
            geometry::clamp_to_bounds(
                candidate.x,
                candidate.y,
                item.width,
                item.height,
                board.width,
                board.height,
                rotation,
            )
        };

        if next == prev {
            return Vec::new();
        }
        let Some(placed) = self.layout.effects.iter_mut().find(|p| p.effect_id == effect_id)
        else {
            return Vec::new();
        };
        placed.x = next.x;
        placed.y = next.y;
        vec![Action::RenderNeeded]
    }

    /// Handle pointer release.
    ///
    /// Ends the drag and commits the move. A release without movement is a
    /// plain click and commits nothing.
    pub fn on_pointer_up(&mut self, _screen_pt: Point) -> Vec<Action> {
        let InputState::Dragging { effect_id, orig, .. } = &self.input else {
            return Vec::new();
        };
        let (effect_id, orig) = (*effect_id, *orig);
        self.input = InputState::Idle;
        let Some(placed) = self.layout.get(&effect_id) else {
            return Vec::new();
        };
        let position = Point::new(placed.x, placed.y);
        if position == orig {
            return Vec::new();
        }
        // a completed move is not the first half of a double-click
        self.last_press = None;
        tracing::debug!(%effect_id, x = position.x, y = position.y, "drag committed");
        vec![Action::EffectMoved { effect_id, x: position.x, y: position.y }, Action::RenderNeeded]
    }

    /// Handle a key press.
    ///
    /// Delete and Backspace remove the selected placement. Escape aborts an
    /// active drag (restoring the position held at pointer-down) or, when
    /// idle, clears the selection.
    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        match key.0.as_str() {
            "Delete" | "Backspace" => {
                let Some(selected) = self.ui.selected_id else {
                    return Vec::new();
                };
                match self.remove_effect(selected) {
                    Ok(action) => vec![action, Action::RenderNeeded],
                    Err(_) => Vec::new(),
                }
            }
            "Escape" => {
                if matches!(self.input, InputState::Idle) {
                    if self.ui.selected_id.take().is_some() {
                        return vec![Action::RenderNeeded];
                    }
                    return Vec::new();
                }
                self.cancel_gesture()
            }
            _ => Vec::new(),
        }
    }

    /// Abort an in-flight drag, restoring the anchor held at pointer-down.
    ///
    /// For hosts that lose pointer capture; a normal pointer-leave should
    /// call [`Engine::on_pointer_up`] instead, which commits.
    pub fn cancel_gesture(&mut self) -> Vec<Action> {
        let InputState::Dragging { effect_id, orig, .. } = &self.input else {
            return Vec::new();
        };
        let (effect_id, orig) = (*effect_id, *orig);
        self.input = InputState::Idle;
        let Some(placed) = self.layout.effects.iter_mut().find(|p| p.effect_id == effect_id)
        else {
            return Vec::new();
        };
        let moved = Point::new(placed.x, placed.y) != orig;
        placed.x = orig.x;
        placed.y = orig.y;
        if moved {
            tracing::debug!(%effect_id, "drag cancelled");
            vec![Action::RenderNeeded]
        } else {
            Vec::new()
        }
    }

    // --- Queries ---

    /// The currently selected placement, if any.
    #[must_use]
    pub fn selection(&self) -> Option<EffectId> {
        self.ui.selected_id
    }

    /// Look up a placement by effect id.
    #[must_use]
    pub fn placement(&self, effect_id: &EffectId) -> Option<&PlacedEffect> {
        self.layout.get(effect_id)
    }

    /// The layout as stored, for persistence.
    #[must_use]
    pub fn layout_data(&self) -> &LayoutData {
        &self.layout
    }

    // --- Internals ---

    /// Occupied footprints for overlap checks, resolving dimensions through
    /// the catalog. Skips `exclude` and any placement whose effect id is
    /// unknown, which has no dimensions to occupy.
    fn footprints(&self, exclude: Option<&EffectId>) -> Vec<Footprint> {
        self.layout
            .effects
            .iter()
            .filter(|placed| exclude != Some(&placed.effect_id))
            .filter_map(|placed| {
                let effect = self.catalog.get(&placed.effect_id)?;
                Some(Footprint {
                    x: placed.x,
                    y: placed.y,
                    width_mm: effect.width_mm,
                    height_mm: effect.height_mm,
                    rotation: placed.rotation,
                })
            })
            .collect()
    }
}
