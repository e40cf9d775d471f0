//! Document model: the effect catalog, the board, and the stored layout.
//!
//! This module defines the data types that describe what can go on a board
//! (`Effect`), the board surface itself (`Board`), one placement of an effect
//! (`PlacedEffect`), the persisted layout (`LayoutData`), and the in-memory
//! catalog that resolves effect ids to dimensions (`EffectCatalog`).
//!
//! Layouts flow into this layer from persistence (JSON deserialization) and
//! from the engine (mutations). The renderer walks `LayoutData::effects` in
//! order to draw; later entries sit on top.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a catalog effect.
pub type EffectId = Uuid;

/// Error produced when a rotation value is not one of the four quarter turns.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid rotation: {0} (expected 0, 90, 180 or 270)")]
pub struct RotationError(pub u16);

/// Clockwise rotation of a placed effect, in quarter turns.
///
/// Rotating never changes the stored `width_mm`/`height_mm`; at 90 and 270
/// degrees the occupied footprint swaps them instead. On the wire a rotation
/// is the plain degree number, and an absent field reads as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum Rotation {
    /// Upright.
    #[default]
    R0,
    /// Quarter turn clockwise.
    R90,
    /// Upside down.
    R180,
    /// Quarter turn counterclockwise.
    R270,
}

impl Rotation {
    /// Rotation angle in degrees.
    #[must_use]
    pub fn degrees(self) -> u16 {
        match self {
            Self::R0 => 0,
            Self::R90 => 90,
            Self::R180 => 180,
            Self::R270 => 270,
        }
    }

    /// The next step clockwise; 270 wraps back to 0.
    #[must_use]
    pub fn quarter_turn(self) -> Self {
        match self {
            Self::R0 => Self::R90,
            Self::R90 => Self::R180,
            Self::R180 => Self::R270,
            Self::R270 => Self::R0,
        }
    }

    /// The rotation that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::R0 => Self::R0,
            Self::R90 => Self::R270,
            Self::R180 => Self::R180,
            Self::R270 => Self::R90,
        }
    }

    /// Whether the occupied footprint swaps width and height (90 or 270).
    #[must_use]
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::R90 | Self::R270)
    }
}

impl From<Rotation> for u16 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = RotationError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::R0),
            90 => Ok(Self::R90),
            180 => Ok(Self::R180),
            270 => Ok(Self::R270),
            other => Err(RotationError(other)),
        }
    }
}

/// A placeable item from the effect catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effect {
    /// Unique identifier for this effect.
    pub id: EffectId,
    /// Display name shown on the placed rectangle.
    pub name: String,
    /// Enclosure width in millimeters, unrotated.
    pub width_mm: f64,
    /// Enclosure height in millimeters, unrotated.
    pub height_mm: f64,
    /// Free-form note, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// The board surface that effects are placed on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Unique identifier for this board.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Usable width in millimeters.
    pub width_mm: f64,
    /// Usable height in millimeters.
    pub height_mm: f64,
    /// Free-form note, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// One placement in a stored layout: an effect anchored on the board.
///
/// `x`/`y` are the top-left corner of the unrotated bounding box, in
/// millimeters from the board's top-left corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlacedEffect {
    /// The catalog effect this placement refers to.
    pub effect_id: EffectId,
    /// Left edge of the unrotated box in board mm.
    pub x: f64,
    /// Top edge of the unrotated box in board mm.
    pub y: f64,
    /// Rotation applied when drawing and when computing the footprint.
    #[serde(default)]
    pub rotation: Rotation,
}

/// A persisted layout: the ordered list of placements on one board.
///
/// List order is z-order. Later entries draw on top and win hit tests; the
/// index space is also what overlap checks use to exclude a moving item's
/// own record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutData {
    /// Placements in draw order.
    pub effects: Vec<PlacedEffect>,
}

impl LayoutData {
    /// Index of the placement for `effect_id`, if present.
    #[must_use]
    pub fn index_of(&self, effect_id: &EffectId) -> Option<usize> {
        self.effects.iter().position(|p| p.effect_id == *effect_id)
    }

    /// The placement for `effect_id`, if present.
    #[must_use]
    pub fn get(&self, effect_id: &EffectId) -> Option<&PlacedEffect> {
        self.effects.iter().find(|p| p.effect_id == *effect_id)
    }

    /// Number of placements in the layout.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Returns `true` if the layout has no placements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// In-memory catalog of effects, keyed by id.
#[derive(Debug)]
pub struct EffectCatalog {
    effects: HashMap<EffectId, Effect>,
}

impl EffectCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self { effects: HashMap::new() }
    }

    /// Insert or replace an effect. An existing entry with the same `id` is
    /// overwritten.
    pub fn insert(&mut self, effect: Effect) {
        self.effects.insert(effect.id, effect);
    }

    /// Remove an effect by id, returning it if it was present.
    pub fn remove(&mut self, id: &EffectId) -> Option<Effect> {
        self.effects.remove(id)
    }

    /// Return a reference to an effect by id.
    #[must_use]
    pub fn get(&self, id: &EffectId) -> Option<&Effect> {
        self.effects.get(id)
    }

    /// Replace the whole catalog with a full snapshot.
    pub fn load(&mut self, effects: Vec<Effect>) {
        self.effects.clear();
        for effect in effects {
            self.effects.insert(effect.id, effect);
        }
    }

    /// Return all effects sorted by `(name, id)` for palette display.
    #[must_use]
    pub fn sorted_effects(&self) -> Vec<&Effect> {
        let mut effects: Vec<&Effect> = self.effects.values().collect();
        effects.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        effects
    }

    /// Number of effects currently in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Returns `true` if the catalog contains no effects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Default for EffectCatalog {
    fn default() -> Self {
        Self::new()
    }
}
