//! Layout geometry engine for a pedalboard planner.
//!
//! This crate owns the geometry of placing effect units on a board: unit
//! conversion between the board's millimeter plane and screen pixels, grid
//! snapping, bounds and overlap checking, free-position search, and the
//! pointer-driven editing session (select, drag, rotate, remove) built on
//! top of them. The host layer is responsible only for wiring input events
//! to the engine, drawing from its state, and persisting the resulting
//! [`engine::Action`]s.
//!
//! All geometry lives in board millimeters with the origin at the top-left
//! corner and y growing downward. Pixels appear only at the edges, converted
//! through the view scale in [`units`].
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level editing session and the [`engine::Action`] stream |
//! | [`doc`] | Board, effect, and layout document types |
//! | [`geometry`] | Snapping, bounds, overlap, and placement search |
//! | [`units`] | mm/px conversion and scale-to-fit |
//! | [`hit`] | Rotation-aware hit-testing and drag math |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`consts`] | Shared numeric constants (margins, zoom limits, grid pitch) |

pub mod consts;
pub mod doc;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod units;
