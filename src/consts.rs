//! Shared numeric constants for the layout engine.

// ── Scale ───────────────────────────────────────────────────────

/// Horizontal padding reserved when fitting the board into a container,
/// in screen pixels (both sides combined).
pub const FIT_MARGIN_PX: f64 = 40.0;

/// Lower clamp for any computed fit scale, in px per mm.
pub const MIN_SCALE: f64 = 0.1;

/// Upper clamp for the fit scale when the caller does not supply one.
pub const DEFAULT_MAX_SCALE: f64 = 2.0;

// ── Zoom ────────────────────────────────────────────────────────

/// Scale change per zoom-in or zoom-out step.
pub const ZOOM_STEP: f64 = 0.1;

/// Smallest scale the zoom-out control will reach.
pub const MIN_ZOOM: f64 = 0.3;

/// Largest scale the zoom-in control will reach.
pub const MAX_ZOOM: f64 = 2.0;

// ── Grid ────────────────────────────────────────────────────────

/// Default grid pitch in millimeters.
pub const DEFAULT_GRID_MM: f64 = 5.0;

/// Grid pitches offered by the editor UI, in millimeters.
pub const GRID_CHOICES_MM: [f64; 3] = [1.0, 5.0, 10.0];

// ── Gestures ────────────────────────────────────────────────────

/// Two primary presses on the same placement within this window count
/// as a double-click, in milliseconds.
pub const DOUBLE_CLICK_MS: f64 = 300.0;
