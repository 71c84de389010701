//! Shared numeric constants and fixed names for the overlay crate.

// ── Zoom ────────────────────────────────────────────────────────

/// Smallest page render scale.
pub const MIN_ZOOM: f64 = 0.5;

/// Largest page render scale.
pub const MAX_ZOOM: f64 = 2.0;

/// Increment applied by a single zoom-in / zoom-out.
pub const ZOOM_STEP: f64 = 0.1;

// ── Markers ─────────────────────────────────────────────────────

/// Radius used when the form leaves it empty or invalid.
pub const DEFAULT_MARKER_RADIUS: u32 = 50;

/// Default heading for wide-area markers, in degrees.
pub const DEFAULT_WIDE_AREA_ORIENTATION: f64 = 0.0;

/// Default heading for directional markers, in degrees.
pub const DEFAULT_DIRECTIONAL_ORIENTATION: f64 = 135.0;

/// Radius of the center dot drawn for every marker, in document units.
pub const MARKER_DOT_RADIUS: f64 = 5.0;

/// Offset from the marker position to the label baseline origin.
pub const LABEL_OFFSET_X: f64 = 10.0;
pub const LABEL_OFFSET_Y: f64 = -10.0;

// ── Export ──────────────────────────────────────────────────────

/// MIME type an uploaded floor plan must declare.
pub const DOCUMENT_MIME: &str = "application/pdf";

/// Download name for the PDF export.
pub const PDF_FILENAME: &str = "camera-layout.pdf";

/// Download name for the PNG export.
pub const PNG_FILENAME: &str = "camera-layout.png";

/// A4 sheet in millimetres (portrait).
pub const A4_WIDTH_MM: f64 = 210.0;
pub const A4_HEIGHT_MM: f64 = 297.0;
