//! Marker model: placed camera indicators and the ordered store that owns them.
//!
//! A [`Marker`] is created from a [`MarkerSpec`] (the validated form
//! parameters) plus a document-space position, and is immutable afterwards.
//! [`MarkerStore`] keeps markers in insertion order; that order is both the
//! draw order and the only identity a marker has.
//!
//! Markers are not tied to a page. The store is a single global overlay that
//! is redrawn on top of whichever page is currently rendered.

#[cfg(test)]
#[path = "marker_test.rs"]
mod marker_test;

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_DIRECTIONAL_ORIENTATION, DEFAULT_MARKER_RADIUS, DEFAULT_WIDE_AREA_ORIENTATION};
use crate::geom::Point;

/// The kind of camera a marker represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerKind {
    /// Omnidirectional (PTZ) camera: coverage circle plus center dot.
    #[default]
    #[serde(alias = "ptz")]
    WideArea,
    /// Fixed camera with a facing direction: center dot plus heading line.
    #[serde(alias = "fixed")]
    Directional,
}

impl MarkerKind {
    /// Heading used when the form leaves orientation unset.
    #[must_use]
    pub fn default_orientation(self) -> f64 {
        match self {
            Self::WideArea => DEFAULT_WIDE_AREA_ORIENTATION,
            Self::Directional => DEFAULT_DIRECTIONAL_ORIENTATION,
        }
    }

    /// Parse a form value. Accepts the canonical names and the legacy
    /// `ptz` / `fixed` select options, case-insensitively.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "wide-area" | "wide_area" | "ptz" => Some(Self::WideArea),
            "directional" | "fixed" => Some(Self::Directional),
            _ => None,
        }
    }
}

/// One placed camera indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Position in document space (page coordinates at scale 1).
    pub position: Point,
    /// Display name drawn next to the marker.
    pub label: String,
    /// Coverage radius or heading-line length, in document units.
    pub radius: NonZeroU32,
    /// Heading in degrees, normalized into `[0, 360)`.
    pub orientation: f64,
    pub kind: MarkerKind,
}

impl Marker {
    /// Radius as a float for geometry.
    #[must_use]
    pub fn radius_f64(&self) -> f64 {
        f64::from(self.radius.get())
    }
}

/// Validated parameters for a new marker. Unset fields take the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSpec {
    pub kind: MarkerKind,
    /// Display name; `None` or blank means `"Camera {n}"`.
    pub label: Option<String>,
    /// Radius; `None` means the configured default.
    pub radius: Option<NonZeroU32>,
    /// Heading in degrees; `None` means the kind's default. Zero is honoured.
    pub orientation: Option<f64>,
}

impl MarkerSpec {
    #[must_use]
    pub fn new(kind: MarkerKind) -> Self {
        Self { kind, ..Self::default() }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the radius. Zero leaves the radius unset.
    #[must_use]
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = NonZeroU32::new(radius);
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, degrees: f64) -> Self {
        self.orientation = Some(degrees);
        self
    }

    /// Materialize a marker at `position`.
    ///
    /// `ordinal` is the 1-based insertion index used for the default label;
    /// `default_radius` replaces an unset radius (zero falls back to the
    /// built-in default).
    #[must_use]
    pub fn build(&self, position: Point, ordinal: usize, default_radius: u32) -> Marker {
        let label = match self.label.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => format!("Camera {ordinal}"),
        };
        let radius = self
            .radius
            .or_else(|| NonZeroU32::new(default_radius))
            .or_else(|| NonZeroU32::new(DEFAULT_MARKER_RADIUS))
            .unwrap_or(NonZeroU32::MIN);
        let orientation = self
            .orientation
            .filter(|deg| deg.is_finite())
            .map_or_else(|| self.kind.default_orientation(), normalize_degrees);

        Marker { position, label, radius, orientation, kind: self.kind }
    }
}

/// Wrap `degrees` into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can return exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Ordered, append-only (except for pops) collection of markers.
#[derive(Debug, Clone, Default)]
pub struct MarkerStore {
    markers: Vec<Marker>,
}

impl MarkerStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { markers: Vec::new() }
    }

    /// Append a marker.
    pub fn place(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Remove and return the most recently placed marker.
    pub fn remove_last(&mut self) -> Option<Marker> {
        self.markers.pop()
    }

    /// Remove every marker, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.markers.len();
        self.markers.clear();
        removed
    }

    /// Number of markers currently placed.
    #[must_use]
    pub fn count(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// All markers in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Marker] {
        &self.markers
    }

    /// The 1-based index the next placed marker receives in its default label.
    #[must_use]
    pub fn next_ordinal(&self) -> usize {
        self.markers.len() + 1
    }
}
