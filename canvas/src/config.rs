//! Session configuration parsed from a host-supplied JSON document.
//!
//! Every field is optional; absent fields take the defaults in
//! [`crate::consts`]. The host typically embeds the JSON in the page or passes
//! `None` to use the defaults outright.

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_MARKER_RADIUS, LABEL_OFFSET_X, LABEL_OFFSET_Y, MARKER_DOT_RADIUS, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP,
};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Error returned by [`SessionConfig::from_json`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Colours, line widths, and offsets used by the overlay renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// Stroke of the wide-area coverage circle.
    pub coverage_stroke: String,
    pub coverage_line_width: f64,
    /// Center dot of a wide-area marker.
    pub wide_area_dot: String,
    /// Center dot of a directional marker.
    pub directional_dot: String,
    /// Heading line of a directional marker.
    pub heading_stroke: String,
    pub heading_line_width: f64,
    pub dot_radius: f64,
    pub label_fill: String,
    pub label_font: String,
    pub label_offset_x: f64,
    pub label_offset_y: f64,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            coverage_stroke: "rgba(255, 0, 0, 0.3)".to_owned(),
            coverage_line_width: 2.0,
            wide_area_dot: "blue".to_owned(),
            directional_dot: "red".to_owned(),
            heading_stroke: "#2563eb".to_owned(),
            heading_line_width: 2.0,
            dot_radius: MARKER_DOT_RADIUS,
            label_fill: "black".to_owned(),
            label_font: "12px Arial".to_owned(),
            label_offset_x: LABEL_OFFSET_X,
            label_offset_y: LABEL_OFFSET_Y,
        }
    }
}

/// Bounds and increment for the page render scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self { min: MIN_ZOOM, max: MAX_ZOOM, step: ZOOM_STEP }
    }
}

impl ZoomLimits {
    /// Clamp `scale` into `[min, max]` after snapping it to the step grid, so
    /// repeated increments never accumulate floating-point drift.
    #[must_use]
    pub fn quantize(&self, scale: f64) -> f64 {
        let snapped = (scale / self.step).round() * self.step;
        // Re-round to strip the residue of the multiply (0.1 * 15 = 1.5000000000000002).
        let snapped = (snapped * 1e9).round() / 1e9;
        snapped.clamp(self.min, self.max)
    }
}

/// Top-level configuration for a [`crate::engine::EngineCore`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub style: OverlayStyle,
    pub zoom: ZoomLimits,
    /// Radius given to markers whose form field is empty or invalid.
    pub default_radius: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            style: OverlayStyle::default(),
            zoom: ZoomLimits::default(),
            default_radius: DEFAULT_MARKER_RADIUS,
        }
    }
}

impl SessionConfig {
    /// Parse and validate a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when the values break the zoom or radius rules.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let zoom = &self.zoom;
        if !(zoom.min.is_finite() && zoom.min > 0.0) {
            return Err(ConfigError::Invalid(format!("zoom.min must be positive, got {}", zoom.min)));
        }
        if !zoom.max.is_finite() || zoom.min > zoom.max {
            return Err(ConfigError::Invalid(format!(
                "zoom.max ({}) must be at least zoom.min ({})",
                zoom.max, zoom.min
            )));
        }
        if !(zoom.step.is_finite() && zoom.step > 0.0) {
            return Err(ConfigError::Invalid(format!("zoom.step must be positive, got {}", zoom.step)));
        }
        if self.default_radius == 0 {
            return Err(ConfigError::Invalid("default_radius must be positive".to_owned()));
        }
        if !(self.style.dot_radius.is_finite() && self.style.dot_radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "style.dot_radius must be positive, got {}",
                self.style.dot_radius
            )));
        }
        Ok(())
    }
}
