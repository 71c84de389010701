#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in viewport, surface, or document space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are finite numbers.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Translate by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self { x: self.x + dx, y: self.y + dy }
    }

    /// Divide both coordinates by `factor`.
    #[must_use]
    pub fn unscale(self, factor: f64) -> Self {
        Self { x: self.x / factor, y: self.y / factor }
    }
}

/// Width and height of a page or surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `point` lies inside `[0, width] x [0, height]`.
    #[must_use]
    pub fn contains(self, point: Point) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }
}

/// The surface's displayed (CSS) bounding box, as reported by the browser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// Map a pointer event from viewport coordinates into the surface's intrinsic
/// pixel space.
///
/// `surface_width` / `surface_height` are the backing-store dimensions, which
/// differ from `rect` whenever CSS stretches or shrinks the canvas. A
/// degenerate displayed extent maps with a ratio of 1 so the result stays
/// finite.
#[must_use]
pub fn map_event_to_document_space(
    client: Point,
    rect: SurfaceRect,
    surface_width: f64,
    surface_height: f64,
) -> Point {
    let scale_x = display_ratio(surface_width, rect.width);
    let scale_y = display_ratio(surface_height, rect.height);
    Point {
        x: (client.x - rect.left) * scale_x,
        y: (client.y - rect.top) * scale_y,
    }
}

fn display_ratio(intrinsic: f64, displayed: f64) -> f64 {
    if displayed.is_finite() && displayed > 0.0 && intrinsic.is_finite() {
        intrinsic / displayed
    } else {
        1.0
    }
}
