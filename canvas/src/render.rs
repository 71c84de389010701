//! Rendering: turns the marker sequence into draw commands and paints them.
//!
//! [`overlay_commands`] is pure. It maps markers (document space) to a flat
//! list of [`DrawCommand`]s in insertion order, which keeps the overlay
//! deterministic and testable without a browser. [`draw`] is the only place
//! that touches [`web_sys::CanvasRenderingContext2d`]; it paints a command list
//! under a uniform scale transform so document-space geometry lands on the
//! zoomed page.
//!
//! Neither function mutates application state.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::OverlayStyle;
use crate::geom::Point;
use crate::marker::{Marker, MarkerKind};

/// One primitive paint operation, in document space.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand<'a> {
    /// Outline of a circle.
    StrokeCircle { center: Point, radius: f64, color: &'a str, line_width: f64 },
    /// Solid disc.
    FillCircle { center: Point, radius: f64, color: &'a str },
    /// Straight segment.
    Line { from: Point, to: Point, color: &'a str, line_width: f64 },
    /// Text anchored at its left baseline.
    Text { origin: Point, text: &'a str, color: &'a str, font: &'a str },
}

/// Heading angle in radians for a marker orientation in degrees.
///
/// Orientation 0 points up the screen (negative y), 90 points right.
#[must_use]
pub fn heading_radians(orientation_deg: f64) -> f64 {
    (orientation_deg - 90.0).to_radians()
}

/// End of the heading line for a directional marker.
#[must_use]
pub fn heading_endpoint(marker: &Marker) -> Point {
    let angle = heading_radians(marker.orientation);
    let length = marker.radius_f64();
    marker.position.offset(length * angle.cos(), length * angle.sin())
}

/// Build the overlay for `markers`, in insertion order.
#[must_use]
pub fn overlay_commands<'a>(markers: &'a [Marker], style: &'a OverlayStyle) -> Vec<DrawCommand<'a>> {
    let mut commands = Vec::with_capacity(markers.len() * 3);
    for marker in markers {
        push_marker(&mut commands, marker, style);
    }
    commands
}

fn push_marker<'a>(out: &mut Vec<DrawCommand<'a>>, marker: &'a Marker, style: &'a OverlayStyle) {
    let center = marker.position;
    match marker.kind {
        MarkerKind::WideArea => {
            out.push(DrawCommand::StrokeCircle {
                center,
                radius: marker.radius_f64(),
                color: &style.coverage_stroke,
                line_width: style.coverage_line_width,
            });
            out.push(DrawCommand::FillCircle { center, radius: style.dot_radius, color: &style.wide_area_dot });
        }
        MarkerKind::Directional => {
            out.push(DrawCommand::FillCircle { center, radius: style.dot_radius, color: &style.directional_dot });
            out.push(DrawCommand::Line {
                from: center,
                to: heading_endpoint(marker),
                color: &style.heading_stroke,
                line_width: style.heading_line_width,
            });
        }
    }
    out.push(DrawCommand::Text {
        origin: center.offset(style.label_offset_x, style.label_offset_y),
        text: &marker.label,
        color: &style.label_fill,
        font: &style.label_font,
    });
}

/// Paint `commands` on top of whatever the surface already holds.
///
/// `scale` maps document units to surface pixels (the current zoom when a
/// page is rendered, 1 for the blank canvas). The context's transform and
/// styles are restored afterwards.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(ctx: &CanvasRenderingContext2d, commands: &[DrawCommand<'_>], scale: f64) -> Result<(), JsValue> {
    ctx.save();
    let result = ctx
        .set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0)
        .and_then(|()| commands.iter().try_for_each(|cmd| paint(ctx, cmd)));
    ctx.restore();
    result
}

fn paint(ctx: &CanvasRenderingContext2d, command: &DrawCommand<'_>) -> Result<(), JsValue> {
    match *command {
        DrawCommand::StrokeCircle { center, radius, color, line_width } => {
            ctx.begin_path();
            ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(line_width);
            ctx.stroke();
        }
        DrawCommand::FillCircle { center, radius, color } => {
            ctx.begin_path();
            ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
            ctx.set_fill_style_str(color);
            ctx.fill();
        }
        DrawCommand::Line { from, to, color, line_width } => {
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.set_stroke_style_str(color);
            ctx.set_line_width(line_width);
            ctx.stroke();
        }
        DrawCommand::Text { origin, text, color, font } => {
            ctx.set_fill_style_str(color);
            ctx.set_font(font);
            ctx.fill_text(text, origin.x, origin.y)?;
        }
    }
    Ok(())
}
