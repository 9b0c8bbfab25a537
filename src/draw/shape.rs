//! Shape definitions built from a gesture's anchor and current pointer position.

use crate::input::Tool;
use crate::util::{Point, Rect};

/// A drawable primitive in surface-local coordinates.
///
/// Shapes carry geometry only; color and width come from the
/// [`DrawStyle`](super::DrawStyle) passed alongside at draw time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Straight segment between two points
    Line { from: Point, to: Point },
    /// Rectangle from an origin with signed extents (normalized when rendered)
    Rect { x: f64, y: f64, w: f64, h: f64 },
    /// Circle around a center point
    Circle { center: Point, radius: f64 },
    /// Axis-aligned ellipse around a center point
    Ellipse { center: Point, rx: f64, ry: f64 },
}

impl Shape {
    pub fn line(anchor: Point, point: Point) -> Self {
        Shape::Line {
            from: anchor,
            to: point,
        }
    }

    /// Rectangle spanning `anchor` to `point`; extents may be negative.
    pub fn rect(anchor: Point, point: Point) -> Self {
        Shape::Rect {
            x: anchor.x,
            y: anchor.y,
            w: point.x - anchor.x,
            h: point.y - anchor.y,
        }
    }

    /// Circle centered on `anchor` with [`circle_radius`].
    pub fn circle(anchor: Point, point: Point) -> Self {
        Shape::Circle {
            center: anchor,
            radius: circle_radius(anchor, point),
        }
    }

    /// Ellipse centered on `anchor` whose radii are the per-axis distances to `point`.
    pub fn ellipse(anchor: Point, point: Point) -> Self {
        Shape::Ellipse {
            center: anchor,
            rx: (point.x - anchor.x).abs(),
            ry: (point.y - anchor.y).abs(),
        }
    }

    /// Builds the shape a tool produces for a drag from `anchor` to `point`.
    pub fn for_tool(tool: Tool, anchor: Point, point: Point) -> Self {
        match tool {
            Tool::Line => Self::line(anchor, point),
            Tool::Rectangle => Self::rect(anchor, point),
            Tool::Circle => Self::circle(anchor, point),
            Tool::Ellipse => Self::ellipse(anchor, point),
        }
    }

    /// Returns the normalized rectangle for `Shape::Rect`, `None` otherwise.
    pub fn normalized_rect(&self) -> Option<Rect> {
        match *self {
            Shape::Rect { x, y, w, h } => Some(Rect::normalized(x, y, w, h)),
            _ => None,
        }
    }
}

/// Circle radius for a drag from `anchor` to `point`.
///
/// The radius is half the *sum* of the two axis deltas, not the Euclidean
/// distance: dragging (+30, -30) yields a zero radius.
pub fn circle_radius(anchor: Point, point: Point) -> f64 {
    (((point.x - anchor.x) + (point.y - anchor.y)) / 2.0).abs()
}
