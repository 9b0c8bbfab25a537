//! Cairo-based rendering functions for shapes.

use super::shape::Shape;
use super::style::DrawStyle;
use crate::util::Point;

/// Renders a single shape to a Cairo context.
///
/// The whole style (stroke color, optional fill, width) is applied inside a
/// saved context state and restored afterwards, so nothing leaks into later
/// calls on the same context. Fill is painted before the stroke; lines are
/// never filled.
///
/// # Arguments
/// * `ctx` - Cairo drawing context to render to
/// * `shape` - The shape to render
/// * `style` - Stroke/fill/width to apply
pub fn render_shape(
    ctx: &cairo::Context,
    shape: &Shape,
    style: &DrawStyle,
) -> Result<(), cairo::Error> {
    ctx.save()?;
    let result = match *shape {
        Shape::Line { from, to } => render_line(ctx, from, to, style),
        Shape::Rect { .. } => match shape.normalized_rect() {
            Some(rect) => {
                ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
                paint_path(ctx, style)
            }
            None => Ok(()),
        },
        Shape::Circle { center, radius } => render_circle(ctx, center, radius, style),
        Shape::Ellipse { center, rx, ry } => render_ellipse(ctx, center, rx, ry, style),
    };
    ctx.restore()?;
    result
}

/// Render a straight line with round caps
fn render_line(
    ctx: &cairo::Context,
    from: Point,
    to: Point,
    style: &DrawStyle,
) -> Result<(), cairo::Error> {
    let color = style.stroke;
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(style.width);
    ctx.set_line_cap(cairo::LineCap::Round);

    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke()
}

fn render_circle(
    ctx: &cairo::Context,
    center: Point,
    radius: f64,
    style: &DrawStyle,
) -> Result<(), cairo::Error> {
    if radius <= 0.0 {
        return Ok(());
    }

    ctx.arc(center.x, center.y, radius, 0.0, 2.0 * std::f64::consts::PI);
    paint_path(ctx, style)
}

/// Render an ellipse using Cairo's arc with scaling
fn render_ellipse(
    ctx: &cairo::Context,
    center: Point,
    rx: f64,
    ry: f64,
    style: &DrawStyle,
) -> Result<(), cairo::Error> {
    // A zero radius would make the scale matrix singular
    if rx <= 0.0 || ry <= 0.0 {
        return Ok(());
    }

    ctx.save()?;
    ctx.translate(center.x, center.y);
    ctx.scale(rx, ry);
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * std::f64::consts::PI);
    ctx.restore()?;

    // Path is in device space now, so the stroke width is not distorted
    paint_path(ctx, style)
}

/// Fills (when the style has a fill) and then strokes the current path.
fn paint_path(ctx: &cairo::Context, style: &DrawStyle) -> Result<(), cairo::Error> {
    if let Some(fill) = style.fill {
        ctx.set_source_rgba(fill.r, fill.g, fill.b, fill.a);
        ctx.fill_preserve()?;
    }

    let color = style.stroke;
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(style.width);
    ctx.set_line_join(cairo::LineJoin::Miter);
    ctx.stroke()
}
