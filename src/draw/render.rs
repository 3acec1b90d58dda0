//! Cairo rendering helpers for strokes and canvas composition.

use super::canvas::Canvas;
use super::color::Color;

/// Renders one straight stroke segment.
///
/// Round caps and joins make consecutive segments of a drag read as a single
/// continuous line. A zero-length segment renders as a dot.
pub fn render_segment(
    ctx: &cairo::Context,
    from: (i32, i32),
    to: (i32, i32),
    color: Color,
    width: f64,
) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.0 as f64, from.1 as f64);
    ctx.line_to(to.0 as f64, to.1 as f64);

    let _ = ctx.stroke();
}

/// Paints the canvas raster into `ctx` with its top-left corner at `(x, y)`.
pub fn paint_canvas(
    ctx: &cairo::Context,
    canvas: &Canvas,
    x: f64,
    y: f64,
) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_source_surface(canvas.surface(), x, y)?;
    ctx.paint()?;
    ctx.restore()?;
    Ok(())
}
