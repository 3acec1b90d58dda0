//! The raster drawing surface.
//!
//! Strokes are rasterized immediately; the canvas keeps no record of them.
//! Erasing paints the background color over existing pixels.

use super::color::Color;
use super::render::render_segment;
use crate::util::Rect;

/// Raster surface that strokes are painted onto.
///
/// Backed by a Cairo ARGB32 image surface that is always fully opaque
/// (filled with the background color on creation and on [`Canvas::clear`]).
pub struct Canvas {
    surface: cairo::ImageSurface,
    background: Color,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("background", &self.background)
            .finish()
    }
}

impl Canvas {
    /// Creates a canvas of the given size filled with `background`.
    ///
    /// Zero or negative dimensions are bumped to 1x1 so a surface always exists
    /// before the compositor sends the first configure.
    pub fn new(width: i32, height: i32, background: Color) -> Result<Self, cairo::Error> {
        let surface =
            cairo::ImageSurface::create(cairo::Format::ARgb32, width.max(1), height.max(1))?;
        let canvas = Self {
            surface,
            background,
        };
        canvas.fill_background()?;
        Ok(canvas)
    }

    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Borrow the underlying Cairo surface (for compositing into a frame).
    pub fn surface(&self) -> &cairo::ImageSurface {
        &self.surface
    }

    /// Erases everything, restoring the background color.
    pub fn clear(&mut self) -> Result<(), cairo::Error> {
        self.fill_background()
    }

    /// Paints one straight segment and returns the area it touched.
    pub fn draw_segment(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        color: Color,
        width: f64,
    ) -> Result<Option<Rect>, cairo::Error> {
        let ctx = cairo::Context::new(&self.surface)?;
        render_segment(&ctx, from, to, color, width);
        ctx.status()?;
        Ok(Rect::around_segment(from, to, width)
            .and_then(|rect| rect.clamped_to(self.width(), self.height())))
    }

    /// Resizes the canvas, keeping existing pixels anchored at the top-left.
    ///
    /// Newly exposed area is filled with the background color. Does nothing
    /// when the size is unchanged.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), cairo::Error> {
        let (width, height) = (width.max(1), height.max(1));
        if width == self.width() && height == self.height() {
            return Ok(());
        }

        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        {
            let ctx = cairo::Context::new(&surface)?;
            ctx.set_source_rgba(
                self.background.r,
                self.background.g,
                self.background.b,
                self.background.a,
            );
            ctx.paint()?;
            ctx.set_source_surface(&self.surface, 0.0, 0.0)?;
            ctx.paint()?;
        }
        log::debug!(
            "Canvas resized {}x{} -> {}x{}",
            self.width(),
            self.height(),
            width,
            height
        );
        self.surface = surface;
        Ok(())
    }

    /// Reads back one pixel as 8-bit RGB. Returns `None` when out of bounds.
    pub fn pixel_rgb(&self, x: i32, y: i32) -> Option<[u8; 3]> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        self.surface.flush();
        let stride = self.surface.stride() as usize;
        let offset = y as usize * stride + x as usize * 4;
        let mut rgb = None;
        self.surface
            .with_data(|data| {
                if let Some(bytes) = data.get(offset..offset + 4) {
                    // ARGB32 is stored as a native-endian u32.
                    let argb = u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                    rgb = Some([(argb >> 16) as u8, (argb >> 8) as u8, argb as u8]);
                }
            })
            .ok()?;
        rgb
    }

    fn fill_background(&self) -> Result<(), cairo::Error> {
        let ctx = cairo::Context::new(&self.surface)?;
        let bg = self.background;
        ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
        ctx.set_operator(cairo::Operator::Source);
        ctx.paint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED, WHITE};

    #[test]
    fn new_canvas_is_filled_with_background() {
        let canvas = Canvas::new(20, 10, WHITE).unwrap();
        assert_eq!(canvas.pixel_rgb(0, 0), Some([255, 255, 255]));
        assert_eq!(canvas.pixel_rgb(19, 9), Some([255, 255, 255]));
        assert_eq!(canvas.pixel_rgb(20, 9), None);
    }

    #[test]
    fn segment_paints_along_its_path() {
        let mut canvas = Canvas::new(100, 100, WHITE).unwrap();
        let damage = canvas.draw_segment((10, 50), (90, 50), RED, 3.0).unwrap();

        assert_eq!(canvas.pixel_rgb(50, 50), Some([255, 0, 0]));
        assert_eq!(canvas.pixel_rgb(50, 10), Some([255, 255, 255]));
        let damage = damage.unwrap();
        assert!(damage.contains(10, 50));
        assert!(damage.contains(90, 50));
    }

    #[test]
    fn background_segment_erases() {
        let mut canvas = Canvas::new(100, 100, WHITE).unwrap();
        canvas.draw_segment((10, 50), (90, 50), BLACK, 3.0).unwrap();
        canvas.draw_segment((10, 50), (90, 50), WHITE, 20.0).unwrap();
        assert_eq!(canvas.pixel_rgb(50, 50), Some([255, 255, 255]));
    }

    #[test]
    fn clear_restores_background() {
        let mut canvas = Canvas::new(50, 50, WHITE).unwrap();
        canvas.draw_segment((0, 0), (49, 49), BLACK, 5.0).unwrap();
        canvas.clear().unwrap();
        assert_eq!(canvas.pixel_rgb(25, 25), Some([255, 255, 255]));
    }

    #[test]
    fn resize_keeps_existing_strokes() {
        let mut canvas = Canvas::new(50, 50, WHITE).unwrap();
        canvas.draw_segment((10, 10), (40, 10), BLACK, 5.0).unwrap();
        canvas.resize(120, 80).unwrap();

        assert_eq!(canvas.width(), 120);
        assert_eq!(canvas.height(), 80);
        assert_eq!(canvas.pixel_rgb(25, 10), Some([0, 0, 0]));
        assert_eq!(canvas.pixel_rgb(100, 70), Some([255, 255, 255]));
    }
}
