//! Single-page PDF output.

use super::types::ExportError;
use cairo::{Context, Format, ImageSurface, PdfSurface};
use image::RgbImage;

const POINTS_PER_INCH: f64 = 72.0;

/// Page size in points for an image of `width` x `height` pixels at `dpi`.
pub fn page_size(width: u32, height: u32, dpi: f64) -> (f64, f64) {
    let scale = POINTS_PER_INCH / dpi;
    (width as f64 * scale, height as f64 * scale)
}

/// Renders `image` onto one PDF page sized for `dpi` and returns the document bytes.
pub fn render_pdf(image: &RgbImage, dpi: f64) -> Result<Vec<u8>, ExportError> {
    let (width, height) = image.dimensions();
    let raster = to_cairo_surface(image)?;
    let (page_width, page_height) = page_size(width, height, dpi);

    let pdf =
        PdfSurface::for_stream(page_width, page_height, Vec::<u8>::new()).map_err(pdf_error)?;
    {
        let ctx = Context::new(&pdf).map_err(pdf_error)?;
        ctx.scale(POINTS_PER_INCH / dpi, POINTS_PER_INCH / dpi);
        ctx.set_source_surface(&raster, 0.0, 0.0).map_err(pdf_error)?;
        ctx.paint().map_err(pdf_error)?;
        ctx.show_page().map_err(pdf_error)?;
    }

    let stream = pdf
        .finish_output_stream()
        .map_err(|e| ExportError::Image(format!("PDF rendering failed: {}", e.error)))?;
    let bytes = stream
        .downcast::<Vec<u8>>()
        .map_err(|_| ExportError::Image("PDF stream had an unexpected type".to_string()))?;

    log::debug!(
        "Rendered {}x{} px PDF page ({:.1}x{:.1} pt, {} bytes)",
        width,
        height,
        page_width,
        page_height,
        bytes.len()
    );
    Ok(*bytes)
}

fn to_cairo_surface(image: &RgbImage) -> Result<ImageSurface, ExportError> {
    let (width, height) = image.dimensions();
    let mut surface =
        ImageSurface::create(Format::Rgb24, width as i32, height as i32).map_err(pdf_error)?;
    let stride = surface.stride() as usize;
    {
        let mut data = surface
            .data()
            .map_err(|e| ExportError::Image(format!("PDF rendering failed: {}", e)))?;
        for (x, y, pixel) in image.enumerate_pixels() {
            let offset = y as usize * stride + x as usize * 4;
            let [r, g, b] = pixel.0;
            // Cairo stores RGB24 as native-endian 0xXXRRGGBB.
            let word = 0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32;
            data[offset..offset + 4].copy_from_slice(&word.to_ne_bytes());
        }
    }
    surface.mark_dirty();
    Ok(surface)
}

fn pdf_error(err: cairo::Error) -> ExportError {
    ExportError::Image(format!("PDF rendering failed: {}", err))
}
