//! Image formats offered by the save dialog.

use super::types::ExportError;
use image::{DynamicImage, ImageFormat as CodecFormat, Rgb, RgbImage, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Raster formats a drawing can be saved as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageFormat {
    /// Looks up a format by file extension (case-insensitive, no leading dot).
    pub fn from_extension(extension: &str) -> Result<Self, ExportError> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "gif" => Ok(ImageFormat::Gif),
            "bmp" => Ok(ImageFormat::Bmp),
            _ => Err(ExportError::UnsupportedFormat(extension.to_string())),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
        }
    }

    fn codec(self) -> CodecFormat {
        match self {
            ImageFormat::Png => CodecFormat::Png,
            ImageFormat::Jpeg => CodecFormat::Jpeg,
            ImageFormat::Gif => CodecFormat::Gif,
            ImageFormat::Bmp => CodecFormat::Bmp,
        }
    }
}

/// Picks the output format from the chosen path.
///
/// A path without an extension gets `.png` appended.
pub fn resolve_output_path(path: &Path) -> Result<(PathBuf, ImageFormat), ExportError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if !ext.is_empty() => {
            let format = ImageFormat::from_extension(ext)?;
            Ok((path.to_path_buf(), format))
        }
        _ => {
            let mut with_ext = path.as_os_str().to_owned();
            with_ext.push(".png");
            Ok((PathBuf::from(with_ext), ImageFormat::Png))
        }
    }
}

/// Composites the image over opaque white.
pub fn flatten_on_white(image: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, a] = image.get_pixel(x, y).0;
        let alpha = a as u32;
        let blend = |c: u8| ((c as u32 * alpha + 255 * (255 - alpha) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Encodes the image in `format`.
///
/// JPEG has no alpha channel, so the image is flattened first.
pub fn encode(image: &RgbaImage, format: ImageFormat) -> Result<Vec<u8>, ExportError> {
    let dynamic = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(flatten_on_white(image)),
        _ => DynamicImage::ImageRgba8(image.clone()),
    };
    let mut bytes = Vec::new();
    dynamic.write_to(&mut Cursor::new(&mut bytes), format.codec())?;
    log::debug!(
        "Encoded {}x{} image as {:?} ({} bytes)",
        image.width(),
        image.height(),
        format,
        bytes.len()
    );
    Ok(bytes)
}

/// PNG bytes of an opaque RGB image.
pub fn encode_rgb_png(image: &RgbImage) -> Result<Vec<u8>, ExportError> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), CodecFormat::Png)?;
    Ok(bytes)
}
