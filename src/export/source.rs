//! Screen capture of the drawing surface via `grim`.

use super::types::{ExportError, ScreenRegion};
use image::RgbaImage;
use std::io::ErrorKind;
use std::process::Command;

/// Captures `region` of the screen and decodes it.
pub fn capture_region(region: ScreenRegion) -> Result<RgbaImage, ExportError> {
    if region.is_empty() {
        return Err(ExportError::Capture(
            "drawing surface has no visible area".to_string(),
        ));
    }

    let geometry = region.geometry();
    log::debug!("Capturing screen region {}", geometry);

    let output = Command::new("grim")
        .arg("-g")
        .arg(&geometry)
        .arg("-")
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                ExportError::Capture("grim is not installed (required for export)".to_string())
            }
            _ => ExportError::Capture(format!("Failed to run grim: {}", e)),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ExportError::Capture(format!(
            "grim failed: {}",
            stderr.trim()
        )));
    }

    if output.stdout.is_empty() {
        return Err(ExportError::Capture("grim returned empty image data".to_string()));
    }

    log::debug!("Captured {} bytes from grim", output.stdout.len());
    decode_capture(&output.stdout)
}

/// Decodes captured image bytes into RGBA pixels.
pub fn decode_capture(bytes: &[u8]) -> Result<RgbaImage, ExportError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_region_is_rejected_before_spawning() {
        let region = ScreenRegion {
            x: 0,
            y: 24,
            width: 0,
            height: 100,
        };
        assert!(matches!(
            capture_region(region),
            Err(ExportError::Capture(_))
        ));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(matches!(
            decode_capture(b"not an image"),
            Err(ExportError::Image(_))
        ));
    }
}
