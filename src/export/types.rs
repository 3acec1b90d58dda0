//! Data types for drawing export.

use std::path::PathBuf;
use thiserror::Error;

/// Which export the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    /// Save dialog, format chosen by extension.
    Interactive,
    /// Timestamped PNG in the export directory, no prompt.
    Quick,
    /// Timestamped single-page PDF in the export directory.
    Pdf,
    /// PNG on the Wayland clipboard.
    Clipboard,
}

/// Screen-space rectangle of the drawing surface, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRegion {
    /// Geometry string in the `"x,y wxh"` form grim expects.
    pub fn geometry(&self) -> String {
        format!("{},{} {}x{}", self.x, self.y, self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Result of a completed (or cancelled) export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// File written to `path`.
    Saved { kind: ExportKind, path: PathBuf },
    /// Image placed on the clipboard.
    Copied,
    /// The user dismissed the save dialog.
    Cancelled,
}

/// Errors that can occur while exporting the drawing.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Could not write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Screen capture failed: {0}")]
    Capture(String),

    #[error("Image processing error: {0}")]
    Image(String),

    #[error("Unsupported image format '.{0}' (use png, jpg, jpeg, gif or bmp)")]
    UnsupportedFormat(String),

    #[error("Clipboard is not available: {0}")]
    ClipboardUnavailable(String),

    #[error("Clipboard operation failed: {0}")]
    Clipboard(String),
}

impl ExportError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::FileWrite {
            path: path.into(),
            source,
        }
    }
}

impl From<image::ImageError> for ExportError {
    fn from(err: image::ImageError) -> Self {
        ExportError::Image(err.to_string())
    }
}
