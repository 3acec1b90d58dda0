use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;

use crate::export::{
    clipboard, source,
    types::{ExportError, ScreenRegion},
};

/// Abstraction over how the drawing surface's pixels are captured.
pub trait ScreenSource: Send + Sync {
    fn capture(&self, region: ScreenRegion) -> Result<RgbaImage, ExportError>;
}

/// Abstraction over the save-as prompt. `None` means the user cancelled.
pub trait SaveDialog: Send + Sync {
    fn pick_path(&self, directory: &Path, default_name: &str) -> Option<PathBuf>;
}

/// Abstraction over copying PNG bytes to the clipboard.
pub trait ExportClipboard: Send + Sync {
    fn copy(&self, png: &[u8]) -> Result<(), ExportError>;
}

/// Bundle of dependencies used by the export pipeline. Each component can be mocked in tests.
#[derive(Clone)]
pub struct ExportDependencies {
    pub source: Arc<dyn ScreenSource>,
    pub dialog: Arc<dyn SaveDialog>,
    pub clipboard: Arc<dyn ExportClipboard>,
}

impl Default for ExportDependencies {
    fn default() -> Self {
        Self {
            source: Arc::new(GrimSource),
            dialog: Arc::new(NativeSaveDialog),
            clipboard: Arc::new(WaylandClipboard),
        }
    }
}

struct GrimSource;
pub struct NativeSaveDialog;
struct WaylandClipboard;

impl ScreenSource for GrimSource {
    fn capture(&self, region: ScreenRegion) -> Result<RgbaImage, ExportError> {
        source::capture_region(region)
    }
}

impl SaveDialog for NativeSaveDialog {
    fn pick_path(&self, directory: &Path, default_name: &str) -> Option<PathBuf> {
        rfd::FileDialog::new()
            .set_title("Save drawing")
            .set_directory(directory)
            .set_file_name(default_name)
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .add_filter("GIF", &["gif"])
            .add_filter("BMP", &["bmp"])
            .add_filter("All files", &["*"])
            .save_file()
    }
}

impl ExportClipboard for WaylandClipboard {
    fn copy(&self, png: &[u8]) -> Result<(), ExportError> {
        clipboard::copy_png(png)
    }
}
