//! Export of the drawing surface to files and the clipboard.
//!
//! The pipeline captures the on-screen drawing area, then writes it as an
//! image chosen in a save dialog, a quick PNG, a PDF page, or a clipboard PNG.

pub mod clipboard;
pub mod dependencies;
pub mod exporter;
pub mod file;
pub mod format;
pub mod pdf;
pub mod source;
pub mod types;

pub use dependencies::{
    ExportClipboard, ExportDependencies, NativeSaveDialog, SaveDialog, ScreenSource,
};
pub use exporter::Exporter;
pub use file::ExportSettings;
pub use format::ImageFormat;
pub use types::{ExportError, ExportKind, ExportOutcome, ScreenRegion};

#[cfg(test)]
mod tests;
