use super::dependencies::ExportDependencies;
use super::file::{self, ExportSettings};
use super::format::{self, ImageFormat};
use super::pdf;
use super::types::{ExportError, ExportKind, ExportOutcome, ScreenRegion};
use std::path::PathBuf;

/// Runs exports of the drawing surface.
///
/// Every export captures the screen region first, so the result shows
/// exactly what was on screen when the action fired. None of the exports
/// touch drawing or opacity state.
pub struct Exporter {
    settings: ExportSettings,
    dependencies: ExportDependencies,
}

impl Exporter {
    pub fn new(settings: ExportSettings) -> Self {
        Self::with_dependencies(settings, ExportDependencies::default())
    }

    pub fn with_dependencies(settings: ExportSettings, dependencies: ExportDependencies) -> Self {
        Self {
            settings,
            dependencies,
        }
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    /// Dispatches to the export matching `kind`.
    pub fn export(
        &self,
        kind: ExportKind,
        region: ScreenRegion,
    ) -> Result<ExportOutcome, ExportError> {
        log::info!("Starting {:?} export of region {}", kind, region.geometry());
        let result = match kind {
            ExportKind::Interactive => self.export_interactive(region),
            ExportKind::Quick => self.quick_export(region),
            ExportKind::Pdf => self.export_pdf(region),
            ExportKind::Clipboard => self.export_to_clipboard(region),
        };
        match &result {
            Ok(outcome) => log::info!("Export finished: {:?}", outcome),
            Err(e) => log::warn!("Export failed: {}", e),
        }
        result
    }

    /// Prompts for a path and writes PNG/JPEG/GIF/BMP based on its extension.
    pub fn export_interactive(&self, region: ScreenRegion) -> Result<ExportOutcome, ExportError> {
        let image = self.dependencies.source.capture(region)?;

        file::ensure_directory_exists(&self.settings.directory)?;
        let default_name = file::generate_filename(
            &self.settings.filename_template,
            ImageFormat::Png.extension(),
        );

        let Some(chosen) = self
            .dependencies
            .dialog
            .pick_path(&self.settings.directory, &default_name)
        else {
            log::info!("Save dialog cancelled");
            return Ok(ExportOutcome::Cancelled);
        };

        let (path, image_format) = format::resolve_output_path(&chosen)?;
        let bytes = format::encode(&image, image_format)?;
        file::write_bytes(&path, &bytes)?;

        Ok(ExportOutcome::Saved {
            kind: ExportKind::Interactive,
            path,
        })
    }

    /// Writes a timestamped PNG to the export directory without prompting.
    pub fn quick_export(&self, region: ScreenRegion) -> Result<ExportOutcome, ExportError> {
        let image = self.dependencies.source.capture(region)?;
        let bytes = format::encode(&image, ImageFormat::Png)?;
        let path = self.write_timestamped(ImageFormat::Png.extension(), &bytes)?;
        Ok(ExportOutcome::Saved {
            kind: ExportKind::Quick,
            path,
        })
    }

    /// Writes a single-page PDF to the export directory.
    pub fn export_pdf(&self, region: ScreenRegion) -> Result<ExportOutcome, ExportError> {
        let image = self.dependencies.source.capture(region)?;
        let flattened = format::flatten_on_white(&image);
        let bytes = pdf::render_pdf(&flattened, self.settings.pdf_dpi)?;
        let path = self.write_timestamped("pdf", &bytes)?;
        Ok(ExportOutcome::Saved {
            kind: ExportKind::Pdf,
            path,
        })
    }

    /// Places the flattened drawing on the clipboard as PNG.
    pub fn export_to_clipboard(&self, region: ScreenRegion) -> Result<ExportOutcome, ExportError> {
        let image = self.dependencies.source.capture(region)?;
        let flattened = format::flatten_on_white(&image);
        let bytes = format::encode_rgb_png(&flattened)?;
        self.dependencies.clipboard.copy(&bytes)?;
        Ok(ExportOutcome::Copied)
    }

    fn write_timestamped(&self, extension: &str, bytes: &[u8]) -> Result<PathBuf, ExportError> {
        file::ensure_directory_exists(&self.settings.directory)?;
        let path = self.settings.timestamped_path(extension);
        file::write_bytes(&path, bytes)?;
        Ok(path)
    }
}
