//! Output directory and filename helpers.

use super::types::ExportError;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

const FALLBACK_TEMPLATE: &str = "drawing_%Y%m%d_%H%M%S";

/// Where exports are written and how they are named.
#[derive(Debug, Clone)]
pub struct ExportSettings {
    /// Directory for quick saves, PDFs and the save dialog's starting point.
    pub directory: PathBuf,
    /// Filename template (supports chrono format specifiers), without extension.
    pub filename_template: String,
    /// Resolution used to size PDF pages.
    pub pdf_dpi: f64,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::from_config(&crate::config::ExportConfig::default())
    }
}

impl ExportSettings {
    pub fn from_config(config: &crate::config::ExportConfig) -> Self {
        Self {
            directory: expand_tilde(&config.directory),
            filename_template: config.filename_template.clone(),
            pdf_dpi: config.pdf_dpi,
        }
    }

    /// Timestamped path inside the export directory with the given extension.
    pub fn timestamped_path(&self, extension: &str) -> PathBuf {
        self.directory
            .join(generate_filename(&self.filename_template, extension))
    }
}

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `extension` - File extension (e.g., "png")
///
/// A template chrono cannot format falls back to the default naming scheme.
pub fn generate_filename(template: &str, extension: &str) -> String {
    let now = Local::now();
    let filename = format_timestamp(&now, template).unwrap_or_else(|| {
        log::warn!(
            "Invalid filename template '{}', using '{}'",
            template,
            FALLBACK_TEMPLATE
        );
        format_timestamp(&now, FALLBACK_TEMPLATE).unwrap_or_else(|| "drawing".to_string())
    });
    format!("{}.{}", filename, extension)
}

/// Whether every format specifier in `template` is one chrono understands.
pub fn is_valid_template(template: &str) -> bool {
    !StrftimeItems::new(template).any(|item| matches!(item, Item::Error))
}

fn format_timestamp(now: &DateTime<Local>, template: &str) -> Option<String> {
    let mut formatted = String::new();
    write!(formatted, "{}", now.format(template)).ok()?;
    Some(formatted)
}

/// Ensure the export directory exists, creating it if necessary.
pub fn ensure_directory_exists(directory: &Path) -> Result<(), ExportError> {
    if !directory.exists() {
        log::info!("Creating export directory: {}", directory.display());
        fs::create_dir_all(directory).map_err(|e| ExportError::write(directory, e))?;
    }
    Ok(())
}

/// Write encoded bytes to `path`.
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    log::info!("Writing {} ({} bytes)", path.display(), bytes.len());
    fs::write(path, bytes).map_err(|e| ExportError::write(path, e))?;
    log::debug!("File written: {}", path.display());
    Ok(())
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
