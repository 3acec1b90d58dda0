//! Configuration file support for drawover.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/drawover/config.toml`. Settings include brush defaults,
//! opacity behavior, export naming, UI preferences, the color palette and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod palette;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use palette::{Palette, PaletteEntry, PaletteSlot};
pub use types::{DrawingConfig, ExportConfig, TransparencyConfig, UiConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "navy"
/// eraser_width = 30.0
///
/// [transparency]
/// initial_opacity = 0.8
///
/// [export]
/// directory = "~/Pictures/drawings"
///
/// [keybindings]
/// quick_save = ["Ctrl+Q", "F5"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Brush, eraser and background settings
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Window opacity behavior
    #[serde(default)]
    pub transparency: TransparencyConfig,

    /// Export directory and file naming
    #[serde(default)]
    pub export: ExportConfig,

    /// UI display preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Palette hotkeys; replaces the built-in palette when present
    #[serde(default = "palette::default_palette")]
    pub palette: Vec<PaletteEntry>,

    /// Keyboard shortcuts for every overlay action
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            drawing: DrawingConfig::default(),
            transparency: TransparencyConfig::default(),
            export: ExportConfig::default(),
            ui: UiConfig::default(),
            palette: palette::default_palette(),
            keybindings: KeybindingsConfig::default(),
        }
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `brush_width`: 1.0 - 50.0
    /// - `eraser_width`: 1.0 - 200.0
    /// - `initial_opacity`, `reset_opacity`: 0.01 - 1.0
    /// - `step`: 0.01 - 0.5
    /// - `pdf_dpi`: 36.0 - 600.0
    /// - `font_size`: 8.0 - 32.0
    pub fn validate_and_clamp(&mut self) {
        clamp_field("brush_width", &mut self.drawing.brush_width, 1.0, 50.0);
        clamp_field("eraser_width", &mut self.drawing.eraser_width, 1.0, 200.0);
        clamp_field(
            "initial_opacity",
            &mut self.transparency.initial_opacity,
            0.01,
            1.0,
        );
        clamp_field("opacity step", &mut self.transparency.step, 0.01, 0.5);
        clamp_field(
            "reset_opacity",
            &mut self.transparency.reset_opacity,
            0.01,
            1.0,
        );
        clamp_field("pdf_dpi", &mut self.export.pdf_dpi, 36.0, 600.0);
        clamp_field("ui font_size", &mut self.ui.font_size, 8.0, 32.0);

        if self.export.filename_template.trim().is_empty() {
            warn!("Empty export filename_template, falling back to default");
            self.export.filename_template = ExportConfig::default().filename_template;
        } else if !crate::export::file::is_valid_template(&self.export.filename_template) {
            warn!(
                "Invalid export filename_template '{}', falling back to default",
                self.export.filename_template
            );
            self.export.filename_template = ExportConfig::default().filename_template;
        }

        if self.export.directory.trim().is_empty() {
            warn!("Empty export directory, falling back to default");
            self.export.directory = ExportConfig::default().directory;
        }

        if self.drawing.background.try_to_color().is_none() {
            warn!("Unknown background color, falling back to white");
            self.drawing.background = DrawingConfig::default().background;
        }

        if self.palette.is_empty() {
            warn!("Palette is empty, restoring the built-in palette");
            self.palette = palette::default_palette();
        }
    }

    /// Resolved palette (invalid entries dropped).
    pub fn resolved_palette(&self) -> Palette {
        Palette::from_entries(&self.palette)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/drawover/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("drawover");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, or returns defaults if it does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_field(name: &str, value: &mut f64, min: f64, max: f64) {
    if value.is_nan() {
        warn!("Invalid {} (NaN), using {:.2}", name, min);
        *value = min;
    } else if !(min..=max).contains(value) {
        warn!(
            "Invalid {} {:.2}, clamping to {:.2}-{:.2} range",
            name, *value, min, max
        );
        *value = value.clamp(min, max);
    }
}
