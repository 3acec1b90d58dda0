//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the brush and eraser when the overlay first opens. The current
/// color can be changed at runtime with the palette keys.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial brush color - a named color or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Brush stroke width in pixels (valid range: 1.0 - 50.0)
    #[serde(default = "default_brush_width")]
    pub brush_width: f64,

    /// Eraser stroke width in pixels (valid range: 1.0 - 200.0)
    #[serde(default = "default_eraser_width")]
    pub eraser_width: f64,

    /// Canvas background color; the eraser paints with this color
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            brush_width: default_brush_width(),
            eraser_width: default_eraser_width(),
            background: default_background(),
        }
    }
}

/// Window opacity settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TransparencyConfig {
    /// Opacity applied at startup (valid range: 0.01 - 1.0)
    #[serde(default = "default_initial_opacity")]
    pub initial_opacity: f64,

    /// Amount added or removed by the increase/decrease keys (valid range: 0.01 - 0.5)
    #[serde(default = "default_opacity_step")]
    pub step: f64,

    /// Opacity restored by the reset key and the "Reset" button (valid range: 0.01 - 1.0)
    #[serde(default = "default_reset_opacity")]
    pub reset_opacity: f64,
}

impl Default for TransparencyConfig {
    fn default() -> Self {
        Self {
            initial_opacity: default_initial_opacity(),
            step: default_opacity_step(),
            reset_opacity: default_reset_opacity(),
        }
    }
}

/// Export settings.
///
/// Controls where exported images land and how they are named.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Output directory (relative paths resolve against the working directory; `~` expands)
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Filename template without extension (chrono format: %Y, %m, %d, %H, %M, %S)
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// Resolution assumed when converting pixels to PDF points (valid range: 36 - 600)
    #[serde(default = "default_pdf_dpi")]
    pub pdf_dpi: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
            pdf_dpi: default_pdf_dpi(),
        }
    }
}

/// UI display preferences.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UiConfig {
    /// Show hover tooltips on the swatch, buttons, opacity panel and canvas
    #[serde(default = "default_show_tooltips")]
    pub show_tooltips: bool,

    /// Mirror export confirmations and errors as desktop notifications
    #[serde(default = "default_desktop_notifications")]
    pub desktop_notifications: bool,

    /// Font size for menus, labels and dialogs (valid range: 8.0 - 32.0)
    #[serde(default = "default_ui_font_size")]
    pub font_size: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_tooltips: default_show_tooltips(),
            desktop_notifications: default_desktop_notifications(),
            font_size: default_ui_font_size(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_brush_width() -> f64 {
    3.0
}

fn default_eraser_width() -> f64 {
    20.0
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_initial_opacity() -> f64 {
    1.0
}

fn default_opacity_step() -> f64 {
    0.05
}

fn default_reset_opacity() -> f64 {
    0.10
}

fn default_export_directory() -> String {
    "drawings".to_string()
}

fn default_filename_template() -> String {
    "drawing_%Y%m%d_%H%M%S".to_string()
}

fn default_pdf_dpi() -> f64 {
    100.0
}

fn default_show_tooltips() -> bool {
    true
}

fn default_desktop_notifications() -> bool {
    false
}

fn default_ui_font_size() -> f64 {
    13.0
}
