//! RGBA color type and the named colors available to the palette.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use drawover::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// let teal = Color::from_rgb8(0, 128, 128);
/// assert_eq!(teal.a, 1.0);
/// # let _ = red;
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Returns the color as 8-bit RGB channels, rounding each component.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Rough perceived brightness, used to pick readable label colors.
    pub fn luminance(self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }
}

// ============================================================================
// Named colors (CSS / Tk 8.6 values)
// ============================================================================

pub const RED: Color = Color::from_rgb8(255, 0, 0);
pub const GREEN: Color = Color::from_rgb8(0, 128, 0);
pub const BLUE: Color = Color::from_rgb8(0, 0, 255);
pub const YELLOW: Color = Color::from_rgb8(255, 255, 0);
pub const BLACK: Color = Color::from_rgb8(0, 0, 0);
pub const ORANGE: Color = Color::from_rgb8(255, 165, 0);
pub const PURPLE: Color = Color::from_rgb8(128, 0, 128);
pub const PINK: Color = Color::from_rgb8(255, 192, 203);
pub const CYAN: Color = Color::from_rgb8(0, 255, 255);
pub const BROWN: Color = Color::from_rgb8(165, 42, 42);
pub const GRAY: Color = Color::from_rgb8(128, 128, 128);
pub const GOLD: Color = Color::from_rgb8(255, 215, 0);
pub const SILVER: Color = Color::from_rgb8(192, 192, 192);
pub const MAROON: Color = Color::from_rgb8(128, 0, 0);
pub const OLIVE: Color = Color::from_rgb8(128, 128, 0);
pub const NAVY: Color = Color::from_rgb8(0, 0, 128);
pub const TEAL: Color = Color::from_rgb8(0, 128, 128);
pub const LIME: Color = Color::from_rgb8(0, 255, 0);
pub const MAGENTA: Color = Color::from_rgb8(255, 0, 255);
pub const WHITE: Color = Color::from_rgb8(255, 255, 255);

/// Every color name understood by the config file, in palette order.
pub const NAMED_COLORS: [(&str, Color); 20] = [
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("yellow", YELLOW),
    ("black", BLACK),
    ("orange", ORANGE),
    ("purple", PURPLE),
    ("pink", PINK),
    ("cyan", CYAN),
    ("brown", BROWN),
    ("gray", GRAY),
    ("gold", GOLD),
    ("silver", SILVER),
    ("maroon", MAROON),
    ("olive", OLIVE),
    ("navy", NAVY),
    ("teal", TEAL),
    ("lime", LIME),
    ("magenta", MAGENTA),
    ("white", WHITE),
];
