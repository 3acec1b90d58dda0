//! Utility functions for color names and rectangle geometry.
//!
//! This module provides:
//! - Name-to-color mapping used by the configuration system
//! - Color-to-name lookup for status text and the help window
//! - The [`Rect`] helper used for damage tracking and widget hit-testing

use crate::draw::{Color, color::NAMED_COLORS};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
/// Matching is case-insensitive; "grey" is accepted as an alias of "gray".
///
/// # Returns
/// - `Some(Color)` if the name matches a known color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    let lower = name.trim().to_lowercase();
    let lookup = if lower == "grey" { "gray" } else { lower.as_str() };
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == lookup)
        .map(|(_, color)| *color)
}

/// Maps a Color value to its name, or "custom" when it is not a named color.
///
/// Comparison is done on 8-bit channels so colors loaded from RGB config
/// arrays still resolve to their names.
pub fn color_to_name(color: &Color) -> &'static str {
    let rgb = color.to_rgb8();
    NAMED_COLORS
        .iter()
        .find(|(_, candidate)| candidate.to_rgb8() == rgb)
        .map(|(name, _)| *name)
        .unwrap_or("custom")
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle helper used for dirty regions and widget bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Bounding box of a segment between two points, grown by half the stroke width.
    pub fn around_segment(from: (i32, i32), to: (i32, i32), width: f64) -> Option<Self> {
        let pad = (width / 2.0).ceil() as i32 + 1;
        Self::from_min_max(
            from.0.min(to.0) - pad,
            from.1.min(to.1) - pad,
            from.0.max(to.0) + pad + 1,
            from.1.max(to.1) + pad + 1,
        )
    }

    /// Returns true if the point lies inside the rectangle (max edges exclusive).
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }

    /// Returns a copy moved by the given offset.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Clamps the rectangle to `[0, width) x [0, height)`, returning `None` if nothing remains.
    pub fn clamped_to(&self, width: i32, height: i32) -> Option<Self> {
        let min_x = self.x.clamp(0, width);
        let min_y = self.y.clamp(0, height);
        let max_x = (self.x + self.width).clamp(0, width);
        let max_y = (self.y + self.height).clamp(0, height);
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
