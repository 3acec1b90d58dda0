//! Key-to-color palette configuration.
//!
//! Users specify palette entries in config.toml as:
//! ```toml
//! [[palette]]
//! key = "1"
//! color = "red"
//!
//! [[palette]]
//! key = "z"
//! color = [255, 128, 0]
//! ```
//! A `[[palette]]` table replaces the whole default palette.

use super::enums::ColorSpec;
use crate::draw::Color;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One palette hotkey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PaletteEntry {
    /// Single character key that selects the color
    pub key: String,
    /// Color selected by the key
    pub color: ColorSpec,
}

impl PaletteEntry {
    fn new(key: char, color: &str) -> Self {
        Self {
            key: key.to_string(),
            color: ColorSpec::from(color),
        }
    }
}

/// Resolved palette in config order.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<PaletteSlot>,
}

/// A resolved palette key.
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteSlot {
    pub key: char,
    pub color: Color,
    /// Display name used by the help window (color name or `#RRGGBB`)
    pub label: String,
}

impl Palette {
    /// Resolves config entries, skipping invalid or duplicate keys with a warning.
    pub fn from_entries(entries: &[PaletteEntry]) -> Self {
        let mut slots: Vec<PaletteSlot> = Vec::with_capacity(entries.len());

        for entry in entries {
            let mut chars = entry.key.chars();
            let key = match (chars.next(), chars.next()) {
                (Some(key), None) => key.to_ascii_lowercase(),
                _ => {
                    warn!(
                        "Palette key '{}' must be a single character, skipping",
                        entry.key
                    );
                    continue;
                }
            };

            if slots.iter().any(|slot| slot.key == key) {
                warn!("Duplicate palette key '{}', keeping the first entry", key);
                continue;
            }

            let Some(color) = entry.color.try_to_color() else {
                warn!("Unknown palette color for key '{}', skipping", key);
                continue;
            };

            let label = match &entry.color {
                ColorSpec::Name(name) => name.to_lowercase(),
                ColorSpec::Rgb([r, g, b]) => format!("#{r:02X}{g:02X}{b:02X}"),
            };

            slots.push(PaletteSlot { key, color, label });
        }

        Self { entries: slots }
    }

    /// Looks up the color bound to `key` (case-insensitive).
    pub fn color_for(&self, key: char) -> Option<Color> {
        let key = key.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|slot| slot.key == key)
            .map(|slot| slot.color)
    }

    pub fn slots(&self) -> &[PaletteSlot] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_entries(&default_palette())
    }
}

/// The 19 built-in palette keys.
pub fn default_palette() -> Vec<PaletteEntry> {
    vec![
        PaletteEntry::new('1', "red"),
        PaletteEntry::new('2', "green"),
        PaletteEntry::new('3', "blue"),
        PaletteEntry::new('4', "yellow"),
        PaletteEntry::new('5', "black"),
        PaletteEntry::new('6', "orange"),
        PaletteEntry::new('7', "purple"),
        PaletteEntry::new('8', "pink"),
        PaletteEntry::new('9', "cyan"),
        PaletteEntry::new('q', "brown"),
        PaletteEntry::new('w', "gray"),
        PaletteEntry::new('e', "gold"),
        PaletteEntry::new('r', "silver"),
        PaletteEntry::new('t', "maroon"),
        PaletteEntry::new('y', "olive"),
        PaletteEntry::new('u', "navy"),
        PaletteEntry::new('i', "teal"),
        PaletteEntry::new('o', "lime"),
        PaletteEntry::new('p', "magenta"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, MAGENTA, NAVY, RED};

    #[test]
    fn default_palette_has_nineteen_keys() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 19);
        assert_eq!(palette.color_for('1'), Some(RED));
        assert_eq!(palette.color_for('5'), Some(BLACK));
        assert_eq!(palette.color_for('u'), Some(NAVY));
        assert_eq!(palette.color_for('p'), Some(MAGENTA));
        assert_eq!(palette.color_for('z'), None);
    }

    #[test]
    fn lookups_ignore_letter_case() {
        let palette = Palette::default();
        assert_eq!(palette.color_for('U'), Some(NAVY));
    }

    #[test]
    fn invalid_and_duplicate_entries_are_skipped() {
        let palette = Palette::from_entries(&[
            PaletteEntry::new('1', "red"),
            PaletteEntry {
                key: "12".to_string(),
                color: ColorSpec::from("blue"),
            },
            PaletteEntry::new('1', "navy"),
            PaletteEntry::new('x', "chartreuse"),
            PaletteEntry {
                key: "z".to_string(),
                color: ColorSpec::Rgb([255, 128, 0]),
            },
        ]);

        assert_eq!(palette.len(), 2);
        assert_eq!(palette.color_for('1'), Some(RED));
        assert_eq!(palette.slots()[1].label, "#FF8000");
    }
}
