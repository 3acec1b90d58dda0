//! Keybinding configuration types and parsing.
//!
//! This module defines the configurable keybinding system that allows users
//! to customize keyboard shortcuts for every overlay action. Palette keys are
//! configured separately (see [`super::palette`]).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// All possible actions that can be bound to keys.
///
/// Declaration order is dispatch order: when two bindings match the same key
/// press, the action declared first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    // Opacity adjustment
    DecreaseOpacity,
    IncreaseOpacity,
    ResetOpacity,
    ToggleOpacity,

    // Dialogs
    ShowOpacityInfo,
    ToggleHelp,

    // Window
    ToggleMinimize,
    Exit,

    // Tools
    EraserOn,
    EraserOff,
    ClearCanvas,

    // Export
    SaveAs,
    CopyToClipboard,
    QuickSave,
    ExportPdf,
}

impl Action {
    /// Every action in dispatch order.
    pub const ALL: [Action; 15] = [
        Action::DecreaseOpacity,
        Action::IncreaseOpacity,
        Action::ResetOpacity,
        Action::ToggleOpacity,
        Action::ShowOpacityInfo,
        Action::ToggleHelp,
        Action::ToggleMinimize,
        Action::Exit,
        Action::EraserOn,
        Action::EraserOff,
        Action::ClearCanvas,
        Action::SaveAs,
        Action::CopyToClipboard,
        Action::QuickSave,
        Action::ExportPdf,
    ];

    /// Actions checked before palette keys; the rest are checked after.
    pub fn precedes_palette(self) -> bool {
        matches!(
            self,
            Action::DecreaseOpacity
                | Action::IncreaseOpacity
                | Action::ResetOpacity
                | Action::ToggleOpacity
                | Action::ShowOpacityInfo
                | Action::ToggleHelp
                | Action::ToggleMinimize
                | Action::Exit
        )
    }

    /// Human-readable label used by menus and the help window.
    pub fn label(self) -> &'static str {
        match self {
            Action::DecreaseOpacity => "Decrease opacity",
            Action::IncreaseOpacity => "Increase opacity",
            Action::ResetOpacity => "Reset opacity",
            Action::ToggleOpacity => "Toggle opacity mode",
            Action::ShowOpacityInfo => "Opacity control",
            Action::ToggleHelp => "Open help",
            Action::ToggleMinimize => "Minimize / restore",
            Action::Exit => "Exit",
            Action::EraserOn => "Eraser on",
            Action::EraserOff => "Eraser off",
            Action::ClearCanvas => "Clear canvas",
            Action::SaveAs => "Save as...",
            Action::CopyToClipboard => "Copy to clipboard",
            Action::QuickSave => "Quick save",
            Action::ExportPdf => "Save as PDF",
        }
    }
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+S", "Alt+F4" or "+".
    /// Modifiers can appear in any order and spaces around '+' are allowed.
    /// Single-character keys are normalized to lowercase.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        // Normalize by removing spaces around '+'
        let s_normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in s_normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "+" on its own splits into two empty parts, as does a trailing "++".
        let key = key_parts.join("+");
        let key = if key.chars().all(|c| c == '+') {
            "+".to_string()
        } else {
            key
        };

        let key = if key.chars().count() == 1 {
            key.to_lowercase()
        } else {
            key
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches a key press.
    ///
    /// Ctrl and Alt must match exactly. Shift is only required when the
    /// binding names it; otherwise it is ignored so symbols typed with Shift
    /// (like `+` or `]` on some layouts) still match.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.alt == alt
            && (!self.shift || shift)
    }

    /// Accelerator label, e.g. `Ctrl+S` or `[`.
    pub fn label(&self) -> String {
        let mut label = String::new();
        if self.ctrl {
            label.push_str("Ctrl+");
        }
        if self.alt {
            label.push_str("Alt+");
        }
        if self.shift {
            label.push_str("Shift+");
        }
        if self.key.chars().count() == 1 {
            label.push_str(&self.key.to_uppercase());
        } else if self.key.eq_ignore_ascii_case("escape") {
            label.push_str("Esc");
        } else {
            label.push_str(&self.key);
        }
        label
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings. Users specify them in config.toml as:
/// ```toml
/// [keybindings]
/// decrease_opacity = ["[", "-"]
/// save_as = ["Ctrl+S"]
/// clear_canvas = ["C"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_decrease_opacity")]
    pub decrease_opacity: Vec<String>,

    #[serde(default = "default_increase_opacity")]
    pub increase_opacity: Vec<String>,

    #[serde(default = "default_reset_opacity")]
    pub reset_opacity: Vec<String>,

    #[serde(default = "default_toggle_opacity")]
    pub toggle_opacity: Vec<String>,

    #[serde(default = "default_show_opacity_info")]
    pub show_opacity_info: Vec<String>,

    #[serde(default = "default_toggle_help")]
    pub toggle_help: Vec<String>,

    #[serde(default = "default_toggle_minimize")]
    pub toggle_minimize: Vec<String>,

    #[serde(default = "default_exit")]
    pub exit: Vec<String>,

    #[serde(default = "default_eraser_on")]
    pub eraser_on: Vec<String>,

    #[serde(default = "default_eraser_off")]
    pub eraser_off: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_save_as")]
    pub save_as: Vec<String>,

    #[serde(default = "default_copy_to_clipboard")]
    pub copy_to_clipboard: Vec<String>,

    #[serde(default = "default_quick_save")]
    pub quick_save: Vec<String>,

    #[serde(default = "default_export_pdf")]
    pub export_pdf: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            decrease_opacity: default_decrease_opacity(),
            increase_opacity: default_increase_opacity(),
            reset_opacity: default_reset_opacity(),
            toggle_opacity: default_toggle_opacity(),
            show_opacity_info: default_show_opacity_info(),
            toggle_help: default_toggle_help(),
            toggle_minimize: default_toggle_minimize(),
            exit: default_exit(),
            eraser_on: default_eraser_on(),
            eraser_off: default_eraser_off(),
            clear_canvas: default_clear_canvas(),
            save_as: default_save_as(),
            copy_to_clipboard: default_copy_to_clipboard(),
            quick_save: default_quick_save(),
            export_pdf: default_export_pdf(),
        }
    }
}

impl KeybindingsConfig {
    fn bindings_for(&self, action: Action) -> &[String] {
        match action {
            Action::DecreaseOpacity => &self.decrease_opacity,
            Action::IncreaseOpacity => &self.increase_opacity,
            Action::ResetOpacity => &self.reset_opacity,
            Action::ToggleOpacity => &self.toggle_opacity,
            Action::ShowOpacityInfo => &self.show_opacity_info,
            Action::ToggleHelp => &self.toggle_help,
            Action::ToggleMinimize => &self.toggle_minimize,
            Action::Exit => &self.exit,
            Action::EraserOn => &self.eraser_on,
            Action::EraserOff => &self.eraser_off,
            Action::ClearCanvas => &self.clear_canvas,
            Action::SaveAs => &self.save_as,
            Action::CopyToClipboard => &self.copy_to_clipboard,
            Action::QuickSave => &self.quick_save,
            Action::ExportPdf => &self.export_pdf,
        }
    }

    /// Build the ordered binding table used by the dispatcher.
    ///
    /// Entries follow [`Action::ALL`] order. Returns an error if any keybinding
    /// string is invalid or if the same binding is assigned twice.
    pub fn build_action_map(&self) -> Result<Vec<(KeyBinding, Action)>, String> {
        let mut bindings: Vec<(KeyBinding, Action)> = Vec::new();

        for action in Action::ALL {
            for binding_str in self.bindings_for(action) {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some((_, existing_action)) =
                    bindings.iter().find(|(existing, _)| *existing == binding)
                {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing_action, action
                    ));
                }
                bindings.push((binding, action));
            }
        }

        Ok(bindings)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn default_decrease_opacity() -> Vec<String> {
    vec!["[".to_string(), "-".to_string()]
}

fn default_increase_opacity() -> Vec<String> {
    vec!["]".to_string(), "+".to_string()]
}

fn default_reset_opacity() -> Vec<String> {
    vec!["0".to_string()]
}

fn default_toggle_opacity() -> Vec<String> {
    vec!["A".to_string()]
}

fn default_show_opacity_info() -> Vec<String> {
    vec!["F2".to_string()]
}

fn default_toggle_help() -> Vec<String> {
    vec!["F1".to_string()]
}

fn default_toggle_minimize() -> Vec<String> {
    vec!["Escape".to_string()]
}

fn default_exit() -> Vec<String> {
    vec!["Alt+F4".to_string()]
}

fn default_eraser_on() -> Vec<String> {
    vec!["S".to_string()]
}

fn default_eraser_off() -> Vec<String> {
    vec!["D".to_string()]
}

fn default_clear_canvas() -> Vec<String> {
    vec!["C".to_string()]
}

fn default_save_as() -> Vec<String> {
    vec!["Ctrl+S".to_string()]
}

fn default_copy_to_clipboard() -> Vec<String> {
    vec!["Ctrl+C".to_string()]
}

fn default_quick_save() -> Vec<String> {
    vec!["Ctrl+Q".to_string()]
}

fn default_export_pdf() -> Vec<String> {
    vec!["Ctrl+P".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_ctrl_key() {
        let binding = KeyBinding::parse("Ctrl+S").unwrap();
        assert_eq!(binding.key, "s");
        assert!(binding.ctrl);
        assert!(!binding.shift);
        assert!(!binding.alt);
    }

    #[test]
    fn test_parse_plus_key() {
        let plain = KeyBinding::parse("+").unwrap();
        assert_eq!(plain.key, "+");
        assert!(!plain.ctrl);

        let ctrl_plus = KeyBinding::parse("Ctrl++").unwrap();
        assert_eq!(ctrl_plus.key, "+");
        assert!(ctrl_plus.ctrl);
    }

    #[test]
    fn test_parse_with_spaces_and_any_order() {
        let binding1 = KeyBinding::parse("Ctrl + Alt + W").unwrap();
        let binding2 = KeyBinding::parse("Alt+Ctrl+w").unwrap();
        assert_eq!(binding1, binding2);
        assert!(binding1.ctrl && binding1.alt);
    }

    #[test]
    fn test_parse_rejects_modifier_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn test_matches_requires_exact_ctrl_and_alt() {
        let binding = KeyBinding::parse("Ctrl+S").unwrap();
        assert!(binding.matches("s", true, false, false));
        assert!(binding.matches("S", true, false, false));
        assert!(!binding.matches("s", false, false, false));
        assert!(!binding.matches("s", true, false, true));

        let plain = KeyBinding::parse("S").unwrap();
        assert!(!plain.matches("s", true, false, false));
    }

    #[test]
    fn test_matches_ignores_unnamed_shift() {
        let plus = KeyBinding::parse("+").unwrap();
        assert!(plus.matches("+", false, true, false));

        let shifted = KeyBinding::parse("Shift+F1").unwrap();
        assert!(!shifted.matches("F1", false, false, false));
        assert!(shifted.matches("F1", false, true, false));
    }

    #[test]
    fn test_labels() {
        assert_eq!(KeyBinding::parse("ctrl+s").unwrap().label(), "Ctrl+S");
        assert_eq!(KeyBinding::parse("[").unwrap().label(), "[");
        assert_eq!(KeyBinding::parse("Alt+F4").unwrap().label(), "Alt+F4");
        assert_eq!(KeyBinding::parse("Escape").unwrap().label(), "Esc");
    }

    #[test]
    fn test_build_action_map_follows_dispatch_order() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();

        assert_eq!(map[0].1, Action::DecreaseOpacity);
        assert_eq!(map.last().unwrap().1, Action::ExportPdf);

        let ctrl_s = KeyBinding::parse("Ctrl+S").unwrap();
        let found = map.iter().find(|(binding, _)| *binding == ctrl_s);
        assert_eq!(found.map(|(_, action)| *action), Some(Action::SaveAs));
    }

    #[test]
    fn test_duplicate_keybinding_detection() {
        let mut config = KeybindingsConfig::default();
        config.clear_canvas = vec!["Ctrl+Q".to_string()];

        let err_msg = config.build_action_map().unwrap_err();
        assert!(err_msg.contains("Duplicate keybinding"));
        assert!(err_msg.contains("Ctrl+Q"));
    }

    #[test]
    fn test_duplicate_with_different_case() {
        let mut config = KeybindingsConfig::default();
        config.eraser_on = vec!["x".to_string()];
        config.eraser_off = vec!["X".to_string()];

        assert!(config.build_action_map().is_err());
    }
}
