//! Help window, opacity info and tooltip text.
//!
//! Everything here is generated from the active palette and keybindings so
//! the text always shows the keys that actually work.

use super::layout::TooltipZone;
use super::menu::{accelerator_label, all_bindings_label};
use crate::config::{Action, KeyBinding, Palette};

/// Inputs for [`help_lines`].
pub struct HelpContext<'a> {
    pub palette: &'a Palette,
    pub bindings: &'a [(KeyBinding, Action)],
    pub opacity_percent: u32,
    pub reset_percent: u32,
    pub export_dir: &'a str,
}

const RULE: &str = "----------------------------------------------------------";

fn key(bindings: &[(KeyBinding, Action)], action: Action) -> String {
    accelerator_label(bindings, action).unwrap_or_else(|| "(unbound)".to_string())
}

/// Full help window text, one entry per line.
pub fn help_lines(ctx: &HelpContext<'_>) -> Vec<String> {
    let b = ctx.bindings;
    let mut lines = vec![
        "DRAWOVER - HELP".to_string(),
        String::new(),
        RULE.to_string(),
        "FEATURES".to_string(),
        "  - Draw with the mouse in any palette color".to_string(),
        "  - Eraser mode for corrections".to_string(),
        "  - Adjustable window opacity".to_string(),
        "  - Save drawings in several formats".to_string(),
        "  - Copy to the clipboard".to_string(),
        "  - Stays above all other windows".to_string(),
        String::new(),
        format!("Current opacity: {}%", ctx.opacity_percent),
        String::new(),
        RULE.to_string(),
        "MOUSE".to_string(),
        "  Left button + drag - draw".to_string(),
        "  Use the eraser for corrections".to_string(),
        String::new(),
        RULE.to_string(),
        "HOTKEYS - COLORS".to_string(),
    ];

    let slots = ctx.palette.slots();
    let half = slots.len().div_ceil(2);
    for row in 0..half {
        let left = &slots[row];
        let mut line = format!(
            "  {} - {:<16}",
            left.key.to_ascii_uppercase(),
            left.label
        );
        if let Some(right) = slots.get(row + half) {
            line.push_str(&format!(
                "{} - {}",
                right.key.to_ascii_uppercase(),
                right.label
            ));
        }
        lines.push(line.trim_end().to_string());
    }

    lines.extend([
        String::new(),
        RULE.to_string(),
        "HOTKEYS - OPACITY".to_string(),
        format!(
            "  {:<10}: decrease opacity (more see-through)",
            all_bindings_label(b, Action::DecreaseOpacity)
        ),
        format!(
            "  {:<10}: increase opacity (more visible)",
            all_bindings_label(b, Action::IncreaseOpacity)
        ),
        format!(
            "  {:<10}: reset to {}%",
            all_bindings_label(b, Action::ResetOpacity),
            ctx.reset_percent
        ),
        format!(
            "  {:<10}: toggle modes (10% <-> 80%)",
            all_bindings_label(b, Action::ToggleOpacity)
        ),
        String::new(),
        RULE.to_string(),
        "HOTKEYS - TOOLS".to_string(),
        format!(
            "  {} - eraser on          {} - save as...",
            key(b, Action::EraserOn),
            key(b, Action::SaveAs)
        ),
        format!(
            "  {} - eraser off         {} - quick save",
            key(b, Action::EraserOff),
            key(b, Action::QuickSave)
        ),
        format!(
            "  {} - clear canvas       {} - copy to clipboard",
            key(b, Action::ClearCanvas),
            key(b, Action::CopyToClipboard)
        ),
        format!("                         {} - save as PDF", key(b, Action::ExportPdf)),
        String::new(),
        RULE.to_string(),
        "SYSTEM KEYS".to_string(),
        format!("  {} - minimize / restore", key(b, Action::ToggleMinimize)),
        format!("  {} - show this help", key(b, Action::ToggleHelp)),
        format!("  {} - opacity info", key(b, Action::ShowOpacityInfo)),
        String::new(),
        RULE.to_string(),
        "SAVING".to_string(),
        format!("  - Drawings are saved to '{}'", ctx.export_dir),
        "  - Automatic names contain the date and time".to_string(),
        "  - Formats: PNG, JPEG, GIF, BMP, PDF".to_string(),
        format!("  - Quick save: {}", key(b, Action::QuickSave)),
        String::new(),
        RULE.to_string(),
        "OPACITY TIPS".to_string(),
        "  1. Low opacity (10-30%) - draw over other windows".to_string(),
        "  2. Medium opacity (40-60%) - highlight areas".to_string(),
        "  3. High opacity (70-100%) - regular drawing".to_string(),
        format!(
            "  4. Use {} to switch modes quickly",
            key(b, Action::ToggleOpacity)
        ),
        String::new(),
        RULE.to_string(),
        "SUPPORT".to_string(),
        "  Made for drawing on top of any window.".to_string(),
        format!("  To quit use {} or File -> Exit.", key(b, Action::Exit)),
    ]);

    lines
}

/// Body of the opacity info message box.
pub fn opacity_info_text(
    percent: u32,
    reset_percent: u32,
    bindings: &[(KeyBinding, Action)],
) -> String {
    format!(
        "Current opacity: {}%\n\n\
         Hotkeys:\n\
         {} : decrease opacity\n\
         {} : increase opacity\n\
         {} : reset to {}%\n\
         {} : toggle modes\n\n\
         Tip: use low opacity\n\
         to draw over other windows.",
        percent,
        all_bindings_label(bindings, Action::DecreaseOpacity),
        all_bindings_label(bindings, Action::IncreaseOpacity),
        all_bindings_label(bindings, Action::ResetOpacity),
        reset_percent,
        all_bindings_label(bindings, Action::ToggleOpacity),
    )
}

/// Tooltip text for a hover zone.
pub fn tooltip_text(zone: TooltipZone, bindings: &[(KeyBinding, Action)]) -> String {
    match zone {
        TooltipZone::Swatch => format!(
            "Current color / tool\n{} - eraser, {} - brush",
            key(bindings, Action::EraserOn),
            key(bindings, Action::EraserOff)
        ),
        TooltipZone::ControlPanel => "Save panel\nUse the buttons or hotkeys".to_string(),
        TooltipZone::Canvas => "Drawing area\nLeft button - draw, drag - line".to_string(),
        TooltipZone::OpacityPanel => format!(
            "Opacity control\n{} {} - adjust, {} - toggle",
            key(bindings, Action::DecreaseOpacity),
            key(bindings, Action::IncreaseOpacity),
            key(bindings, Action::ToggleOpacity)
        ),
    }
}
