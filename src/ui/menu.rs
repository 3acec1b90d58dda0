//! Menu bar definition (File / Settings / Help).

use crate::config::{Action, KeyBinding};

/// Top-level menus in the menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuId {
    File,
    Settings,
    Help,
}

/// One dropdown row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Item { label: &'static str, action: Action },
    Separator,
}

const FILE_MENU: &[MenuEntry] = &[
    MenuEntry::Item {
        label: "Save as...",
        action: Action::SaveAs,
    },
    MenuEntry::Item {
        label: "Quick save",
        action: Action::QuickSave,
    },
    MenuEntry::Item {
        label: "Copy to clipboard",
        action: Action::CopyToClipboard,
    },
    MenuEntry::Item {
        label: "Save as PDF",
        action: Action::ExportPdf,
    },
    MenuEntry::Separator,
    MenuEntry::Item {
        label: "Clear canvas",
        action: Action::ClearCanvas,
    },
    MenuEntry::Separator,
    MenuEntry::Item {
        label: "Exit",
        action: Action::Exit,
    },
];

const SETTINGS_MENU: &[MenuEntry] = &[
    MenuEntry::Item {
        label: "Opacity control",
        action: Action::ShowOpacityInfo,
    },
    MenuEntry::Separator,
    MenuEntry::Item {
        label: "Increase opacity",
        action: Action::IncreaseOpacity,
    },
    MenuEntry::Item {
        label: "Decrease opacity",
        action: Action::DecreaseOpacity,
    },
    MenuEntry::Item {
        label: "Reset opacity",
        action: Action::ResetOpacity,
    },
    MenuEntry::Item {
        label: "Toggle opacity mode",
        action: Action::ToggleOpacity,
    },
];

const HELP_MENU: &[MenuEntry] = &[
    MenuEntry::Item {
        label: "Open help",
        action: Action::ToggleHelp,
    },
    MenuEntry::Item {
        label: "Opacity info",
        action: Action::ShowOpacityInfo,
    },
];

impl MenuId {
    pub const ALL: [MenuId; 3] = [MenuId::File, MenuId::Settings, MenuId::Help];

    pub fn index(self) -> usize {
        match self {
            MenuId::File => 0,
            MenuId::Settings => 1,
            MenuId::Help => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MenuId::File => "File",
            MenuId::Settings => "Settings",
            MenuId::Help => "Help",
        }
    }

    pub fn entries(self) -> &'static [MenuEntry] {
        match self {
            MenuId::File => FILE_MENU,
            MenuId::Settings => SETTINGS_MENU,
            MenuId::Help => HELP_MENU,
        }
    }

    /// Action bound to the entry at `index`, if it is a selectable item.
    pub fn action_at(self, index: usize) -> Option<Action> {
        match self.entries().get(index)? {
            MenuEntry::Item { action, .. } => Some(*action),
            MenuEntry::Separator => None,
        }
    }
}

/// Accelerator text for an action: the first binding assigned to it.
pub fn accelerator_label(bindings: &[(KeyBinding, Action)], action: Action) -> Option<String> {
    bindings
        .iter()
        .find(|(_, bound)| *bound == action)
        .map(|(binding, _)| binding.label())
}

/// All bindings for an action joined with " or " (e.g. `[ or -`).
pub fn all_bindings_label(bindings: &[(KeyBinding, Action)], action: Action) -> String {
    let labels: Vec<String> = bindings
        .iter()
        .filter(|(_, bound)| *bound == action)
        .map(|(binding, _)| binding.label())
        .collect();
    if labels.is_empty() {
        "(unbound)".to_string()
    } else {
        labels.join(" or ")
    }
}
