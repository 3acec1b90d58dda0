//! Widget geometry and hit-testing.
//!
//! All rectangles are in surface (window) coordinates. The menu bar occupies
//! the top [`MENU_BAR_HEIGHT`] pixels; everything below it is the drawing
//! area, with the widgets placed on top of it at fixed canvas offsets.

use super::menu::{MenuEntry, MenuId};
use crate::util::Rect;

// ============================================================================
// Layout constants (not configurable)
// ============================================================================

/// Height of the menu bar strip above the canvas.
pub const MENU_BAR_HEIGHT: i32 = 24;

const SWATCH: (i32, i32, i32, i32) = (10, 10, 56, 22);
const CONTROL_PANEL: (i32, i32, i32, i32) = (10, 40, 200, 100);
const PANEL_BUTTON_HEIGHT: i32 = 28;
const PANEL_BUTTON_GAP: i32 = 4;
const INFO_LABEL: (i32, i32, i32, i32) = (10, 150, 330, 18);
const OPACITY_PANEL: (i32, i32, i32, i32) = (10, 220, 200, 90);
const HELP_BUTTON: (i32, i32, i32, i32) = (10, 320, 100, 30);

const MENU_TITLE_WIDTHS: [i32; 3] = [48, 80, 52];
const MENU_DROPDOWN_WIDTH: i32 = 280;
pub const MENU_ITEM_HEIGHT: i32 = 24;
pub const MENU_SEPARATOR_HEIGHT: i32 = 9;

const MESSAGE_WIDTH: i32 = 440;
pub const MESSAGE_LINE_HEIGHT: i32 = 18;
const DIALOG_BUTTON_HEIGHT: i32 = 28;

const HELP_WINDOW: (i32, i32) = (600, 550);
const HELP_MARGIN: i32 = 20;
pub const HELP_LINE_HEIGHT: i32 = 17;

const RESTORE_TAB: (i32, i32, i32, i32) = (10, 10, 150, 30);

/// Buttons in the export panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelButton {
    SaveAs,
    QuickSave,
    Copy,
}

impl PanelButton {
    pub const ALL: [PanelButton; 3] = [
        PanelButton::SaveAs,
        PanelButton::QuickSave,
        PanelButton::Copy,
    ];

    fn index(self) -> i32 {
        match self {
            PanelButton::SaveAs => 0,
            PanelButton::QuickSave => 1,
            PanelButton::Copy => 2,
        }
    }
}

/// What lies under a point of the main (unminimized, modal-free) overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiTarget {
    MenuTitle(MenuId),
    MenuBar,
    Swatch,
    PanelButton(PanelButton),
    ControlPanel,
    InfoLabel,
    OpacitySlider,
    OpacityReset,
    OpacityPanel,
    HelpButton,
    Canvas,
}

/// Regions that show a hover tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipZone {
    Swatch,
    ControlPanel,
    Canvas,
    OpacityPanel,
}

impl UiTarget {
    pub fn tooltip_zone(self) -> Option<TooltipZone> {
        match self {
            UiTarget::Swatch => Some(TooltipZone::Swatch),
            UiTarget::PanelButton(_) | UiTarget::ControlPanel => Some(TooltipZone::ControlPanel),
            UiTarget::OpacitySlider | UiTarget::OpacityReset | UiTarget::OpacityPanel => {
                Some(TooltipZone::OpacityPanel)
            }
            UiTarget::Canvas => Some(TooltipZone::Canvas),
            UiTarget::MenuTitle(_)
            | UiTarget::MenuBar
            | UiTarget::InfoLabel
            | UiTarget::HelpButton => None,
        }
    }

    /// Targets that activate on release (buttons).
    pub fn is_button(self) -> bool {
        matches!(
            self,
            UiTarget::PanelButton(_) | UiTarget::OpacityReset | UiTarget::HelpButton
        )
    }
}

/// Geometry of the overlay for a given surface size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
}

fn canvas_rect(geometry: (i32, i32, i32, i32)) -> Rect {
    Rect {
        x: geometry.0,
        y: geometry.1 + MENU_BAR_HEIGHT,
        width: geometry.2,
        height: geometry.3,
    }
}

impl Layout {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Size of the canvas raster for this surface size.
    pub fn canvas_size(&self) -> (i32, i32) {
        (self.width.max(1), (self.height - MENU_BAR_HEIGHT).max(1))
    }

    /// Converts surface coordinates to canvas-local coordinates.
    pub fn to_canvas(&self, x: i32, y: i32) -> (i32, i32) {
        (x, y - MENU_BAR_HEIGHT)
    }

    pub fn menu_bar(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.width.max(1),
            height: MENU_BAR_HEIGHT,
        }
    }

    pub fn canvas_area(&self) -> Rect {
        let (width, height) = self.canvas_size();
        Rect {
            x: 0,
            y: MENU_BAR_HEIGHT,
            width,
            height,
        }
    }

    pub fn swatch(&self) -> Rect {
        canvas_rect(SWATCH)
    }

    pub fn control_panel(&self) -> Rect {
        canvas_rect(CONTROL_PANEL)
    }

    pub fn panel_button(&self, button: PanelButton) -> Rect {
        let panel = self.control_panel();
        Rect {
            x: panel.x + 5,
            y: panel.y
                + PANEL_BUTTON_GAP
                + button.index() * (PANEL_BUTTON_HEIGHT + PANEL_BUTTON_GAP),
            width: panel.width - 10,
            height: PANEL_BUTTON_HEIGHT,
        }
    }

    pub fn info_label(&self) -> Rect {
        canvas_rect(INFO_LABEL)
    }

    pub fn opacity_panel(&self) -> Rect {
        canvas_rect(OPACITY_PANEL)
    }

    /// The slider track inside the opacity panel.
    pub fn opacity_slider(&self) -> Rect {
        let panel = self.opacity_panel();
        Rect {
            x: panel.x + 10,
            y: panel.y + 24,
            width: panel.width - 20,
            height: 26,
        }
    }

    pub fn opacity_reset_button(&self) -> Rect {
        let panel = self.opacity_panel();
        Rect {
            x: panel.x + 50,
            y: panel.y + 58,
            width: 100,
            height: 24,
        }
    }

    pub fn help_button(&self) -> Rect {
        canvas_rect(HELP_BUTTON)
    }

    /// Slider position (1..=100) for a pointer x coordinate.
    pub fn slider_value_at(&self, x: i32) -> u32 {
        let track = self.opacity_slider();
        let fraction = (x - track.x) as f64 / (track.width - 1).max(1) as f64;
        (1.0 + fraction.clamp(0.0, 1.0) * 99.0).round() as u32
    }

    /// Pointer x coordinate of the slider knob for a position (1..=100).
    pub fn slider_knob_x(&self, position: u32) -> i32 {
        let track = self.opacity_slider();
        let fraction = (position.clamp(1, 100) - 1) as f64 / 99.0;
        track.x + (fraction * (track.width - 1) as f64).round() as i32
    }

    pub fn menu_title(&self, menu: MenuId) -> Rect {
        let index = menu.index();
        let x = MENU_TITLE_WIDTHS[..index].iter().sum::<i32>() + 4;
        Rect {
            x,
            y: 0,
            width: MENU_TITLE_WIDTHS[index],
            height: MENU_BAR_HEIGHT,
        }
    }

    pub fn menu_dropdown(&self, menu: MenuId) -> Rect {
        let title = self.menu_title(menu);
        let height: i32 = menu
            .entries()
            .iter()
            .map(|entry| match entry {
                MenuEntry::Item { .. } => MENU_ITEM_HEIGHT,
                MenuEntry::Separator => MENU_SEPARATOR_HEIGHT,
            })
            .sum();
        Rect {
            x: title.x,
            y: MENU_BAR_HEIGHT,
            width: MENU_DROPDOWN_WIDTH,
            height: height + 4,
        }
    }

    /// Rectangle of a dropdown entry (items and separators alike).
    pub fn menu_entry(&self, menu: MenuId, index: usize) -> Option<Rect> {
        let dropdown = self.menu_dropdown(menu);
        let mut y = dropdown.y + 2;
        for (i, entry) in menu.entries().iter().enumerate() {
            let height = match entry {
                MenuEntry::Item { .. } => MENU_ITEM_HEIGHT,
                MenuEntry::Separator => MENU_SEPARATOR_HEIGHT,
            };
            if i == index {
                return Some(Rect {
                    x: dropdown.x + 2,
                    y,
                    width: dropdown.width - 4,
                    height,
                });
            }
            y += height;
        }
        None
    }

    /// Index of the selectable dropdown item under the point, if any.
    pub fn menu_item_at(&self, menu: MenuId, x: i32, y: i32) -> Option<usize> {
        menu.entries()
            .iter()
            .enumerate()
            .filter(|(_, entry)| matches!(entry, MenuEntry::Item { .. }))
            .map(|(index, _)| index)
            .find(|index| {
                self.menu_entry(menu, *index)
                    .is_some_and(|rect| rect.contains(x, y))
            })
    }

    /// Hit-tests the base overlay (menu bar, widgets, canvas).
    pub fn hit_test(&self, x: i32, y: i32) -> UiTarget {
        if y < MENU_BAR_HEIGHT {
            return MenuId::ALL
                .into_iter()
                .find(|menu| self.menu_title(*menu).contains(x, y))
                .map(UiTarget::MenuTitle)
                .unwrap_or(UiTarget::MenuBar);
        }

        if self.swatch().contains(x, y) {
            return UiTarget::Swatch;
        }

        if self.control_panel().contains(x, y) {
            return PanelButton::ALL
                .into_iter()
                .find(|button| self.panel_button(*button).contains(x, y))
                .map(UiTarget::PanelButton)
                .unwrap_or(UiTarget::ControlPanel);
        }

        if self.info_label().contains(x, y) {
            return UiTarget::InfoLabel;
        }

        if self.opacity_panel().contains(x, y) {
            if self.opacity_slider().contains(x, y) {
                return UiTarget::OpacitySlider;
            }
            if self.opacity_reset_button().contains(x, y) {
                return UiTarget::OpacityReset;
            }
            return UiTarget::OpacityPanel;
        }

        if self.help_button().contains(x, y) {
            return UiTarget::HelpButton;
        }

        UiTarget::Canvas
    }

    /// Centered message box sized for `lines` lines of body text.
    pub fn message_box(&self, lines: usize) -> Rect {
        let height = 80 + lines as i32 * MESSAGE_LINE_HEIGHT + DIALOG_BUTTON_HEIGHT;
        self.centered(MESSAGE_WIDTH, height)
    }

    pub fn message_ok_button(&self, lines: usize) -> Rect {
        let dialog = self.message_box(lines);
        Rect {
            x: dialog.x + (dialog.width - 80) / 2,
            y: dialog.y + dialog.height - DIALOG_BUTTON_HEIGHT - 12,
            width: 80,
            height: DIALOG_BUTTON_HEIGHT,
        }
    }

    pub fn help_window(&self) -> Rect {
        self.centered(HELP_WINDOW.0, HELP_WINDOW.1)
    }

    pub fn help_close_button(&self) -> Rect {
        let window = self.help_window();
        Rect {
            x: window.x + (window.width - 140) / 2,
            y: window.y + window.height - DIALOG_BUTTON_HEIGHT - 12,
            width: 140,
            height: DIALOG_BUTTON_HEIGHT,
        }
    }

    /// Scrollable text area of the help window (below the title bar).
    pub fn help_text_area(&self) -> Rect {
        let window = self.help_window();
        let top = window.y + 28 + HELP_MARGIN / 2;
        let bottom = window.y + window.height - DIALOG_BUTTON_HEIGHT - 24;
        Rect {
            x: window.x + HELP_MARGIN,
            y: top,
            width: (window.width - 2 * HELP_MARGIN).max(1),
            height: (bottom - top).max(HELP_LINE_HEIGHT),
        }
    }

    /// Number of help lines that fit in the text area.
    pub fn help_visible_lines(&self) -> usize {
        (self.help_text_area().height / HELP_LINE_HEIGHT).max(1) as usize
    }

    /// The small tab left on screen while minimized.
    pub fn restore_tab(&self) -> Rect {
        Rect {
            x: RESTORE_TAB.0,
            y: RESTORE_TAB.1,
            width: RESTORE_TAB.2,
            height: RESTORE_TAB.3,
        }
    }

    fn centered(&self, width: i32, height: i32) -> Rect {
        let width = width.min((self.width - 40).max(120));
        let height = height.min((self.height - 40).max(80));
        Rect {
            x: (self.width - width) / 2,
            y: (self.height - height) / 2,
            width,
            height,
        }
    }
}
