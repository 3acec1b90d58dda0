use crate::config::Action;
use crate::export::ExportKind;
use crate::input::{events::Key, mode::DrawMode};
use crate::ui::modal::Modal;

use super::InputState;

impl InputState {
    /// Processes a key press event.
    ///
    /// Dispatch order, first match wins:
    /// - modifier tracking
    /// - an open dialog swallows everything except its own keys
    /// - an open menu closes (Escape does nothing else)
    /// - while minimized only the minimize binding is live
    /// - opacity, info, help, minimize and exit bindings
    /// - palette keys (no Ctrl/Alt held)
    /// - eraser, clear and export bindings
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            _ => {}
        }

        if self.ui.modal.is_some() {
            self.handle_modal_key(key);
            return;
        }

        if self.ui.open_menu.is_some() {
            self.close_menu();
            if key == Key::Escape {
                return;
            }
        }

        let Some(key_str) = key.binding_name() else {
            return;
        };
        let action = self.find_action(&key_str);

        if self.minimized {
            if action == Some(Action::ToggleMinimize) {
                self.handle_action(Action::ToggleMinimize);
            }
            return;
        }

        if let Some(action) = action.filter(|a| a.precedes_palette()) {
            self.handle_action(action);
            return;
        }

        if let Key::Char(c) = key
            && self.modifiers.allows_palette()
            && self.select_color(c)
        {
            return;
        }

        if let Some(action) = action {
            self.handle_action(action);
        } else {
            log::trace!("Ignoring unbound key {:?}", key);
        }
    }

    /// Processes a key release event (modifier tracking only).
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Clears modifier state, e.g. when keyboard focus is lost.
    pub fn reset_modifiers(&mut self) {
        self.modifiers = Default::default();
    }

    fn handle_modal_key(&mut self, key: Key) {
        let is_help = self.ui.modal.as_ref().is_some_and(Modal::is_help);
        match key {
            Key::Return | Key::Escape | Key::Space => self.dismiss_modal(),
            Key::F(1) if is_help => self.dismiss_modal(),
            Key::Up if is_help => self.scroll_help(-1),
            Key::Down if is_help => self.scroll_help(1),
            Key::PageUp if is_help => {
                let page = self.layout().help_visible_lines() as i32;
                self.scroll_help(-page);
            }
            Key::PageDown if is_help => {
                let page = self.layout().help_visible_lines() as i32;
                self.scroll_help(page);
            }
            _ => {}
        }
    }

    /// Scrolls the help window by `delta` lines, clamped to its content.
    pub fn scroll_help(&mut self, delta: i32) {
        let max_scroll = self
            .help_lines()
            .len()
            .saturating_sub(self.layout().help_visible_lines());
        if let Some(Modal::Help { scroll }) = &mut self.ui.modal {
            let next = (*scroll as i64 + delta as i64).clamp(0, max_scroll as i64) as usize;
            if next != *scroll {
                *scroll = next;
                self.dirty_tracker.mark_full();
                self.needs_redraw = true;
            }
        }
    }

    /// Switches to the palette color bound to `key` and back to the brush.
    ///
    /// Returns false (and changes nothing) when `key` is not a palette key.
    pub fn select_color(&mut self, key: char) -> bool {
        let Some(color) = self.palette.color_for(key) else {
            return false;
        };
        self.current_color = color;
        self.mode = DrawMode::Brush;
        self.mark_full_redraw();
        log::debug!("Color set from palette key '{}'", key);
        true
    }

    pub fn set_eraser(&mut self, enabled: bool) {
        self.mode = if enabled {
            DrawMode::Eraser
        } else {
            DrawMode::Brush
        };
        self.mark_full_redraw();
    }

    /// Erases every stroke.
    pub fn clear_canvas(&mut self) {
        if let Err(err) = self.canvas.clear() {
            log::warn!("Failed to clear canvas: {}", err);
        }
        self.stroke_anchor = None;
        self.mark_full_redraw();
        log::info!("Canvas cleared");
    }

    /// Handles an action triggered by a keybinding, a menu item or a button.
    pub fn handle_action(&mut self, action: Action) {
        log::debug!("Action: {:?}", action);
        match action {
            Action::DecreaseOpacity => {
                self.transparency.decrease();
                self.mark_full_redraw();
            }
            Action::IncreaseOpacity => {
                self.transparency.increase();
                self.mark_full_redraw();
            }
            Action::ResetOpacity => {
                self.transparency.reset();
                self.mark_full_redraw();
            }
            Action::ToggleOpacity => {
                self.transparency.toggle();
                self.mark_full_redraw();
            }
            Action::ShowOpacityInfo => {
                let message = self.opacity_info_message();
                self.show_modal(Modal::Message(message));
            }
            Action::ToggleHelp => {
                if self.ui.modal.as_ref().is_some_and(Modal::is_help) {
                    self.dismiss_modal();
                } else {
                    self.show_modal(Modal::Help { scroll: 0 });
                }
            }
            Action::ToggleMinimize => self.toggle_minimized(),
            Action::Exit => {
                log::info!("Exit requested");
                self.should_exit = true;
            }
            Action::EraserOn => self.set_eraser(true),
            Action::EraserOff => self.set_eraser(false),
            Action::ClearCanvas => self.clear_canvas(),
            Action::SaveAs => self.request_export(ExportKind::Interactive),
            Action::CopyToClipboard => self.request_export(ExportKind::Clipboard),
            Action::QuickSave => self.request_export(ExportKind::Quick),
            Action::ExportPdf => self.request_export(ExportKind::Pdf),
        }
    }
}
