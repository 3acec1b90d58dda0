use crate::config::Action;
use crate::input::events::MouseButton;
use crate::ui::layout::{PanelButton, UiTarget};
use crate::ui::modal::Modal;

use super::InputState;

/// Lines scrolled in the help window per wheel step.
const HELP_SCROLL_LINES: i32 = 3;

impl InputState {
    /// Processes a mouse button press event in surface coordinates.
    ///
    /// # Behavior
    /// - Minimized: a press on the restore tab brings the overlay back
    /// - Dialog open: only its button reacts
    /// - Menu open: picks a dropdown entry or closes the menu
    /// - Otherwise: opens menus, arms buttons, grabs the slider or starts a stroke
    pub fn on_mouse_press(&mut self, button: MouseButton, x: i32, y: i32) {
        self.pointer = (x, y);
        if button != MouseButton::Left {
            return;
        }

        if self.minimized {
            if self.layout().restore_tab().contains(x, y) {
                self.toggle_minimized();
            }
            return;
        }

        if let Some(modal) = &self.ui.modal {
            let layout = self.layout();
            let button_rect = match modal {
                Modal::Message(message) => layout.message_ok_button(message.lines().len()),
                Modal::Help { .. } => layout.help_close_button(),
            };
            self.ui.modal_button_pressed = button_rect.contains(x, y);
            return;
        }

        let layout = self.layout();
        if let Some(menu) = self.ui.open_menu {
            if layout.menu_dropdown(menu).contains(x, y) {
                // Entry fires on release.
                return;
            }
            match layout.hit_test(x, y) {
                UiTarget::MenuTitle(other) if other != menu => {
                    self.ui.open_menu = Some(other);
                    self.ui.hovered_item = None;
                    self.mark_full_redraw();
                }
                _ => self.close_menu(),
            }
            return;
        }

        let target = layout.hit_test(x, y);
        self.hide_tooltip();
        match target {
            UiTarget::MenuTitle(menu) => {
                self.ui.open_menu = Some(menu);
                self.ui.hovered_item = layout.menu_item_at(menu, x, y);
                self.mark_full_redraw();
            }
            UiTarget::OpacitySlider => {
                self.ui.slider_drag = true;
                let position = layout.slider_value_at(x);
                self.transparency.set_from_slider(position);
                self.mark_full_redraw();
            }
            UiTarget::Canvas => {
                // Anchor only; the first segment is drawn on motion.
                self.stroke_anchor = Some(layout.to_canvas(x, y));
            }
            target if target.is_button() => {
                self.ui.pressed = Some(target);
                self.mark_full_redraw();
            }
            _ => {}
        }
    }

    /// Processes pointer motion in surface coordinates.
    ///
    /// Extends the stroke in progress with a straight segment, drags the
    /// opacity slider, tracks the hovered menu entry, or updates tooltips.
    pub fn on_mouse_motion(&mut self, x: i32, y: i32) {
        self.pointer = (x, y);
        if self.minimized || self.ui.modal.is_some() {
            return;
        }

        let layout = self.layout();

        if let Some(anchor) = self.stroke_anchor {
            let to = layout.to_canvas(x, y);
            let (color, width) = self.stroke_style();
            match self.canvas.draw_segment(anchor, to, color, width) {
                Ok(damage) => self.mark_canvas_damage(damage),
                Err(err) => log::warn!("Failed to draw segment: {}", err),
            }
            self.stroke_anchor = Some(to);
            return;
        }

        if self.ui.slider_drag {
            let position = layout.slider_value_at(x);
            if position != self.transparency.percent() {
                self.transparency.set_from_slider(position);
                self.mark_full_redraw();
            }
            return;
        }

        if let Some(menu) = self.ui.open_menu {
            let hovered = layout.menu_item_at(menu, x, y);
            if hovered != self.ui.hovered_item {
                self.ui.hovered_item = hovered;
                self.mark_full_redraw();
            }
            if let UiTarget::MenuTitle(other) = layout.hit_test(x, y)
                && other != menu
            {
                self.ui.open_menu = Some(other);
                self.ui.hovered_item = None;
                self.mark_full_redraw();
            }
            return;
        }

        let zone = layout.hit_test(x, y).tooltip_zone();
        self.update_hover_zone(zone, x, y);
    }

    /// Processes mouse button release events.
    ///
    /// Ends the stroke or slider drag, fires the button or menu entry under
    /// the pointer if it was also pressed there, and dismisses dialogs.
    pub fn on_mouse_release(&mut self, button: MouseButton, x: i32, y: i32) {
        self.pointer = (x, y);
        if button != MouseButton::Left {
            return;
        }

        if self.stroke_anchor.take().is_some() {
            return;
        }

        if self.ui.slider_drag {
            self.ui.slider_drag = false;
            return;
        }

        let layout = self.layout();

        if let Some(modal) = &self.ui.modal {
            let button_rect = match modal {
                Modal::Message(message) => layout.message_ok_button(message.lines().len()),
                Modal::Help { .. } => layout.help_close_button(),
            };
            let activate = self.ui.modal_button_pressed && button_rect.contains(x, y);
            self.ui.modal_button_pressed = false;
            if activate {
                self.dismiss_modal();
            }
            return;
        }

        if let Some(menu) = self.ui.open_menu {
            if let Some(index) = layout.menu_item_at(menu, x, y) {
                self.close_menu();
                if let Some(action) = menu.action_at(index) {
                    self.handle_action(action);
                }
            }
            return;
        }

        if let Some(pressed) = self.ui.pressed.take() {
            self.mark_full_redraw();
            if layout.hit_test(x, y) == pressed {
                self.activate_widget(pressed);
            }
        }
    }

    /// Scroll wheel; only the help window scrolls.
    pub fn on_scroll(&mut self, delta_lines: i32) {
        if self.ui.modal.as_ref().is_some_and(Modal::is_help) {
            self.scroll_help(delta_lines * HELP_SCROLL_LINES);
        }
    }

    fn activate_widget(&mut self, target: UiTarget) {
        let action = match target {
            UiTarget::PanelButton(PanelButton::SaveAs) => Action::SaveAs,
            UiTarget::PanelButton(PanelButton::QuickSave) => Action::QuickSave,
            UiTarget::PanelButton(PanelButton::Copy) => Action::CopyToClipboard,
            UiTarget::OpacityReset => Action::ResetOpacity,
            UiTarget::HelpButton => Action::ToggleHelp,
            _ => return,
        };
        self.handle_action(action);
    }

    /// Widget currently held down, for pressed-state rendering.
    pub fn pressed_widget(&self) -> Option<UiTarget> {
        self.ui.pressed
    }
}
