// Bridges Wayland key events into `InputState`.
use log::debug;
use smithay_client_toolkit::seat::keyboard::{
    KeyEvent, KeyboardHandler, Keysym, Modifiers, RawModifiers,
};
use wayland_client::{
    Connection, QueueHandle,
    protocol::{wl_keyboard, wl_surface},
};

use crate::input::Key;

use super::super::state::WaylandState;

impl KeyboardHandler for WaylandState {
    fn enter(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _surface: &wl_surface::WlSurface,
        _serial: u32,
        _raw: &[u32],
        _keysyms: &[Keysym],
    ) {
        debug!("Keyboard focus entered");
    }

    fn leave(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _surface: &wl_surface::WlSurface,
        _serial: u32,
    ) {
        debug!("Keyboard focus left");
        self.input_state.reset_modifiers();
    }

    fn press_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        event: KeyEvent,
    ) {
        let key = keysym_to_key(event.keysym);
        debug!("Key pressed: {:?}", key);
        self.input_state.on_key_press(key);
        self.input_state.needs_redraw = true;
    }

    fn release_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        event: KeyEvent,
    ) {
        let key = keysym_to_key(event.keysym);
        debug!("Key released: {:?}", key);
        self.input_state.on_key_release(key);
    }

    fn update_modifiers(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        modifiers: Modifiers,
        _layout: RawModifiers,
        _group: u32,
    ) {
        debug!(
            "Modifiers: ctrl={} alt={} shift={}",
            modifiers.ctrl, modifiers.alt, modifiers.shift
        );
        let state = &mut self.input_state.modifiers;
        state.ctrl = modifiers.ctrl;
        state.alt = modifiers.alt;
        state.shift = modifiers.shift;
    }

    fn repeat_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &wl_keyboard::WlKeyboard,
        _serial: u32,
        event: KeyEvent,
    ) {
        let key = keysym_to_key(event.keysym);
        debug!("Key repeated: {:?}", key);
        self.input_state.on_key_press(key);
        self.input_state.needs_redraw = true;
    }
}

fn keysym_to_key(keysym: Keysym) -> Key {
    match keysym {
        Keysym::Escape => Key::Escape,
        Keysym::Return | Keysym::KP_Enter => Key::Return,
        Keysym::BackSpace => Key::Backspace,
        Keysym::space => Key::Space,
        Keysym::Up => Key::Up,
        Keysym::Down => Key::Down,
        Keysym::Page_Up => Key::PageUp,
        Keysym::Page_Down => Key::PageDown,
        Keysym::Shift_L | Keysym::Shift_R => Key::Shift,
        Keysym::Control_L | Keysym::Control_R => Key::Ctrl,
        Keysym::Alt_L | Keysym::Alt_R => Key::Alt,
        Keysym::KP_Add => Key::Char('+'),
        Keysym::KP_Subtract => Key::Char('-'),
        _ => {
            let raw = keysym.raw();
            if (Keysym::F1.raw()..=Keysym::F12.raw()).contains(&raw) {
                Key::F((raw - Keysym::F1.raw() + 1) as u8)
            } else if (0x21..=0x7E).contains(&raw) {
                Key::Char(raw as u8 as char)
            } else {
                Key::Unknown
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_keys_map_by_number() {
        assert_eq!(keysym_to_key(Keysym::F1), Key::F(1));
        assert_eq!(keysym_to_key(Keysym::F12), Key::F(12));
    }

    #[test]
    fn printable_keysyms_become_chars() {
        assert_eq!(keysym_to_key(Keysym::bracketleft), Key::Char('['));
        assert_eq!(keysym_to_key(Keysym::plus), Key::Char('+'));
        assert_eq!(keysym_to_key(Keysym::_1), Key::Char('1'));
        assert_eq!(keysym_to_key(Keysym::s), Key::Char('s'));
        assert_eq!(keysym_to_key(Keysym::S), Key::Char('S'));
    }

    #[test]
    fn navigation_and_modifier_keys() {
        assert_eq!(keysym_to_key(Keysym::Page_Down), Key::PageDown);
        assert_eq!(keysym_to_key(Keysym::Control_R), Key::Ctrl);
        assert_eq!(keysym_to_key(Keysym::KP_Enter), Key::Return);
        assert_eq!(keysym_to_key(Keysym::Home), Key::Unknown);
    }
}
