// Feeds pointer events (motion/buttons/scroll) into the input state.
use log::debug;
use smithay_client_toolkit::seat::pointer::{
    BTN_LEFT, BTN_MIDDLE, BTN_RIGHT, PointerEvent, PointerEventKind, PointerHandler,
};
use wayland_client::{Connection, QueueHandle, protocol::wl_pointer};

use crate::input::MouseButton;

use super::super::state::WaylandState;

impl PointerHandler for WaylandState {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            let x = event.position.0 as i32;
            let y = event.position.1 as i32;
            match event.kind {
                PointerEventKind::Enter { .. } => {
                    debug!("Pointer entered at ({}, {})", x, y);
                    self.input_state.on_mouse_motion(x, y);
                }
                PointerEventKind::Leave { .. } => {
                    debug!("Pointer left surface");
                    self.input_state.on_pointer_leave();
                }
                PointerEventKind::Motion { .. } => {
                    self.input_state.on_mouse_motion(x, y);
                }
                PointerEventKind::Press { button, .. } => {
                    debug!("Button {} pressed at ({}, {})", button, x, y);
                    let Some(mb) = map_button(button) else {
                        continue;
                    };
                    self.input_state.on_mouse_press(mb, x, y);
                    self.input_state.needs_redraw = true;
                }
                PointerEventKind::Release { button, .. } => {
                    debug!("Button {} released", button);
                    let Some(mb) = map_button(button) else {
                        continue;
                    };
                    self.input_state.on_mouse_release(mb, x, y);
                    self.input_state.needs_redraw = true;
                }
                PointerEventKind::Axis { vertical, .. } => {
                    let direction = if vertical.discrete != 0 {
                        vertical.discrete.signum()
                    } else if vertical.absolute.abs() > 0.1 {
                        if vertical.absolute > 0.0 { 1 } else { -1 }
                    } else {
                        0
                    };
                    if direction != 0 {
                        self.input_state.on_scroll(direction);
                    }
                }
            }
        }
    }
}

fn map_button(button: u32) -> Option<MouseButton> {
    match button {
        BTN_LEFT => Some(MouseButton::Left),
        BTN_MIDDLE => Some(MouseButton::Middle),
        BTN_RIGHT => Some(MouseButton::Right),
        _ => None,
    }
}
