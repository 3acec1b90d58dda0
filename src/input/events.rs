//! Generic input event types for cross-backend compatibility.

/// Generic key representation for cross-backend compatibility.
///
/// Backend implementations map their native key codes to these generic
/// key values for unified input handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    /// Escape key
    Escape,
    /// Return/Enter key
    Return,
    /// Backspace key
    Backspace,
    /// Space bar
    Space,
    /// Function key F1-F12
    F(u8),
    /// Arrow up (scrolls the help window)
    Up,
    /// Arrow down (scrolls the help window)
    Down,
    PageUp,
    PageDown,
    /// Shift modifier
    Shift,
    /// Ctrl modifier
    Ctrl,
    /// Alt modifier
    Alt,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name used to match keybinding strings, or `None` for keys that can't be bound.
    pub fn binding_name(self) -> Option<String> {
        match self {
            Key::Char(c) => Some(c.to_string()),
            Key::Escape => Some("Escape".to_string()),
            Key::Return => Some("Return".to_string()),
            Key::Backspace => Some("Backspace".to_string()),
            Key::Space => Some("Space".to_string()),
            Key::F(n) => Some(format!("F{n}")),
            Key::Up => Some("Up".to_string()),
            Key::Down => Some("Down".to_string()),
            Key::PageUp => Some("PageUp".to_string()),
            Key::PageDown => Some("PageDown".to_string()),
            Key::Shift | Key::Ctrl | Key::Alt | Key::Unknown => None,
        }
    }
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left mouse button (drawing and widget activation)
    Left,
    /// Right mouse button (currently unused)
    Right,
    /// Middle mouse button (currently unused)
    Middle,
}
