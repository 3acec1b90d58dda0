//! Input handling and drawing state.
//!
//! This module translates backend keyboard and mouse events into drawing and
//! UI actions. It owns the canvas, the current color and mode, the opacity
//! controller, and the state of menus, dialogs and tooltips.

pub mod events;
pub mod mode;
pub mod modifiers;
pub mod state;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use mode::DrawMode;
pub use modifiers::Modifiers;
pub use state::{InputState, InputSettings};
