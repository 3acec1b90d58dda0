mod actions;
mod core;
mod mouse;
#[cfg(test)]
mod tests;

pub use self::core::{InputSettings, InputState, Tooltip, UiState};
