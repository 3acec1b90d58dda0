//! Brush/eraser mode.

/// What a pointer drag paints with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    /// Current color at brush width
    #[default]
    Brush,
    /// Background color at eraser width
    Eraser,
}

impl DrawMode {
    pub fn is_eraser(self) -> bool {
        matches!(self, DrawMode::Eraser)
    }
}
