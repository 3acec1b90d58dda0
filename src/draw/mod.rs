//! Raster drawing primitives (Cairo-based).
//!
//! This module defines the core drawing types used by the overlay:
//! - [`Color`]: RGBA color representation with the named palette colors
//! - [`Canvas`]: The raster surface strokes are painted onto
//! - [`DirtyTracker`]: Damage accumulation between frames
//! - Rendering helpers for Cairo-based output

pub mod canvas;
pub mod color;
pub mod dirty;
pub mod render;

// Re-export commonly used types at module level
pub use canvas::Canvas;
pub use color::{Color, WHITE};
pub use dirty::DirtyTracker;
pub use render::{paint_canvas, render_segment};
