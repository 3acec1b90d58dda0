mod backend;
mod dialog;
mod handlers;
mod state;
mod surface;

pub use backend::WaylandBackend;
