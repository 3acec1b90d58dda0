use anyhow::Result;

use crate::config::Config;

pub mod wayland;

/// Runs the overlay until the user exits.
pub fn run_wayland(config: Config) -> Result<()> {
    let mut backend = wayland::WaylandBackend::new(config);
    backend.run()
}
