// Coordinates backend startup/shutdown and drives the event loop while delegating
// rendering & protocol state to `WaylandState` and its handler modules.
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{debug, info, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        wlr_layer::{Anchor, KeyboardInteractivity, Layer, LayerShell},
    },
    shm::Shm,
};
use wayland_client::{Connection, globals::registry_queue_init};

use super::{dialog::LoweredOverlayDialog, state::WaylandState, surface::SurfaceState};
use crate::{
    config::Config,
    export::{ExportDependencies, ExportSettings, Exporter},
    input::{InputSettings, InputState},
};

/// Consecutive render failures tolerated before giving up.
const MAX_RENDER_FAILURES: u32 = 10;

/// Wayland backend state
pub struct WaylandBackend {
    config: Config,
}

impl WaylandBackend {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&mut self) -> Result<()> {
        info!("Starting Wayland backend");

        let conn =
            Connection::connect_to_env().context("Failed to connect to Wayland compositor")?;
        debug!("Connected to Wayland display");

        let (globals, mut event_queue) =
            registry_queue_init(&conn).context("Failed to initialize Wayland registry")?;
        let qh = event_queue.handle();

        let compositor_state =
            CompositorState::bind(&globals, &qh).context("wl_compositor not available")?;
        let layer_shell =
            LayerShell::bind(&globals, &qh).context("zwlr_layer_shell_v1 not available")?;
        let shm = Shm::bind(&globals, &qh).context("wl_shm not available")?;
        let output_state = OutputState::new(&globals, &qh);
        let seat_state = SeatState::new(&globals, &qh);
        let registry_state = RegistryState::new(&globals);
        debug!("Bound Wayland globals");

        let config = self.config.clone();
        debug!("  Color: {:?}", config.drawing.default_color);
        debug!("  Brush width: {:.1}px", config.drawing.brush_width);
        debug!("  Eraser width: {:.1}px", config.drawing.eraser_width);
        debug!("  Opacity: {:.2}", config.transparency.initial_opacity);
        debug!("  Export directory: {}", config.export.directory);

        let input_state = InputState::new(InputSettings::from_config(&config))
            .context("Failed to create drawing canvas")?;

        info!("Creating layer shell surface");
        let wl_surface = compositor_state.create_surface(&qh);
        let layer_surface = layer_shell.create_layer_surface(
            &qh,
            wl_surface,
            Layer::Overlay,
            Some("drawover"),
            None,
        );
        layer_surface.set_anchor(Anchor::all());
        layer_surface.set_keyboard_interactivity(KeyboardInteractivity::Exclusive);
        layer_surface.set_size(0, 0);
        layer_surface.set_exclusive_zone(-1);
        layer_surface.commit();

        let exporter = Exporter::with_dependencies(
            ExportSettings::from_config(&config.export),
            ExportDependencies {
                dialog: Arc::new(LoweredOverlayDialog::new(
                    conn.clone(),
                    layer_surface.clone(),
                )),
                ..ExportDependencies::default()
            },
        );
        info!(
            "Exports go to {}",
            exporter.settings().directory.display()
        );

        let mut surface = SurfaceState::new();
        surface.set_layer_surface(layer_surface);

        let mut state = WaylandState::new(
            registry_state,
            compositor_state,
            shm,
            output_state,
            seat_state,
            surface,
            config,
            input_state,
            exporter,
        );
        info!("Layer shell surface created");

        let mut consecutive_render_failures = 0u32;
        let mut loop_error: Option<anyhow::Error> = None;
        loop {
            if state.input_state.should_exit {
                info!("Exit requested, breaking event loop");
                break;
            }

            if let Err(e) = event_queue.blocking_dispatch(&mut state) {
                warn!("Event queue error: {}", e);
                loop_error = Some(anyhow::anyhow!("Wayland event queue error: {}", e));
                break;
            }

            if state.input_state.should_exit {
                info!("Exit requested after dispatch, breaking event loop");
                break;
            }

            if state.surface.is_configured()
                && let Err(e) = state.sync_collapsed()
            {
                warn!("Failed to update input region: {:#}", e);
            }

            if state.export_ready() {
                state.run_pending_export();
            }

            let can_render = state.surface.is_configured()
                && state.input_state.needs_redraw
                && !state.surface.frame_callback_pending();

            if can_render {
                match state.render(&qh) {
                    Ok(()) => {
                        consecutive_render_failures = 0;
                        state.input_state.needs_redraw = false;
                        state.surface.set_frame_callback_pending(true);
                    }
                    Err(e) => {
                        consecutive_render_failures += 1;
                        warn!(
                            "Rendering error (attempt {}/{}): {:#}",
                            consecutive_render_failures, MAX_RENDER_FAILURES, e
                        );

                        if consecutive_render_failures >= MAX_RENDER_FAILURES {
                            return Err(anyhow::anyhow!(
                                "Too many consecutive render failures ({}), exiting: {}",
                                consecutive_render_failures,
                                e
                            ));
                        }

                        state.input_state.needs_redraw = false;
                    }
                }
            } else if state.input_state.needs_redraw && state.surface.frame_callback_pending() {
                debug!("Main loop: Skipping render - frame callback already pending");
            }
        }

        info!("Wayland backend exiting");

        match loop_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
