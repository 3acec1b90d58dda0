// Holds the live Wayland protocol state shared by the backend loop and the handler
// submodules; renders the overlay and runs exports once a clean frame is on screen.
use anyhow::{Context, Result};
use log::{debug, info};
use smithay_client_toolkit::{
    compositor::CompositorState, output::OutputState, registry::RegistryState, seat::SeatState,
    shell::WaylandSurface, shm::Shm,
};
use wayland_client::{
    QueueHandle,
    protocol::{wl_output, wl_shm},
};

use crate::{
    config::Config,
    export::{Exporter, ScreenRegion},
    input::InputState,
    notification,
    ui::{self, UiTheme},
    util::Rect,
};

use super::surface::SurfaceState;

/// Internal Wayland state shared across modules.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    pub(super) surface: SurfaceState,
    pub(super) config: Config,
    pub(super) theme: UiTheme,
    pub(super) input_state: InputState,
    pub(super) exporter: Exporter,

    /// Logical position of the output the overlay is shown on.
    pub(super) output_origin: (i32, i32),
    /// A frame without menus was committed for the pending export.
    pub(super) export_frame_committed: bool,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        surface: SurfaceState,
        config: Config,
        input_state: InputState,
        exporter: Exporter,
    ) -> Self {
        let theme = UiTheme::from_config(&config.ui);
        Self {
            registry_state,
            compositor_state,
            shm,
            output_state,
            seat_state,
            surface,
            config,
            theme,
            input_state,
            exporter,
            output_origin: (0, 0),
            export_frame_committed: false,
        }
    }

    /// Remembers where `output` sits in the global compositor space.
    pub(super) fn track_output(&mut self, output: &wl_output::WlOutput) {
        let Some(info) = self.output_state.info(output) else {
            return;
        };
        if let Some(position) = info.logical_position {
            if position != self.output_origin {
                debug!(
                    "Overlay output '{}' at {:?}",
                    info.name.as_deref().unwrap_or("unknown"),
                    position
                );
            }
            self.output_origin = position;
        }
    }

    pub(super) fn render(&mut self, qh: &QueueHandle<Self>) -> Result<()> {
        debug!("=== RENDER START ===");
        let width = self.surface.width();
        let height = self.surface.height();

        let (buffer, canvas) = {
            let pool = self.surface.ensure_pool(&self.shm)?;
            pool.create_buffer(
                width as i32,
                height as i32,
                (width * 4) as i32,
                wl_shm::Format::Argb8888,
            )
            .context("Failed to create buffer")?
        };

        // SAFETY: `canvas` is a mutable slice from SlotPool with exactly
        // width * height * 4 bytes, matching the ARgb32 format and stride given
        // here. `cairo_surface` and `ctx` are dropped before the buffer is
        // attached and committed, so Cairo never touches the memory after
        // ownership moves to the compositor.
        let cairo_surface = unsafe {
            cairo::ImageSurface::create_for_data_unsafe(
                canvas.as_mut_ptr(),
                cairo::Format::ARgb32,
                width as i32,
                height as i32,
                (width * 4) as i32,
            )
            .context("Failed to create Cairo surface")?
        };

        let ctx = cairo::Context::new(&cairo_surface).context("Failed to create Cairo context")?;

        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint().context("Failed to clear background")?;
        ctx.set_operator(cairo::Operator::Over);

        if self.input_state.is_minimized() {
            ui::render_restore_tab(&ctx, &self.input_state, &self.theme)
                .context("Failed to render restore tab")?;
        } else {
            // The whole window fades with the opacity setting; popups stay opaque.
            ctx.push_group();
            ui::render_window(&ctx, &self.input_state, &self.theme)
                .context("Failed to render window")?;
            ctx.pop_group_to_source()
                .context("Failed to composite window")?;
            ctx.paint_with_alpha(self.input_state.transparency.alpha())
                .context("Failed to paint window")?;
            ui::render_popups(&ctx, &self.input_state, &self.theme)
                .context("Failed to render popups")?;
        }

        cairo_surface.flush();
        drop(ctx);
        drop(cairo_surface);

        let wl_surface = self
            .surface
            .layer_surface()
            .context("Layer surface not created")?
            .wl_surface();
        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);

        let dirty_regions = resolve_damage_regions(
            width.min(i32::MAX as u32) as i32,
            height.min(i32::MAX as u32) as i32,
            self.input_state.take_dirty_regions(),
        );
        for rect in &dirty_regions {
            debug!(
                "Damaging buffer region x={} y={} w={} h={}",
                rect.x, rect.y, rect.width, rect.height
            );
            wl_surface.damage_buffer(rect.x, rect.y, rect.width, rect.height);
        }

        wl_surface.frame(qh, wl_surface.clone());
        wl_surface.commit();

        if self.input_state.pending_export().is_some() {
            self.export_frame_committed = true;
        }
        debug!("=== RENDER COMPLETE ===");

        Ok(())
    }

    /// Applies minimize/restore to the input region and keyboard focus mode.
    pub(super) fn sync_collapsed(&mut self) -> Result<()> {
        let tab = self.input_state.layout().restore_tab();
        self.surface
            .set_collapsed(&self.compositor_state, self.input_state.is_minimized(), tab)
    }

    /// Whether the pending export can run: its clean frame has been presented.
    pub(super) fn export_ready(&self) -> bool {
        self.export_frame_committed
            && !self.surface.frame_callback_pending()
            && self.input_state.pending_export().is_some()
    }

    /// Runs the pending export and reports the result in the overlay.
    pub(super) fn run_pending_export(&mut self) {
        self.export_frame_committed = false;
        let Some(kind) = self.input_state.take_pending_export() else {
            return;
        };

        let region = self.capture_region();
        info!("Exporting {:?} from {}", kind, region.geometry());
        let result = self.exporter.export(kind, region);

        // Key and button releases may have gone to the dialog.
        self.input_state.reset_modifiers();
        if let Some(message) = self.input_state.apply_export_result(kind, result)
            && self.config.ui.desktop_notifications
        {
            notification::notify_message(&message);
        }
        self.input_state.needs_redraw = true;
    }

    /// Screen area holding the drawing, in global compositor coordinates.
    fn capture_region(&self) -> ScreenRegion {
        let area = self.input_state.layout().canvas_area();
        let (origin_x, origin_y) = self.output_origin;
        ScreenRegion {
            x: origin_x + area.x,
            y: origin_y + area.y,
            width: area.width.max(0) as u32,
            height: area.height.max(0) as u32,
        }
    }
}

fn resolve_damage_regions(width: i32, height: i32, mut regions: Vec<Rect>) -> Vec<Rect> {
    regions.retain(Rect::is_valid);

    if regions.is_empty()
        && let Some(full) = Rect::new(0, 0, width, height)
    {
        regions.push(full);
    }

    regions
}
