//! Layer-surface bookkeeping: size, configure state, frame pacing and the shm pool.

use anyhow::{Context, Result};
use log::{debug, info};
use smithay_client_toolkit::{
    compositor::{CompositorState, Region},
    shell::{
        WaylandSurface,
        wlr_layer::{KeyboardInteractivity, LayerSurface},
    },
    shm::{Shm, slot::SlotPool},
};

use crate::util::Rect;

/// Buffers kept in the slot pool.
const BUFFER_COUNT: usize = 2;

/// Tracks the overlay's layer surface and the buffers drawn into it.
pub struct SurfaceState {
    layer_surface: Option<LayerSurface>,
    pool: Option<SlotPool>,
    width: u32,
    height: u32,
    configured: bool,
    frame_callback_pending: bool,
    /// Whether the input region is currently restricted to the restore tab.
    collapsed: bool,
}

impl SurfaceState {
    pub fn new() -> Self {
        Self {
            layer_surface: None,
            pool: None,
            width: 0,
            height: 0,
            configured: false,
            frame_callback_pending: false,
            collapsed: false,
        }
    }

    pub fn set_layer_surface(&mut self, surface: LayerSurface) {
        self.layer_surface = Some(surface);
    }

    pub fn layer_surface(&self) -> Option<&LayerSurface> {
        self.layer_surface.as_ref()
    }

    /// Updates the surface dimensions, returning `true` if the size changed.
    ///
    /// A size change invalidates the buffer pool.
    pub fn update_dimensions(&mut self, width: u32, height: u32) -> bool {
        let changed = self.width != width || self.height != height;
        self.width = width;
        self.height = height;
        if changed {
            self.pool = None;
        }
        changed
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_configured(&mut self, configured: bool) {
        self.configured = configured;
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn set_frame_callback_pending(&mut self, pending: bool) {
        self.frame_callback_pending = pending;
    }

    pub fn frame_callback_pending(&self) -> bool {
        self.frame_callback_pending
    }

    /// Ensures a shared memory pool large enough for the current size exists.
    pub fn ensure_pool(&mut self, shm: &Shm) -> Result<&mut SlotPool> {
        if self.pool.is_none() {
            let buffer_size = (self.width * self.height * 4) as usize;
            let pool_size = buffer_size * BUFFER_COUNT;
            info!(
                "Creating new SlotPool ({}x{}, {} bytes, {} buffers)",
                self.width, self.height, pool_size, BUFFER_COUNT
            );
            let pool = SlotPool::new(pool_size, shm).context("Failed to create slot pool")?;
            self.pool = Some(pool);
        }

        self.pool
            .as_mut()
            .context("Buffer pool not initialized despite previous check")
    }

    /// Restricts input to `tab` while minimized, or restores full-surface input.
    ///
    /// While collapsed the overlay only takes keyboard focus on demand so the
    /// windows underneath stay usable.
    pub fn set_collapsed(
        &mut self,
        compositor: &CompositorState,
        collapsed: bool,
        tab: Rect,
    ) -> Result<()> {
        if self.collapsed == collapsed {
            return Ok(());
        }
        let layer_surface = self
            .layer_surface
            .as_ref()
            .context("Layer surface not created")?;
        let wl_surface = layer_surface.wl_surface();

        if collapsed {
            let region = Region::new(compositor).context("Failed to create input region")?;
            region.add(tab.x, tab.y, tab.width, tab.height);
            wl_surface.set_input_region(Some(region.wl_region()));
            layer_surface.set_keyboard_interactivity(KeyboardInteractivity::OnDemand);
            debug!(
                "Input region limited to restore tab at ({}, {})",
                tab.x, tab.y
            );
        } else {
            wl_surface.set_input_region(None);
            layer_surface.set_keyboard_interactivity(KeyboardInteractivity::Exclusive);
            debug!("Input region restored to the full surface");
        }

        self.collapsed = collapsed;
        Ok(())
    }
}
