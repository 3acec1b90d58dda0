// Save dialog wrapper that steps the overlay out of the way while the native
// dialog is open, then puts it back on top.
use std::path::{Path, PathBuf};

use log::{info, warn};
use smithay_client_toolkit::shell::{
    WaylandSurface,
    wlr_layer::{KeyboardInteractivity, Layer, LayerSurface},
};
use wayland_client::Connection;

use crate::export::{NativeSaveDialog, SaveDialog};

pub(super) struct LoweredOverlayDialog {
    conn: Connection,
    layer_surface: LayerSurface,
    inner: NativeSaveDialog,
}

impl LoweredOverlayDialog {
    pub(super) fn new(conn: Connection, layer_surface: LayerSurface) -> Self {
        Self {
            conn,
            layer_surface,
            inner: NativeSaveDialog,
        }
    }

    fn place(&self, layer: Layer, interactivity: KeyboardInteractivity) {
        self.layer_surface.set_layer(layer);
        self.layer_surface.set_keyboard_interactivity(interactivity);
        self.layer_surface.wl_surface().commit();
        // The dialog blocks the event loop, so the requests must leave now.
        if let Err(e) = self.conn.flush() {
            warn!("Failed to flush Wayland connection: {}", e);
        }
    }
}

impl SaveDialog for LoweredOverlayDialog {
    fn pick_path(&self, directory: &Path, default_name: &str) -> Option<PathBuf> {
        info!("Lowering overlay for the save dialog");
        self.place(Layer::Bottom, KeyboardInteractivity::None);
        let picked = self.inner.pick_path(directory, default_name);
        self.place(Layer::Overlay, KeyboardInteractivity::Exclusive);
        info!("Overlay restored after the save dialog");
        picked
    }
}
