//! Drawing and overlay UI state.

use crate::config::{Action, Config, KeyBinding, KeybindingsConfig, Palette};
use crate::draw::{Canvas, Color, DirtyTracker, WHITE};
use crate::export::{ExportError, ExportKind, ExportOutcome};
use crate::input::{mode::DrawMode, modifiers::Modifiers};
use crate::transparency::TransparencyController;
use crate::ui::{
    help::{self, HelpContext},
    layout::{Layout, MENU_BAR_HEIGHT, TooltipZone},
    menu::{MenuId, accelerator_label},
    modal::{Message, Modal},
};
use crate::util::Rect;

/// Offset of a tooltip from the pointer position where it was triggered.
const TOOLTIP_OFFSET: (i32, i32) = (20, 10);

/// Startup values for [`InputState`], resolved from the config file and CLI.
#[derive(Debug, Clone)]
pub struct InputSettings {
    pub background: Color,
    pub initial_color: Color,
    pub brush_width: f64,
    pub eraser_width: f64,
    pub transparency: TransparencyController,
    pub palette: Palette,
    pub action_map: Vec<(KeyBinding, Action)>,
    pub show_tooltips: bool,
    /// Export directory as shown in the help text.
    pub export_dir_label: String,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl InputSettings {
    /// Resolves settings from a validated config.
    ///
    /// Invalid keybindings fall back to the built-in set with a warning.
    pub fn from_config(config: &Config) -> Self {
        let action_map = config.keybindings.build_action_map().unwrap_or_else(|err| {
            log::warn!("Invalid keybindings ({}), using defaults", err);
            KeybindingsConfig::default()
                .build_action_map()
                .unwrap_or_default()
        });

        Self {
            background: config.drawing.background.try_to_color().unwrap_or(WHITE),
            initial_color: config.drawing.default_color.to_color(),
            brush_width: config.drawing.brush_width,
            eraser_width: config.drawing.eraser_width,
            transparency: TransparencyController::from_config(&config.transparency),
            palette: config.resolved_palette(),
            action_map,
            show_tooltips: config.ui.show_tooltips,
            export_dir_label: config.export.directory.clone(),
        }
    }
}

/// A hover tooltip anchored where the pointer entered its zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub zone: TooltipZone,
    pub text: String,
    pub x: i32,
    pub y: i32,
}

/// Transient widget state: menus, dialogs, tooltips and pressed buttons.
#[derive(Debug, Default)]
pub struct UiState {
    /// Menu whose dropdown is showing.
    pub open_menu: Option<MenuId>,
    /// Dropdown entry under the pointer.
    pub hovered_item: Option<usize>,
    /// Dialog blocking the rest of the overlay.
    pub modal: Option<Modal>,
    pub tooltip: Option<Tooltip>,
    /// Zone the pointer is currently in; tooltips only reappear after it changes.
    pub(crate) hover_zone: Option<TooltipZone>,
    /// Widget that received the last left press (buttons fire on release).
    pub(crate) pressed: Option<crate::ui::layout::UiTarget>,
    /// The dialog's OK/Close button received the last left press.
    pub(crate) modal_button_pressed: bool,
    /// The opacity slider knob is being dragged.
    pub(crate) slider_drag: bool,
}

/// Main input state containing the drawing surface and all session state.
///
/// Keyboard and pointer events from the backend update this struct; the
/// backend then renders from it and runs any export it requests.
pub struct InputState {
    /// Raster the strokes are painted into (the area below the menu bar)
    pub canvas: Canvas,
    /// Current brush color
    pub current_color: Color,
    /// Brush or eraser
    pub mode: DrawMode,
    pub brush_width: f64,
    pub eraser_width: f64,
    /// Window opacity
    pub transparency: TransparencyController,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Whether user requested to exit the overlay
    pub should_exit: bool,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Surface width in pixels (set by backend after configuration)
    pub screen_width: u32,
    /// Surface height in pixels (set by backend after configuration)
    pub screen_height: u32,
    pub ui: UiState,
    /// Tracks dirty regions between renders, in surface coordinates
    pub(crate) dirty_tracker: DirtyTracker,
    /// Previous pointer position of the stroke in progress (canvas coordinates)
    pub(crate) stroke_anchor: Option<(i32, i32)>,
    pub(crate) minimized: bool,
    pub(crate) palette: Palette,
    pub(crate) action_map: Vec<(KeyBinding, Action)>,
    pub(crate) show_tooltips: bool,
    pub(crate) pointer: (i32, i32),
    export_dir_label: String,
    pending_export: Option<ExportKind>,
}

impl InputState {
    /// Creates the state with a 1x1 canvas.
    ///
    /// The backend resizes it via [`InputState::update_screen_dimensions`]
    /// once the surface is configured.
    pub fn new(settings: InputSettings) -> Result<Self, cairo::Error> {
        let canvas = Canvas::new(1, 1, settings.background)?;
        Ok(Self {
            canvas,
            current_color: settings.initial_color,
            mode: DrawMode::Brush,
            brush_width: settings.brush_width,
            eraser_width: settings.eraser_width,
            transparency: settings.transparency,
            modifiers: Modifiers::new(),
            should_exit: false,
            needs_redraw: true,
            screen_width: 0,
            screen_height: 0,
            ui: UiState::default(),
            dirty_tracker: DirtyTracker::new(),
            stroke_anchor: None,
            minimized: false,
            palette: settings.palette,
            action_map: settings.action_map,
            show_tooltips: settings.show_tooltips,
            pointer: (0, 0),
            export_dir_label: settings.export_dir_label,
            pending_export: None,
        })
    }

    /// Updates surface dimensions and resizes the canvas to fit below the menu bar.
    pub fn update_screen_dimensions(&mut self, width: u32, height: u32) {
        self.screen_width = width;
        self.screen_height = height;
        let (canvas_width, canvas_height) = self.layout().canvas_size();
        if let Err(err) = self.canvas.resize(canvas_width, canvas_height) {
            log::warn!("Failed to resize canvas: {}", err);
        }
        self.mark_full_redraw();
    }

    /// Geometry of the widgets for the current surface size.
    pub fn layout(&self) -> Layout {
        Layout::new(
            self.screen_width.min(i32::MAX as u32) as i32,
            self.screen_height.min(i32::MAX as u32) as i32,
        )
    }

    /// Drains pending dirty rectangles for the current surface size.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let width = self.screen_width.min(i32::MAX as u32) as i32;
        let height = self.screen_height.min(i32::MAX as u32) as i32;
        self.dirty_tracker.take_regions(width, height)
    }

    pub(crate) fn mark_full_redraw(&mut self) {
        self.dirty_tracker.mark_full();
        self.needs_redraw = true;
    }

    /// Marks canvas-local damage, shifted into surface coordinates.
    pub(crate) fn mark_canvas_damage(&mut self, rect: Option<Rect>) {
        self.dirty_tracker
            .mark_optional_rect(rect.map(|r| r.translated(0, MENU_BAR_HEIGHT)));
        self.needs_redraw = true;
    }

    /// Whether the overlay is collapsed to its restore tab.
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn bindings(&self) -> &[(KeyBinding, Action)] {
        &self.action_map
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.stroke_anchor.is_some()
    }

    /// Color and width the next segment will use.
    pub fn stroke_style(&self) -> (Color, f64) {
        match self.mode {
            DrawMode::Brush => (self.current_color, self.brush_width),
            DrawMode::Eraser => (self.canvas.background(), self.eraser_width),
        }
    }

    /// Look up the first binding matching the key and current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }

    /// Accelerator text for `action`, or an empty string when unbound.
    pub fn accelerator(&self, action: Action) -> String {
        accelerator_label(&self.action_map, action).unwrap_or_default()
    }

    /// Status label text shown under the export panel.
    pub fn status_text(&self) -> String {
        self.transparency.status_text(
            &self.accelerator(Action::ToggleHelp),
            &self.accelerator(Action::ToggleMinimize),
        )
    }

    /// Lines of the help window for the current settings.
    pub fn help_lines(&self) -> Vec<String> {
        help::help_lines(&HelpContext {
            palette: &self.palette,
            bindings: &self.action_map,
            opacity_percent: self.transparency.percent(),
            reset_percent: percent_of(self.transparency.reset_value()),
            export_dir: &self.export_dir_label,
        })
    }

    pub(crate) fn opacity_info_message(&self) -> Message {
        Message::info(
            "Opacity control",
            help::opacity_info_text(
                self.transparency.percent(),
                percent_of(self.transparency.reset_value()),
                &self.action_map,
            ),
        )
    }

    /// Shows a dialog, replacing any open menu or tooltip.
    pub fn show_modal(&mut self, modal: Modal) {
        self.ui.open_menu = None;
        self.ui.hovered_item = None;
        self.ui.tooltip = None;
        self.ui.pressed = None;
        self.ui.slider_drag = false;
        self.ui.modal_button_pressed = false;
        self.stroke_anchor = None;
        self.ui.modal = Some(modal);
        self.mark_full_redraw();
    }

    pub(crate) fn dismiss_modal(&mut self) {
        if self.ui.modal.take().is_some() {
            self.ui.modal_button_pressed = false;
            self.mark_full_redraw();
        }
    }

    pub(crate) fn close_menu(&mut self) {
        if self.ui.open_menu.take().is_some() {
            self.ui.hovered_item = None;
            self.mark_full_redraw();
        }
    }

    pub(crate) fn hide_tooltip(&mut self) {
        if self.ui.tooltip.take().is_some() {
            self.mark_full_redraw();
        }
    }

    /// Tracks the hover zone and shows its tooltip when the zone changes.
    pub(crate) fn update_hover_zone(&mut self, zone: Option<TooltipZone>, x: i32, y: i32) {
        if self.ui.hover_zone == zone {
            return;
        }
        self.ui.hover_zone = zone;
        self.ui.tooltip = match zone {
            Some(zone) if self.show_tooltips => Some(Tooltip {
                zone,
                text: help::tooltip_text(zone, &self.action_map),
                x: x + TOOLTIP_OFFSET.0,
                y: y + TOOLTIP_OFFSET.1,
            }),
            _ => None,
        };
        self.mark_full_redraw();
    }

    /// Pointer left the surface.
    pub fn on_pointer_leave(&mut self) {
        self.ui.hover_zone = None;
        self.hide_tooltip();
        self.ui.hovered_item = None;
    }

    /// Collapses to the restore tab or brings the full overlay back.
    pub(crate) fn toggle_minimized(&mut self) {
        self.minimized = !self.minimized;
        self.stroke_anchor = None;
        self.ui.open_menu = None;
        self.ui.hovered_item = None;
        self.ui.tooltip = None;
        self.ui.hover_zone = None;
        self.ui.pressed = None;
        self.ui.slider_drag = false;
        self.mark_full_redraw();
        log::info!(
            "Overlay {}",
            if self.minimized { "minimized" } else { "restored" }
        );
    }

    /// Takes and clears any pending export request.
    ///
    /// Called by the backend once the frame without menus has been presented.
    pub fn take_pending_export(&mut self) -> Option<ExportKind> {
        self.pending_export.take()
    }

    /// Returns the pending export without clearing it.
    pub fn pending_export(&self) -> Option<ExportKind> {
        self.pending_export
    }

    pub(super) fn request_export(&mut self, kind: ExportKind) {
        self.close_menu();
        self.hide_tooltip();
        self.stroke_anchor = None;
        self.pending_export = Some(kind);
        self.needs_redraw = true;
        log::debug!("Export requested: {:?}", kind);
    }

    /// Reports an export result to the user.
    ///
    /// Returns the message shown, if any, so the caller can mirror it as a
    /// desktop notification. Cancelled dialogs and interactive saves are silent.
    pub fn apply_export_result(
        &mut self,
        kind: ExportKind,
        result: Result<ExportOutcome, ExportError>,
    ) -> Option<Message> {
        let message = match result {
            Ok(ExportOutcome::Saved {
                kind: ExportKind::Pdf,
                path,
            }) => Some(Message::info(
                "Saved",
                format!("PDF saved as:\n{}", path.display()),
            )),
            Ok(ExportOutcome::Saved {
                kind: ExportKind::Quick,
                path,
            }) => Some(Message::info(
                "Saved",
                format!("Drawing saved as:\n{}", path.display()),
            )),
            Ok(ExportOutcome::Saved { .. }) | Ok(ExportOutcome::Cancelled) => None,
            Ok(ExportOutcome::Copied) => Some(Message::info(
                "Copied",
                "Drawing copied to the clipboard!",
            )),
            Err(err @ ExportError::ClipboardUnavailable(_)) => {
                Some(Message::warning("Clipboard unavailable", err.to_string()))
            }
            Err(err) => {
                let body = match kind {
                    ExportKind::Clipboard => format!("Could not copy:\n{}", err),
                    ExportKind::Pdf => format!("Could not save PDF:\n{}", err),
                    ExportKind::Interactive | ExportKind::Quick => {
                        format!("Could not save the file:\n{}", err)
                    }
                };
                Some(Message::error("Error", body))
            }
        };

        if let Some(message) = &message {
            self.show_modal(Modal::Message(message.clone()));
        }
        message
    }
}

fn percent_of(value: f64) -> u32 {
    ((value * 100.0) + 1e-9).floor() as u32
}
