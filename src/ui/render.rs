/// Cairo rendering of the overlay widgets.
///
/// [`render_window`] draws everything that belongs to the window itself and
/// is composited with the window opacity. [`render_popups`] draws dropdowns,
/// tooltips and dialogs, which stay fully opaque on top.
use super::layout::{Layout, MENU_BAR_HEIGHT, PanelButton, UiTarget};
use super::menu::{MenuEntry, MenuId, accelerator_label};
use super::modal::{Message, MessageKind, Modal};
use crate::config::{Action, UiConfig};
use crate::draw::{Color, paint_canvas};
use crate::input::{DrawMode, InputState};
use crate::util::Rect;

type Rgb = (f64, f64, f64);

const PANEL_BG: Rgb = (0.94, 0.94, 0.94);
const PANEL_BORDER: Rgb = (0.55, 0.55, 0.55);
const BUTTON_BG: Rgb = (0.88, 0.88, 0.88);
const BUTTON_PRESSED: Rgb = (0.75, 0.75, 0.75);
const HIGHLIGHT: Rgb = (0.20, 0.45, 0.85);
const TEXT: Rgb = (0.0, 0.0, 0.0);
const TEXT_ON_HIGHLIGHT: Rgb = (1.0, 1.0, 1.0);
const MUTED_TEXT: Rgb = (0.35, 0.35, 0.35);
const TOOLTIP_BG: Rgb = (1.0, 1.0, 0.88);
const SLIDER_TRACK: Rgb = (0.80, 0.80, 0.80);

const TEXT_PADDING: f64 = 6.0;

/// Font settings for widget text.
#[derive(Debug, Clone, Copy)]
pub struct UiTheme {
    pub font_size: f64,
}

impl Default for UiTheme {
    fn default() -> Self {
        Self::from_config(&UiConfig::default())
    }
}

impl UiTheme {
    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            font_size: config.font_size,
        }
    }

    fn line_height(&self) -> f64 {
        (self.font_size * 1.35).round()
    }
}

fn set_rgb(ctx: &cairo::Context, (r, g, b): Rgb) {
    ctx.set_source_rgb(r, g, b);
}

fn fill_rect(ctx: &cairo::Context, rect: Rect, color: Rgb) -> Result<(), cairo::Error> {
    set_rgb(ctx, color);
    ctx.rectangle(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    );
    ctx.fill()
}

fn stroke_rect(ctx: &cairo::Context, rect: Rect, color: Rgb) -> Result<(), cairo::Error> {
    set_rgb(ctx, color);
    ctx.set_line_width(1.0);
    ctx.rectangle(
        rect.x as f64 + 0.5,
        rect.y as f64 + 0.5,
        rect.width as f64 - 1.0,
        rect.height as f64 - 1.0,
    );
    ctx.stroke()
}

fn select_font(ctx: &cairo::Context, theme: &UiTheme, bold: bool) {
    let weight = if bold {
        cairo::FontWeight::Bold
    } else {
        cairo::FontWeight::Normal
    };
    ctx.select_font_face("Sans", cairo::FontSlant::Normal, weight);
    ctx.set_font_size(theme.font_size);
}

/// Draws `text` with its baseline vertically centered in `rect`, left aligned.
fn text_left(
    ctx: &cairo::Context,
    text: &str,
    rect: Rect,
    color: Rgb,
) -> Result<(), cairo::Error> {
    let extents = ctx.font_extents()?;
    let baseline =
        rect.y as f64 + (rect.height as f64 + extents.ascent() - extents.descent()) / 2.0;
    set_rgb(ctx, color);
    ctx.move_to(rect.x as f64 + TEXT_PADDING, baseline);
    ctx.show_text(text)
}

fn text_right(
    ctx: &cairo::Context,
    text: &str,
    rect: Rect,
    color: Rgb,
) -> Result<(), cairo::Error> {
    let width = ctx.text_extents(text)?.x_advance();
    let extents = ctx.font_extents()?;
    let baseline =
        rect.y as f64 + (rect.height as f64 + extents.ascent() - extents.descent()) / 2.0;
    set_rgb(ctx, color);
    ctx.move_to(
        rect.x as f64 + rect.width as f64 - TEXT_PADDING - width,
        baseline,
    );
    ctx.show_text(text)
}

fn text_centered(
    ctx: &cairo::Context,
    text: &str,
    rect: Rect,
    color: Rgb,
) -> Result<(), cairo::Error> {
    let width = ctx.text_extents(text)?.x_advance();
    let extents = ctx.font_extents()?;
    let baseline =
        rect.y as f64 + (rect.height as f64 + extents.ascent() - extents.descent()) / 2.0;
    set_rgb(ctx, color);
    ctx.move_to(rect.x as f64 + (rect.width as f64 - width) / 2.0, baseline);
    ctx.show_text(text)
}

fn button(
    ctx: &cairo::Context,
    theme: &UiTheme,
    rect: Rect,
    label: &str,
    pressed: bool,
) -> Result<(), cairo::Error> {
    fill_rect(ctx, rect, if pressed { BUTTON_PRESSED } else { BUTTON_BG })?;
    stroke_rect(ctx, rect, PANEL_BORDER)?;
    select_font(ctx, theme, false);
    text_centered(ctx, label, rect, TEXT)
}

fn with_accelerator(label: &str, state: &InputState, action: Action) -> String {
    match accelerator_label(state.bindings(), action) {
        Some(key) => format!("{} ({})", label, key),
        None => label.to_string(),
    }
}

/// Renders the window content: menu bar, canvas and widgets.
pub fn render_window(
    ctx: &cairo::Context,
    state: &InputState,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    let layout = state.layout();
    paint_canvas(ctx, &state.canvas, 0.0, MENU_BAR_HEIGHT as f64)?;
    render_menu_bar(ctx, state, &layout, theme)?;
    render_swatch(ctx, state, &layout, theme)?;
    render_control_panel(ctx, state, &layout, theme)?;

    select_font(ctx, theme, false);
    text_left(ctx, &state.status_text(), layout.info_label(), TEXT)?;

    render_opacity_panel(ctx, state, &layout, theme)?;
    button(
        ctx,
        theme,
        layout.help_button(),
        &with_accelerator("Help", state, Action::ToggleHelp),
        state.pressed_widget() == Some(UiTarget::HelpButton),
    )
}

fn render_menu_bar(
    ctx: &cairo::Context,
    state: &InputState,
    layout: &Layout,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    let bar = layout.menu_bar();
    fill_rect(ctx, bar, PANEL_BG)?;
    set_rgb(ctx, PANEL_BORDER);
    ctx.set_line_width(1.0);
    ctx.move_to(0.0, bar.height as f64 - 0.5);
    ctx.line_to(bar.width as f64, bar.height as f64 - 0.5);
    ctx.stroke()?;

    select_font(ctx, theme, false);
    for menu in MenuId::ALL {
        let title = layout.menu_title(menu);
        if state.ui.open_menu == Some(menu) {
            fill_rect(ctx, title, HIGHLIGHT)?;
            text_centered(ctx, menu.title(), title, TEXT_ON_HIGHLIGHT)?;
        } else {
            text_centered(ctx, menu.title(), title, TEXT)?;
        }
    }
    Ok(())
}

fn render_swatch(
    ctx: &cairo::Context,
    state: &InputState,
    layout: &Layout,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    let swatch = layout.swatch();
    match state.mode {
        DrawMode::Brush => {
            let Color { r, g, b, .. } = state.current_color;
            fill_rect(ctx, swatch, (r, g, b))?;
        }
        DrawMode::Eraser => {
            fill_rect(ctx, swatch, (1.0, 1.0, 1.0))?;
            select_font(ctx, theme, true);
            text_centered(ctx, "ERASE", swatch, TEXT)?;
        }
    }
    stroke_rect(ctx, swatch, TEXT)
}

fn render_control_panel(
    ctx: &cairo::Context,
    state: &InputState,
    layout: &Layout,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    let panel = layout.control_panel();
    fill_rect(ctx, panel, PANEL_BG)?;
    stroke_rect(ctx, panel, PANEL_BORDER)?;

    for panel_button in PanelButton::ALL {
        let (label, action) = match panel_button {
            PanelButton::SaveAs => ("Save as", Action::SaveAs),
            PanelButton::QuickSave => ("Quick save", Action::QuickSave),
            PanelButton::Copy => ("Copy", Action::CopyToClipboard),
        };
        button(
            ctx,
            theme,
            layout.panel_button(panel_button),
            &with_accelerator(label, state, action),
            state.pressed_widget() == Some(UiTarget::PanelButton(panel_button)),
        )?;
    }
    Ok(())
}

fn render_opacity_panel(
    ctx: &cairo::Context,
    state: &InputState,
    layout: &Layout,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    let panel = layout.opacity_panel();
    fill_rect(ctx, panel, PANEL_BG)?;
    stroke_rect(ctx, panel, PANEL_BORDER)?;

    let percent = state.transparency.percent();
    select_font(ctx, theme, true);
    let heading = Rect {
        x: panel.x,
        y: panel.y + 2,
        width: panel.width,
        height: 20,
    };
    text_left(ctx, "Opacity", heading, TEXT)?;
    select_font(ctx, theme, false);
    text_right(ctx, &format!("{}%", percent), heading, MUTED_TEXT)?;

    let track = layout.opacity_slider();
    let groove_y = track.y as f64 + track.height as f64 / 2.0;
    set_rgb(ctx, SLIDER_TRACK);
    ctx.set_line_width(4.0);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.move_to(track.x as f64, groove_y);
    ctx.line_to((track.x + track.width) as f64, groove_y);
    ctx.stroke()?;

    let knob_x = layout.slider_knob_x(percent) as f64;
    set_rgb(ctx, HIGHLIGHT);
    ctx.arc(knob_x, groove_y, 7.0, 0.0, 2.0 * std::f64::consts::PI);
    ctx.fill()?;

    let reset_label = format!(
        "Reset ({}%)",
        ((state.transparency.reset_value() * 100.0) + 1e-9).floor() as u32
    );
    button(
        ctx,
        theme,
        layout.opacity_reset_button(),
        &reset_label,
        state.pressed_widget() == Some(UiTarget::OpacityReset),
    )
}

/// Renders dropdown menus, tooltips and dialogs at full opacity.
pub fn render_popups(
    ctx: &cairo::Context,
    state: &InputState,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    let layout = state.layout();

    if let Some(menu) = state.ui.open_menu {
        render_dropdown(ctx, state, &layout, menu, theme)?;
    }

    if let Some(tooltip) = &state.ui.tooltip {
        render_tooltip(ctx, &layout, &tooltip.text, tooltip.x, tooltip.y, theme)?;
    }

    match &state.ui.modal {
        Some(Modal::Message(message)) => render_message(ctx, &layout, message, theme)?,
        Some(Modal::Help { scroll }) => render_help(ctx, state, &layout, *scroll, theme)?,
        None => {}
    }
    Ok(())
}

fn render_dropdown(
    ctx: &cairo::Context,
    state: &InputState,
    layout: &Layout,
    menu: MenuId,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    let dropdown = layout.menu_dropdown(menu);
    fill_rect(ctx, dropdown, PANEL_BG)?;
    stroke_rect(ctx, dropdown, PANEL_BORDER)?;
    select_font(ctx, theme, false);

    for (index, entry) in menu.entries().iter().enumerate() {
        let Some(rect) = layout.menu_entry(menu, index) else {
            continue;
        };
        match entry {
            MenuEntry::Separator => {
                let y = rect.y as f64 + rect.height as f64 / 2.0;
                set_rgb(ctx, PANEL_BORDER);
                ctx.set_line_width(1.0);
                ctx.move_to(rect.x as f64 + 4.0, y.floor() + 0.5);
                ctx.line_to((rect.x + rect.width) as f64 - 4.0, y.floor() + 0.5);
                ctx.stroke()?;
            }
            MenuEntry::Item { label, action } => {
                let hovered = state.ui.hovered_item == Some(index);
                let color = if hovered {
                    fill_rect(ctx, rect, HIGHLIGHT)?;
                    TEXT_ON_HIGHLIGHT
                } else {
                    TEXT
                };
                text_left(ctx, label, rect, color)?;
                if let Some(key) = accelerator_label(state.bindings(), *action) {
                    text_right(ctx, &key, rect, color)?;
                }
            }
        }
    }
    Ok(())
}

fn render_tooltip(
    ctx: &cairo::Context,
    layout: &Layout,
    text: &str,
    x: i32,
    y: i32,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    select_font(ctx, theme, false);
    let line_height = theme.line_height();
    let mut width: f64 = 0.0;
    for line in text.lines() {
        width = width.max(ctx.text_extents(line)?.x_advance());
    }
    let line_count = text.lines().count().max(1);
    let box_width = (width + 2.0 * TEXT_PADDING).ceil() as i32;
    let box_height = (line_count as f64 * line_height + 6.0).ceil() as i32;

    // Keep the tooltip on screen.
    let x = x.min(layout.width - box_width).max(0);
    let y = y.min(layout.height - box_height).max(0);
    let rect = Rect {
        x,
        y,
        width: box_width,
        height: box_height,
    };
    fill_rect(ctx, rect, TOOLTIP_BG)?;
    stroke_rect(ctx, rect, TEXT)?;

    for (i, line) in text.lines().enumerate() {
        let row = Rect {
            x,
            y: y + 3 + (i as f64 * line_height) as i32,
            width: box_width,
            height: line_height as i32,
        };
        text_left(ctx, line, row, TEXT)?;
    }
    Ok(())
}

fn dialog_frame(
    ctx: &cairo::Context,
    rect: Rect,
    title: &str,
    title_color: Rgb,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    // Soft shadow.
    ctx.set_source_rgba(0.0, 0.0, 0.0, 0.25);
    ctx.rectangle(
        rect.x as f64 + 4.0,
        rect.y as f64 + 4.0,
        rect.width as f64,
        rect.height as f64,
    );
    ctx.fill()?;

    fill_rect(ctx, rect, PANEL_BG)?;
    stroke_rect(ctx, rect, PANEL_BORDER)?;

    let title_bar = Rect {
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: 28,
    };
    fill_rect(ctx, title_bar, title_color)?;
    select_font(ctx, theme, true);
    text_left(ctx, title, title_bar, TEXT_ON_HIGHLIGHT)
}

fn render_message(
    ctx: &cairo::Context,
    layout: &Layout,
    message: &Message,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    let lines = message.lines();
    let rect = layout.message_box(lines.len());
    let title_color = match message.kind {
        MessageKind::Info => HIGHLIGHT,
        MessageKind::Warning => (0.80, 0.55, 0.05),
        MessageKind::Error => (0.75, 0.15, 0.15),
    };
    dialog_frame(ctx, rect, &message.title, title_color, theme)?;

    select_font(ctx, theme, false);
    for (i, line) in lines.iter().enumerate() {
        let row = Rect {
            x: rect.x + 10,
            y: rect.y + 40 + i as i32 * super::layout::MESSAGE_LINE_HEIGHT,
            width: rect.width - 20,
            height: super::layout::MESSAGE_LINE_HEIGHT,
        };
        text_left(ctx, line, row, TEXT)?;
    }

    button(
        ctx,
        theme,
        layout.message_ok_button(lines.len()),
        "OK",
        false,
    )
}

fn render_help(
    ctx: &cairo::Context,
    state: &InputState,
    layout: &Layout,
    scroll: usize,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    let rect = layout.help_window();
    dialog_frame(ctx, rect, "Help", HIGHLIGHT, theme)?;

    let lines = state.help_lines();
    let area = layout.help_text_area();
    let visible = layout.help_visible_lines();

    ctx.save()?;
    ctx.rectangle(
        area.x as f64,
        area.y as f64,
        area.width as f64,
        area.height as f64,
    );
    ctx.clip();
    ctx.select_font_face(
        "Monospace",
        cairo::FontSlant::Normal,
        cairo::FontWeight::Normal,
    );
    ctx.set_font_size((theme.font_size - 1.0).max(8.0));
    for (row, line) in lines.iter().skip(scroll).take(visible).enumerate() {
        let line_rect = Rect {
            x: area.x - TEXT_PADDING as i32,
            y: area.y + row as i32 * super::layout::HELP_LINE_HEIGHT,
            width: area.width,
            height: super::layout::HELP_LINE_HEIGHT,
        };
        text_left(ctx, line, line_rect, TEXT)?;
    }
    ctx.restore()?;

    // Scroll indicator.
    if lines.len() > visible {
        let track_height = area.height as f64;
        let thumb_height = (track_height * visible as f64 / lines.len() as f64).max(12.0);
        let max_scroll = (lines.len() - visible) as f64;
        let thumb_y =
            area.y as f64 + (track_height - thumb_height) * (scroll as f64 / max_scroll);
        set_rgb(ctx, SLIDER_TRACK);
        ctx.rectangle(
            (area.x + area.width) as f64 + 4.0,
            thumb_y,
            6.0,
            thumb_height,
        );
        ctx.fill()?;
    }

    select_font(ctx, theme, false);
    let close_label = format!(
        "Close ({})",
        state.accelerator(Action::ToggleHelp)
    );
    button(ctx, theme, layout.help_close_button(), &close_label, false)
}

/// Renders the restore tab shown while minimized.
pub fn render_restore_tab(
    ctx: &cairo::Context,
    state: &InputState,
    theme: &UiTheme,
) -> Result<(), cairo::Error> {
    let tab = state.layout().restore_tab();
    fill_rect(ctx, tab, PANEL_BG)?;
    stroke_rect(ctx, tab, PANEL_BORDER)?;
    select_font(ctx, theme, true);
    text_centered(
        ctx,
        &with_accelerator("Restore", state, Action::ToggleMinimize),
        tab,
        TEXT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputSettings, Key};

    fn state() -> InputState {
        let mut state = InputState::new(InputSettings::default()).unwrap();
        state.update_screen_dimensions(800, 624);
        state
    }

    fn surface() -> (cairo::ImageSurface, cairo::Context) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 800, 624).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        (surface, ctx)
    }

    fn pixel(surface: &mut cairo::ImageSurface, x: i32, y: i32) -> [u8; 4] {
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y as usize * stride + x as usize * 4;
        [data[offset], data[offset + 1], data[offset + 2], data[offset + 3]]
    }

    #[test]
    fn window_renders_canvas_and_swatch() {
        let mut state = state();
        state.on_key_press(Key::Char('1'));
        let (mut surface, ctx) = surface();
        render_window(&ctx, &state, &UiTheme::default()).unwrap();
        drop(ctx);

        // Swatch interior shows red (BGRA byte order on little-endian).
        let swatch = state.layout().swatch();
        let [b, g, r, a] = pixel(&mut surface, swatch.x + 10, swatch.y + 10);
        assert_eq!((r, g, b, a), (255, 0, 0, 255));

        // Plain canvas is white.
        let [b, g, r, _] = pixel(&mut surface, 600, 500);
        assert_eq!((r, g, b), (255, 255, 255));
    }

    #[test]
    fn popups_render_every_dialog() {
        let mut state = state();
        let (_surface, ctx) = surface();
        let theme = UiTheme::default();

        state.on_key_press(Key::F(1));
        render_popups(&ctx, &state, &theme).unwrap();
        state.on_key_press(Key::Escape);

        state.on_key_press(Key::F(2));
        render_popups(&ctx, &state, &theme).unwrap();
        state.on_key_press(Key::Escape);

        state.on_mouse_motion(400, 400);
        assert!(state.ui.tooltip.is_some());
        render_popups(&ctx, &state, &theme).unwrap();

        render_restore_tab(&ctx, &state, &theme).unwrap();
    }
}
