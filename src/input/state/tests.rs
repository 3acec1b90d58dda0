use super::*;
use crate::config::{Config, KeybindingsConfig};
use crate::draw::Color;
use crate::export::{ExportError, ExportKind, ExportOutcome};
use crate::input::{DrawMode, Key, MouseButton};
use crate::ui::layout::TooltipZone;
use crate::ui::menu::MenuId;
use crate::ui::modal::{MessageKind, Modal};
use std::path::PathBuf;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 624;

fn create_test_input_state() -> InputState {
    create_with_settings(InputSettings::default())
}

fn create_with_settings(settings: InputSettings) -> InputState {
    let mut state = InputState::new(settings).unwrap();
    state.update_screen_dimensions(WIDTH, HEIGHT);
    state
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn press_key(state: &mut InputState, key: Key) {
    state.on_key_press(key);
    state.on_key_release(key);
}

fn press_with(state: &mut InputState, modifier: Key, key: Key) {
    state.on_key_press(modifier);
    state.on_key_press(key);
    state.on_key_release(key);
    state.on_key_release(modifier);
}

fn click(state: &mut InputState, x: i32, y: i32) {
    state.on_mouse_press(MouseButton::Left, x, y);
    state.on_mouse_release(MouseButton::Left, x, y);
}

fn drag(state: &mut InputState, from: (i32, i32), to: (i32, i32)) {
    state.on_mouse_press(MouseButton::Left, from.0, from.1);
    state.on_mouse_motion(to.0, to.1);
    state.on_mouse_release(MouseButton::Left, to.0, to.1);
}

#[test]
fn test_defaults_from_config() {
    let state = create_test_input_state();
    assert_eq!(state.current_color, Color::from_rgb8(0, 0, 0));
    assert_eq!(state.mode, DrawMode::Brush);
    assert_eq!(state.brush_width, 3.0);
    assert_eq!(state.eraser_width, 20.0);
    assert_eq!(state.transparency.alpha(), 1.0);
    assert_eq!(state.canvas.width(), 800);
    assert_eq!(state.canvas.height(), 600);
    assert!(!state.is_minimized());
}

#[test]
fn test_palette_key_selects_color_and_brush() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::Char('s'));
    assert_eq!(state.mode, DrawMode::Eraser);

    press_key(&mut state, Key::Char('3'));
    assert_eq!(state.current_color, Color::from_rgb8(0, 0, 255));
    assert_eq!(state.mode, DrawMode::Brush);

    press_key(&mut state, Key::Char('u'));
    assert_eq!(state.current_color, Color::from_rgb8(0, 0, 128));
}

#[test]
fn test_unknown_key_is_ignored() {
    let mut state = create_test_input_state();
    let color = state.current_color;
    press_key(&mut state, Key::Char('z'));
    press_key(&mut state, Key::F(9));
    assert_eq!(state.current_color, color);
    assert_eq!(state.mode, DrawMode::Brush);
    assert!(state.pending_export().is_none());
    assert!(!state.should_exit);
}

#[test]
fn test_palette_ignored_with_ctrl() {
    let mut state = create_test_input_state();
    let color = state.current_color;
    press_with(&mut state, Key::Ctrl, Key::Char('1'));
    assert_eq!(state.current_color, color);
}

#[test]
fn test_opacity_keys() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::Char('['));
    assert!(approx(state.transparency.alpha(), 0.95));
    press_key(&mut state, Key::Char('-'));
    assert!(approx(state.transparency.alpha(), 0.90));
    press_key(&mut state, Key::Char(']'));
    assert!(approx(state.transparency.alpha(), 0.95));
    // '+' is typed with Shift on most layouts.
    press_with(&mut state, Key::Shift, Key::Char('+'));
    assert!(approx(state.transparency.alpha(), 1.0));

    press_key(&mut state, Key::Char('0'));
    assert!(approx(state.transparency.alpha(), 0.10));
    press_key(&mut state, Key::Char('a'));
    assert!(approx(state.transparency.alpha(), 0.80));
    press_key(&mut state, Key::Char('a'));
    assert!(approx(state.transparency.alpha(), 0.10));
}

#[test]
fn test_status_text_follows_opacity() {
    let mut state = create_test_input_state();
    assert_eq!(
        state.status_text(),
        "Opacity: 100% | F1 - help | Esc - minimize"
    );
    press_key(&mut state, Key::Char('0'));
    assert!(state.status_text().starts_with("Opacity: 10%"));
}

#[test]
fn test_ctrl_s_saves_instead_of_erasing() {
    let mut state = create_test_input_state();
    press_with(&mut state, Key::Ctrl, Key::Char('s'));
    assert_eq!(state.mode, DrawMode::Brush);
    assert_eq!(state.take_pending_export(), Some(ExportKind::Interactive));
    assert_eq!(state.take_pending_export(), None);

    press_with(&mut state, Key::Ctrl, Key::Char('c'));
    assert_eq!(state.take_pending_export(), Some(ExportKind::Clipboard));
    press_with(&mut state, Key::Ctrl, Key::Char('q'));
    assert_eq!(state.take_pending_export(), Some(ExportKind::Quick));
    press_with(&mut state, Key::Ctrl, Key::Char('p'));
    assert_eq!(state.take_pending_export(), Some(ExportKind::Pdf));
}

#[test]
fn test_eraser_keys() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::Char('s'));
    assert!(state.mode.is_eraser());
    assert_eq!(state.stroke_style(), (state.canvas.background(), 20.0));
    press_key(&mut state, Key::Char('d'));
    assert_eq!(state.mode, DrawMode::Brush);
    assert_eq!(state.stroke_style(), (state.current_color, 3.0));
}

#[test]
fn test_alt_f4_exits() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::F(4));
    assert!(!state.should_exit);
    press_with(&mut state, Key::Alt, Key::F(4));
    assert!(state.should_exit);
}

#[test]
fn test_stroke_draws_segments_in_canvas_coordinates() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::Char('1'));
    drag(&mut state, (300, 400), (500, 400));

    // Surface y 400 is canvas y 376.
    assert_eq!(state.canvas.pixel_rgb(400, 376), Some([255, 0, 0]));
    assert_eq!(state.canvas.pixel_rgb(400, 300), Some([255, 255, 255]));
    assert!(!state.is_drawing());
}

#[test]
fn test_right_angle_stroke_covers_both_legs_and_corner() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::Char('2'));
    state.on_mouse_press(MouseButton::Left, 300, 400);
    state.on_mouse_motion(500, 400);
    state.on_mouse_motion(500, 200);
    state.on_mouse_release(MouseButton::Left, 500, 200);

    let green = Some([0, 128, 0]);
    assert_eq!(state.canvas.pixel_rgb(400, 376), green);
    assert_eq!(state.canvas.pixel_rgb(500, 276), green);
    assert_eq!(state.canvas.pixel_rgb(500, 376), green);
    assert_eq!(state.canvas.pixel_rgb(400, 276), Some([255, 255, 255]));
}

#[test]
fn test_press_alone_draws_nothing() {
    let mut state = create_test_input_state();
    state.on_mouse_press(MouseButton::Left, 400, 400);
    assert!(state.is_drawing());
    assert_eq!(state.canvas.pixel_rgb(400, 376), Some([255, 255, 255]));
    state.on_mouse_release(MouseButton::Left, 400, 400);
    assert!(!state.is_drawing());
}

#[test]
fn test_eraser_paints_background() {
    let mut state = create_test_input_state();
    drag(&mut state, (300, 400), (500, 400));
    assert_eq!(state.canvas.pixel_rgb(400, 376), Some([0, 0, 0]));

    press_key(&mut state, Key::Char('s'));
    drag(&mut state, (300, 400), (500, 400));
    assert_eq!(state.canvas.pixel_rgb(400, 376), Some([255, 255, 255]));
}

#[test]
fn test_segment_uses_mode_active_when_drawn() {
    let mut state = create_test_input_state();
    state.on_mouse_press(MouseButton::Left, 300, 400);
    state.on_mouse_motion(400, 400);
    press_key(&mut state, Key::Char('1'));
    state.on_mouse_motion(500, 400);
    state.on_mouse_release(MouseButton::Left, 500, 400);

    assert_eq!(state.canvas.pixel_rgb(350, 376), Some([0, 0, 0]));
    assert_eq!(state.canvas.pixel_rgb(450, 376), Some([255, 0, 0]));
}

#[test]
fn test_stroke_damage_is_in_surface_coordinates() {
    let mut state = create_test_input_state();
    let _ = state.take_dirty_regions();
    drag(&mut state, (300, 400), (310, 400));
    let regions = state.take_dirty_regions();
    assert!(regions.iter().any(|r| r.contains(305, 400)));
}

#[test]
fn test_press_on_widget_does_not_draw() {
    let mut state = create_test_input_state();
    // Swatch sits at surface (10, 34).
    drag(&mut state, (20, 40), (400, 400));
    assert_eq!(state.canvas.pixel_rgb(200, 200), Some([255, 255, 255]));
    assert_eq!(state.canvas.pixel_rgb(399, 375), Some([255, 255, 255]));
}

#[test]
fn test_clear_canvas_key() {
    let mut state = create_test_input_state();
    drag(&mut state, (300, 400), (500, 400));
    press_key(&mut state, Key::Char('c'));
    assert_eq!(state.canvas.pixel_rgb(400, 376), Some([255, 255, 255]));
}

#[test]
fn test_escape_minimizes_and_restores() {
    let mut state = create_test_input_state();
    drag(&mut state, (300, 400), (500, 400));

    press_key(&mut state, Key::Escape);
    assert!(state.is_minimized());

    // Only the minimize binding works while minimized.
    press_key(&mut state, Key::Char('1'));
    press_key(&mut state, Key::Char('['));
    assert_eq!(state.current_color, Color::from_rgb8(0, 0, 0));
    assert_eq!(state.transparency.alpha(), 1.0);

    press_key(&mut state, Key::Escape);
    assert!(!state.is_minimized());
    assert_eq!(state.canvas.pixel_rgb(400, 376), Some([0, 0, 0]));
}

#[test]
fn test_restore_tab_click() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::Escape);
    click(&mut state, 400, 400);
    assert!(state.is_minimized());
    let tab = state.layout().restore_tab();
    click(&mut state, tab.x + 5, tab.y + 5);
    assert!(!state.is_minimized());
}

#[test]
fn test_help_toggle_and_modal_keys() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::F(1));
    assert!(matches!(state.ui.modal, Some(Modal::Help { scroll: 0 })));

    // Palette keys are swallowed by the dialog.
    press_key(&mut state, Key::Char('1'));
    assert_eq!(state.current_color, Color::from_rgb8(0, 0, 0));

    press_key(&mut state, Key::F(1));
    assert!(state.ui.modal.is_none());

    press_key(&mut state, Key::F(1));
    press_key(&mut state, Key::Return);
    assert!(state.ui.modal.is_none());

    press_key(&mut state, Key::F(1));
    press_key(&mut state, Key::Space);
    assert!(state.ui.modal.is_none());
}

#[test]
fn test_escape_closes_dialog_without_minimizing() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::F(2));
    press_key(&mut state, Key::Escape);
    assert!(state.ui.modal.is_none());
    assert!(!state.is_minimized());
}

#[test]
fn test_help_scroll_is_clamped() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::F(1));
    press_key(&mut state, Key::Up);
    assert!(matches!(state.ui.modal, Some(Modal::Help { scroll: 0 })));

    let max_scroll = state
        .help_lines()
        .len()
        .saturating_sub(state.layout().help_visible_lines());
    for _ in 0..200 {
        press_key(&mut state, Key::Down);
    }
    assert!(matches!(state.ui.modal, Some(Modal::Help { scroll }) if scroll == max_scroll));

    state.on_scroll(-1000);
    assert!(matches!(state.ui.modal, Some(Modal::Help { scroll: 0 })));
}

#[test]
fn test_help_close_button() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::F(1));
    let button = state.layout().help_close_button();
    click(&mut state, button.x + 5, button.y + 5);
    assert!(state.ui.modal.is_none());
}

#[test]
fn test_opacity_info_message() {
    let mut state = create_test_input_state();
    press_key(&mut state, Key::Char('0'));
    press_key(&mut state, Key::F(2));
    let Some(Modal::Message(message)) = &state.ui.modal else {
        panic!("expected opacity info message");
    };
    assert!(message.body.contains("Current opacity: 10%"));
    assert!(message.body.contains("[ or -"));

    let lines = message.lines().len();
    let ok = state.layout().message_ok_button(lines);
    // Press outside, release on the button: nothing happens.
    state.on_mouse_press(MouseButton::Left, 5, 300);
    state.on_mouse_release(MouseButton::Left, ok.x + 5, ok.y + 5);
    assert!(state.ui.modal.is_some());

    click(&mut state, ok.x + 5, ok.y + 5);
    assert!(state.ui.modal.is_none());
}

#[test]
fn test_menu_item_requests_export() {
    let mut state = create_test_input_state();
    let layout = state.layout();
    let title = layout.menu_title(MenuId::File);
    click(&mut state, title.x + 5, title.y + 5);
    assert_eq!(state.ui.open_menu, Some(MenuId::File));

    let entry = layout.menu_entry(MenuId::File, 1).unwrap();
    click(&mut state, entry.x + 5, entry.y + 5);
    assert_eq!(state.ui.open_menu, None);
    assert_eq!(state.take_pending_export(), Some(ExportKind::Quick));
}

#[test]
fn test_menu_exit_item() {
    let mut state = create_test_input_state();
    let layout = state.layout();
    let title = layout.menu_title(MenuId::File);
    click(&mut state, title.x + 5, title.y + 5);
    let entry = layout.menu_entry(MenuId::File, 7).unwrap();
    click(&mut state, entry.x + 5, entry.y + 5);
    assert!(state.should_exit);
}

#[test]
fn test_escape_closes_menu_only() {
    let mut state = create_test_input_state();
    let title = state.layout().menu_title(MenuId::Settings);
    click(&mut state, title.x + 5, title.y + 5);
    assert_eq!(state.ui.open_menu, Some(MenuId::Settings));

    press_key(&mut state, Key::Escape);
    assert_eq!(state.ui.open_menu, None);
    assert!(!state.is_minimized());
}

#[test]
fn test_click_outside_menu_closes_without_drawing() {
    let mut state = create_test_input_state();
    let title = state.layout().menu_title(MenuId::Help);
    click(&mut state, title.x + 5, title.y + 5);
    drag(&mut state, (400, 400), (500, 400));
    assert_eq!(state.ui.open_menu, None);
    assert_eq!(state.canvas.pixel_rgb(450, 376), Some([255, 255, 255]));
}

#[test]
fn test_panel_buttons_fire_on_release() {
    let mut state = create_test_input_state();
    let layout = state.layout();
    let save_as = layout.panel_button(crate::ui::layout::PanelButton::SaveAs);
    state.on_mouse_press(MouseButton::Left, save_as.x + 5, save_as.y + 5);
    assert_eq!(state.pending_export(), None);
    state.on_mouse_release(MouseButton::Left, save_as.x + 5, save_as.y + 5);
    assert_eq!(state.take_pending_export(), Some(ExportKind::Interactive));

    // Releasing elsewhere cancels the click.
    let copy = layout.panel_button(crate::ui::layout::PanelButton::Copy);
    state.on_mouse_press(MouseButton::Left, copy.x + 5, copy.y + 5);
    state.on_mouse_release(MouseButton::Left, 500, 500);
    assert_eq!(state.take_pending_export(), None);
}

#[test]
fn test_slider_drag_sets_opacity() {
    let mut state = create_test_input_state();
    let track = state.layout().opacity_slider();
    let y = track.y + track.height / 2;
    state.on_mouse_press(MouseButton::Left, track.x, y);
    assert!(approx(state.transparency.alpha(), 0.01));
    state.on_mouse_motion(track.x + track.width - 1, y);
    assert!(approx(state.transparency.alpha(), 1.0));
    state.on_mouse_release(MouseButton::Left, track.x + track.width - 1, y);

    // The slider can go below 5%; a keyboard decrease from there lands on 5%.
    state.on_mouse_press(MouseButton::Left, track.x, y);
    state.on_mouse_release(MouseButton::Left, track.x, y);
    assert!(approx(state.transparency.alpha(), 0.01));
    press_key(&mut state, Key::Char('['));
    assert!(approx(state.transparency.alpha(), 0.05));
}

#[test]
fn test_reset_button() {
    let mut state = create_test_input_state();
    let reset = state.layout().opacity_reset_button();
    click(&mut state, reset.x + 5, reset.y + 5);
    assert!(approx(state.transparency.alpha(), 0.10));
}

#[test]
fn test_tooltips_follow_zones() {
    let mut state = create_test_input_state();
    let swatch = state.layout().swatch();
    state.on_mouse_motion(swatch.x + 2, swatch.y + 2);
    let tooltip = state.ui.tooltip.clone().unwrap();
    assert_eq!(tooltip.zone, TooltipZone::Swatch);
    assert_eq!((tooltip.x, tooltip.y), (swatch.x + 22, swatch.y + 12));

    state.on_mouse_motion(400, 400);
    assert_eq!(state.ui.tooltip.as_ref().unwrap().zone, TooltipZone::Canvas);

    // Drawing hides it and it stays hidden while in the same zone.
    state.on_mouse_press(MouseButton::Left, 400, 400);
    assert!(state.ui.tooltip.is_none());
    state.on_mouse_release(MouseButton::Left, 400, 400);
    state.on_mouse_motion(410, 400);
    assert!(state.ui.tooltip.is_none());

    state.on_pointer_leave();
    assert!(state.ui.tooltip.is_none());
}

#[test]
fn test_tooltips_can_be_disabled() {
    let mut config = Config::default();
    config.ui.show_tooltips = false;
    let mut state = create_with_settings(InputSettings::from_config(&config));
    state.on_mouse_motion(400, 400);
    assert!(state.ui.tooltip.is_none());
}

#[test]
fn test_custom_keybindings() {
    let mut config = Config::default();
    config.keybindings.quick_save = vec!["F5".to_string()];
    let mut state = create_with_settings(InputSettings::from_config(&config));
    press_key(&mut state, Key::F(5));
    assert_eq!(state.take_pending_export(), Some(ExportKind::Quick));
    press_with(&mut state, Key::Ctrl, Key::Char('q'));
    assert_eq!(state.take_pending_export(), None);
}

#[test]
fn test_invalid_keybindings_fall_back_to_defaults() {
    let mut config = Config::default();
    config.keybindings.clear_canvas = vec!["S".to_string()];
    let settings = InputSettings::from_config(&config);
    assert_eq!(
        settings.action_map,
        KeybindingsConfig::default().build_action_map().unwrap()
    );
}

#[test]
fn test_export_results_become_messages() {
    let mut state = create_test_input_state();

    let shown = state.apply_export_result(
        ExportKind::Quick,
        Ok(ExportOutcome::Saved {
            kind: ExportKind::Quick,
            path: PathBuf::from("drawings/drawing_20250101_120000.png"),
        }),
    );
    let message = shown.unwrap();
    assert_eq!(message.kind, MessageKind::Info);
    assert!(message.body.contains("drawing_20250101_120000.png"));
    assert!(state.ui.modal.is_some());
    press_key(&mut state, Key::Return);

    assert!(
        state
            .apply_export_result(ExportKind::Interactive, Ok(ExportOutcome::Cancelled))
            .is_none()
    );
    assert!(state.ui.modal.is_none());

    let shown = state.apply_export_result(
        ExportKind::Clipboard,
        Err(ExportError::ClipboardUnavailable("no wl-copy".to_string())),
    );
    assert_eq!(shown.unwrap().kind, MessageKind::Warning);
    press_key(&mut state, Key::Escape);

    let shown = state.apply_export_result(
        ExportKind::Pdf,
        Err(ExportError::Capture("grim failed".to_string())),
    );
    let message = shown.unwrap();
    assert_eq!(message.kind, MessageKind::Error);
    assert!(message.body.starts_with("Could not save PDF"));
}

#[test]
fn test_export_request_closes_menu() {
    let mut state = create_test_input_state();
    let title = state.layout().menu_title(MenuId::File);
    click(&mut state, title.x + 5, title.y + 5);
    press_with(&mut state, Key::Ctrl, Key::Char('p'));
    assert_eq!(state.ui.open_menu, None);
    assert_eq!(state.take_pending_export(), Some(ExportKind::Pdf));
}
