//! Window opacity controller.
//!
//! Owns the overlay's opacity value. Every frame is composited with
//! `paint_with_alpha(alpha)`, so changing the value takes effect on the next
//! render. The status label and slider are derived from [`TransparencyController::percent`].

use crate::config::TransparencyConfig;

/// Lowest opacity the window can reach.
pub const MIN_OPACITY: f64 = 0.01;
/// Fully opaque.
pub const MAX_OPACITY: f64 = 1.0;
/// Keyboard and menu decreases stop at this value; the slider can still go lower.
pub const DECREASE_FLOOR: f64 = 0.05;

/// Below this value the toggle switches to [`TOGGLE_HIGH`].
pub const TOGGLE_LOW_THRESHOLD: f64 = 0.30;
/// Above this value the toggle switches to [`TOGGLE_LOW`].
pub const TOGGLE_HIGH_THRESHOLD: f64 = 0.70;
pub const TOGGLE_HIGH: f64 = 0.80;
pub const TOGGLE_LOW: f64 = 0.10;

/// Opacity state for the overlay window.
#[derive(Debug, Clone, PartialEq)]
pub struct TransparencyController {
    alpha: f64,
    step: f64,
    reset_value: f64,
}

impl Default for TransparencyController {
    fn default() -> Self {
        Self::from_config(&TransparencyConfig::default())
    }
}

impl TransparencyController {
    /// Creates a controller starting at `initial` (clamped).
    pub fn new(initial: f64, step: f64, reset_value: f64) -> Self {
        Self {
            alpha: clamp_opacity(initial),
            step,
            reset_value: clamp_opacity(reset_value),
        }
    }

    pub fn from_config(config: &TransparencyConfig) -> Self {
        Self::new(config.initial_opacity, config.step, config.reset_opacity)
    }

    /// Current opacity in `[0.01, 1.0]`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Opacity as a truncated percentage; also the slider position.
    pub fn percent(&self) -> u32 {
        // Small epsilon so 0.3 (stored as 0.29999...) reads as 30%.
        ((self.alpha * 100.0) + 1e-9).floor() as u32
    }

    /// Value the reset key and button restore.
    pub fn reset_value(&self) -> f64 {
        self.reset_value
    }

    /// Sets the opacity, clamping to `[0.01, 1.0]`. Returns the applied value.
    pub fn set(&mut self, value: f64) -> f64 {
        let clamped = clamp_opacity(value);
        if (clamped - self.alpha).abs() > f64::EPSILON {
            log::debug!("Opacity {:.2} -> {:.2}", self.alpha, clamped);
        }
        self.alpha = clamped;
        self.alpha
    }

    /// Sets the opacity from a slider position in `1..=100`.
    pub fn set_from_slider(&mut self, position: u32) -> f64 {
        self.set(position as f64 / 100.0)
    }

    pub fn increase(&mut self) -> f64 {
        self.set(self.alpha + self.step)
    }

    /// Decreases by one step without going below [`DECREASE_FLOOR`].
    ///
    /// An opacity already under the floor (set via the slider) is raised to it.
    pub fn decrease(&mut self) -> f64 {
        self.set((self.alpha - self.step).max(DECREASE_FLOOR))
    }

    pub fn reset(&mut self) -> f64 {
        self.set(self.reset_value)
    }

    /// Flips between nearly transparent and mostly opaque.
    ///
    /// Values inside `[0.30, 0.70]` are left alone.
    pub fn toggle(&mut self) -> f64 {
        if self.alpha < TOGGLE_LOW_THRESHOLD {
            self.set(TOGGLE_HIGH)
        } else if self.alpha > TOGGLE_HIGH_THRESHOLD {
            self.set(TOGGLE_LOW)
        } else {
            self.alpha
        }
    }

    /// Status label text, e.g. `Opacity: 100% | F1 - help | Esc - minimize`.
    pub fn status_text(&self, help_key: &str, minimize_key: &str) -> String {
        format!(
            "Opacity: {}% | {} - help | {} - minimize",
            self.percent(),
            help_key,
            minimize_key
        )
    }
}

fn clamp_opacity(value: f64) -> f64 {
    if value.is_nan() {
        MAX_OPACITY
    } else {
        value.clamp(MIN_OPACITY, MAX_OPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(alpha: f64) -> TransparencyController {
        TransparencyController::new(alpha, 0.05, 0.10)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn set_clamps_to_valid_range() {
        let mut ctl = controller(1.0);
        assert_eq!(ctl.set(-5.0), MIN_OPACITY);
        assert_eq!(ctl.set(5.0), MAX_OPACITY);
        assert_eq!(ctl.set(f64::NAN), MAX_OPACITY);
        assert!(approx(ctl.set(0.42), 0.42));
    }

    #[test]
    fn increase_and_decrease_step_by_five_percent() {
        let mut ctl = controller(0.5);
        assert!(approx(ctl.increase(), 0.55));
        assert!(approx(ctl.decrease(), 0.50));
        assert_eq!(controller(1.0).increase(), 1.0);
    }

    #[test]
    fn decrease_stops_at_floor() {
        let mut ctl = controller(0.08);
        assert!(approx(ctl.decrease(), DECREASE_FLOOR));
        assert!(approx(ctl.decrease(), DECREASE_FLOOR));

        let mut below_floor = controller(0.02);
        assert!(approx(below_floor.decrease(), DECREASE_FLOOR));
    }

    #[test]
    fn reset_restores_ten_percent() {
        let mut ctl = controller(0.9);
        assert!(approx(ctl.reset(), 0.10));
        assert_eq!(ctl.percent(), 10);
    }

    #[test]
    fn toggle_flips_outside_dead_zone() {
        assert!(approx(controller(0.2).toggle(), TOGGLE_HIGH));
        assert!(approx(controller(0.9).toggle(), TOGGLE_LOW));
        assert!(approx(controller(0.5).toggle(), 0.5));
        assert!(approx(controller(0.3).toggle(), 0.3));
        assert!(approx(controller(0.7).toggle(), 0.7));
    }

    #[test]
    fn toggle_twice_from_opaque_returns_to_high() {
        let mut ctl = controller(1.0);
        ctl.toggle();
        assert!(approx(ctl.toggle(), TOGGLE_HIGH));
    }

    #[test]
    fn percent_truncates() {
        assert_eq!(controller(0.999).percent(), 99);
        assert_eq!(controller(0.3).percent(), 30);
        assert_eq!(controller(0.01).percent(), 1);
    }

    #[test]
    fn slider_maps_position_to_opacity() {
        let mut ctl = controller(1.0);
        assert!(approx(ctl.set_from_slider(1), 0.01));
        assert!(approx(ctl.set_from_slider(65), 0.65));
        assert_eq!(ctl.set_from_slider(0), MIN_OPACITY);
    }

    #[test]
    fn status_text_uses_current_percent() {
        let ctl = controller(0.42);
        assert_eq!(
            ctl.status_text("F1", "Esc"),
            "Opacity: 42% | F1 - help | Esc - minimize"
        );
    }
}
