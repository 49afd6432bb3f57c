//! Zoom level state and stepping policy.

use serde::{Deserialize, Serialize};

/// Preset zoom ladder used by discrete stepping.
pub const ZOOM_LEVELS: [f64; 11] = [0.1, 0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 2.0, 3.0, 4.0, 5.0];

/// Minimum allowed zoom level.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom level.
pub const MAX_ZOOM: f64 = 5.0;
/// Zoom level that corresponds to "100%".
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Default multiplier applied per wheel unit for pinch/wheel zooming.
pub const WHEEL_SENSITIVITY: f64 = 0.002;

/// Clamp an arbitrary level into the allowed zoom range.
pub fn clamp_level(level: f64) -> f64 {
    level.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Discrete/continuous zoom controller.
///
/// Stepping searches the preset ladder for the first preset at or above the
/// current level and moves one slot from there, clamped at both ends, so a
/// level set by continuous input still steps onto the ladder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Zoom {
    level: f64,
}

impl Default for Zoom {
    fn default() -> Self {
        Self {
            level: DEFAULT_ZOOM,
        }
    }
}

impl Zoom {
    /// Create a controller at the default level.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current zoom level.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// The current level as a rounded integer percentage.
    pub fn percent(&self) -> u32 {
        (self.level * 100.0).round() as u32
    }

    /// Step up to the next preset.
    pub fn zoom_in(&mut self) {
        let current = self.ladder_index();
        let next = (current + 1).min(ZOOM_LEVELS.len() - 1);
        self.level = ZOOM_LEVELS[next];
    }

    /// Step down to the previous preset.
    pub fn zoom_out(&mut self) {
        let current = self.ladder_index();
        let previous = current.saturating_sub(1);
        self.level = ZOOM_LEVELS[previous];
    }

    /// Set the level directly, clamped to the allowed range.
    ///
    /// Used for continuous/pinch input and numeric entry.
    pub fn zoom_to(&mut self, level: f64) {
        self.level = clamp_level(level);
    }

    /// Apply one wheel/pinch step.
    ///
    /// Negative `delta_y` zooms in, positive zooms out.
    pub fn zoom_by_wheel(&mut self, delta_y: f64, sensitivity: f64) {
        let delta = -delta_y * sensitivity;
        self.zoom_to(self.level * (1.0 + delta));
    }

    /// Reset to 100%.
    pub fn reset(&mut self) {
        self.level = DEFAULT_ZOOM;
    }

    /// Fit the document in the viewport. Currently the default level.
    pub fn zoom_to_fit(&mut self) {
        self.level = DEFAULT_ZOOM;
    }

    /// Index of the first preset at or above the current level.
    fn ladder_index(&self) -> usize {
        ZOOM_LEVELS
            .iter()
            .position(|&preset| preset >= self.level)
            .unwrap_or(ZOOM_LEVELS.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level() {
        let zoom = Zoom::new();
        assert_eq!(zoom.level(), DEFAULT_ZOOM);
        assert_eq!(zoom.percent(), 100);
    }

    #[test]
    fn test_zoom_in_steps_up_the_ladder() {
        let mut zoom = Zoom::new();
        zoom.zoom_in();
        assert_eq!(zoom.level(), 1.25);
        zoom.zoom_in();
        assert_eq!(zoom.level(), 1.5);
    }

    #[test]
    fn test_zoom_out_steps_down_the_ladder() {
        let mut zoom = Zoom::new();
        zoom.zoom_out();
        assert_eq!(zoom.level(), 0.75);
        zoom.zoom_out();
        assert_eq!(zoom.level(), 0.5);
    }

    #[test]
    fn test_zoom_in_clamps_at_top() {
        let mut zoom = Zoom::new();
        zoom.zoom_to(5.0);
        zoom.zoom_in();
        assert_eq!(zoom.level(), 5.0);
    }

    #[test]
    fn test_zoom_out_clamps_at_bottom() {
        let mut zoom = Zoom::new();
        zoom.zoom_to(0.1);
        zoom.zoom_out();
        assert_eq!(zoom.level(), 0.1);
    }

    #[test]
    fn test_stepping_from_off_ladder_level() {
        // 0.5 is the first preset at or above 0.3; stepping moves one past it.
        let mut zoom = Zoom::new();
        zoom.zoom_to(0.3);
        zoom.zoom_in();
        assert_eq!(zoom.level(), 0.75);

        zoom.zoom_to(0.3);
        zoom.zoom_out();
        assert_eq!(zoom.level(), 0.25);
    }

    #[test]
    fn test_zoom_to_clamps() {
        let mut zoom = Zoom::new();
        zoom.zoom_to(50.0);
        assert_eq!(zoom.level(), MAX_ZOOM);
        zoom.zoom_to(0.0001);
        assert_eq!(zoom.level(), MIN_ZOOM);
        zoom.zoom_to(2.3);
        assert_eq!(zoom.level(), 2.3);
    }

    #[test]
    fn test_wheel_zoom_stays_in_bounds() {
        let mut zoom = Zoom::new();
        for _ in 0..10_000 {
            zoom.zoom_by_wheel(-120.0, WHEEL_SENSITIVITY);
        }
        assert!(zoom.level() <= MAX_ZOOM);

        for _ in 0..10_000 {
            zoom.zoom_by_wheel(120.0, WHEEL_SENSITIVITY);
        }
        assert!(zoom.level() >= MIN_ZOOM);
    }

    #[test]
    fn test_reset_and_fit() {
        let mut zoom = Zoom::new();
        zoom.zoom_to(3.0);
        zoom.reset();
        assert_eq!(zoom.level(), DEFAULT_ZOOM);

        zoom.zoom_to(0.25);
        zoom.zoom_to_fit();
        assert_eq!(zoom.level(), DEFAULT_ZOOM);
    }

    #[test]
    fn test_percent_rounds() {
        let mut zoom = Zoom::new();
        zoom.zoom_to(1.254);
        assert_eq!(zoom.percent(), 125);
        zoom.zoom_to(0.666);
        assert_eq!(zoom.percent(), 67);
    }
}
