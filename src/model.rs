//! The shared mutable parameter record read by every frame tick.
//!
//! `SceneModel` is purely transient UI state: group transform sliders, the
//! active view index, and the two runtime shader source strings. It is owned
//! by the engine and passed by reference into whichever view is updating —
//! views never hold onto it.

/// Animation and UI parameters shared between the control panel, keyboard
/// handling, bridge events, and the active view.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneModel {
    /// Horizontal offset of the view's object group.
    pub group_x: f32,
    /// Vertical offset of the view's object group.
    pub group_y: f32,
    /// Rotation of the object group about the z axis, in radians.
    pub group_angle: f32,
    /// Index of the view currently driving update and render.
    pub active_view: usize,
    /// Vertex stage source for the wave material, loaded at startup.
    pub vertex_shader: String,
    /// Fragment stage source for the wave material, loaded at startup.
    pub fragment_shader: String,
}

impl Default for SceneModel {
    fn default() -> Self {
        Self {
            group_x: 0.0,
            group_y: 0.0,
            group_angle: 0.0,
            active_view: 0,
            vertex_shader: String::new(),
            fragment_shader: String::new(),
        }
    }
}

impl SceneModel {
    /// Advance to the next registered view, wrapping past the last.
    ///
    /// `view_count` of zero leaves the index untouched.
    pub fn cycle_next(&mut self, view_count: usize) {
        if view_count > 0 {
            self.active_view = (self.active_view + 1) % view_count;
        }
    }

    /// Step back to the previous registered view, wrapping to the last
    /// from index zero.
    pub fn cycle_prev(&mut self, view_count: usize) {
        if view_count > 0 {
            self.active_view = self
                .active_view
                .checked_sub(1)
                .unwrap_or(view_count - 1);
        }
    }

    /// Apply a bridge-pushed `update-position-x` slider value.
    ///
    /// The slider is normalized to `[0, 1]`; it maps onto the panel's
    /// `[-π, π]` angle range as `angle = value * -π`.
    pub fn apply_position_x(&mut self, value: f32) {
        self.group_angle = value * -std::f32::consts::PI;
    }

    /// Normalize the group angle onto LED brightness.
    ///
    /// Maps `group_angle ∈ [-π, π]` onto `[0, 1]`; inputs outside the panel
    /// range clamp so the mapping stays total.
    #[must_use]
    pub fn led_brightness(&self) -> f32 {
        use std::f32::consts::PI;
        ((self.group_angle + PI) / (2.0 * PI)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    #[test]
    fn cycle_next_wraps_modulo_view_count() {
        let mut model = SceneModel::default();
        for _ in 0..3 {
            model.cycle_next(3);
            assert!(model.active_view < 3);
        }
        assert_eq!(model.active_view, 0);
    }

    #[test]
    fn cycle_prev_from_zero_wraps_to_last() {
        let mut model = SceneModel::default();
        model.cycle_prev(2);
        assert_eq!(model.active_view, 1);
        model.cycle_prev(2);
        assert_eq!(model.active_view, 0);
    }

    #[test]
    fn three_next_then_one_prev_lands_on_last() {
        // End-to-end transition scenario over a three-view registry.
        let mut model = SceneModel::default();
        model.cycle_next(3);
        model.cycle_next(3);
        model.cycle_next(3);
        assert_eq!(model.active_view, 0);
        model.cycle_prev(3);
        assert_eq!(model.active_view, 2);
    }

    #[test]
    fn cycle_with_zero_views_is_inert() {
        let mut model = SceneModel::default();
        model.cycle_next(0);
        model.cycle_prev(0);
        assert_eq!(model.active_view, 0);
    }

    #[test]
    fn brightness_endpoints_and_midpoint() {
        let mut model = SceneModel::default();
        model.group_angle = -PI;
        assert!((model.led_brightness() - 0.0).abs() < 1e-6);
        model.group_angle = 0.0;
        assert!((model.led_brightness() - 0.5).abs() < 1e-6);
        model.group_angle = PI;
        assert!((model.led_brightness() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn brightness_is_total_and_bounded() {
        let mut model = SceneModel::default();
        for angle in [-10.0, -PI, -1.0, 0.0, 2.5, PI, 42.0] {
            model.group_angle = angle;
            let b = model.led_brightness();
            assert!((0.0..=1.0).contains(&b), "angle {angle} gave {b}");
        }
    }

    #[test]
    fn position_x_wiring_matches_angle_convention() {
        let mut model = SceneModel::default();
        model.apply_position_x(0.0);
        assert_eq!(model.group_angle, 0.0);
        model.apply_position_x(1.0);
        assert!((model.group_angle + PI).abs() < 1e-6);
        // Full slider throw drives brightness to its floor.
        assert!(model.led_brightness() < 1e-6);
    }
}
