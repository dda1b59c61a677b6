use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Range and step for one panel drag control.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct SliderRange {
    /// Lower bound.
    pub min: f32,
    /// Upper bound.
    pub max: f32,
    /// Drag step size.
    pub step: f32,
}

impl SliderRange {
    /// Clamp a value into this range.
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Panel", inline)]
#[serde(default)]
/// Drag-control ranges for the three model fields bound in the panel.
///
/// The `group_angle` range defaults to `[-π, π]`; a `[0, 2π]` convention is
/// a config edit away, not a code change.
pub struct PanelOptions {
    /// Horizontal group offset control.
    #[schemars(skip)]
    pub group_x: SliderRange,
    /// Vertical group offset control.
    #[schemars(skip)]
    pub group_y: SliderRange,
    /// Group rotation control, in radians.
    #[schemars(skip)]
    pub group_angle: SliderRange,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            group_x: SliderRange {
                min: -4.0,
                max: 4.0,
                step: 0.1,
            },
            group_y: SliderRange {
                min: -3.0,
                max: 3.0,
                step: 0.1,
            },
            group_angle: SliderRange {
                min: -std::f32::consts::PI,
                max: std::f32::consts::PI,
                step: 0.1,
            },
        }
    }
}
