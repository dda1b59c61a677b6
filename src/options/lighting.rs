use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Point and ambient light parameters.
pub struct LightingOptions {
    /// Point light intensity multiplier.
    #[schemars(title = "Point Intensity", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub point_intensity: f32,
    /// Point light color.
    #[schemars(skip)]
    pub point_color: [f32; 3],
    /// Point light world position.
    #[schemars(skip)]
    pub point_position: [f32; 3],
    /// Ambient light level.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient: f32,
    /// Ambient light color.
    #[schemars(skip)]
    pub ambient_color: [f32; 3],
    /// Specular highlight exponent.
    #[schemars(skip)]
    pub shininess: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            point_intensity: 0.25,
            point_color: [1.0, 1.0, 1.0],
            point_position: [-0.5, 0.5, 4.0],
            ambient: 0.2,
            ambient_color: [0.2, 0.2, 0.2],
            shininess: 30.0,
        }
    }
}
