use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Debug overlay toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Debug", inline)]
#[serde(default)]
pub struct DebugOptions {
    /// Show the FPS readout in the panel.
    #[schemars(title = "Show FPS")]
    pub show_fps: bool,
}

impl Default for DebugOptions {
    fn default() -> Self {
        Self { show_fps: true }
    }
}
