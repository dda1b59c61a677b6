//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (camera, lighting, panel ranges, keybindings,
//! debug toggles) are consolidated here. Options serialize to/from TOML for
//! presets; the JSON schema feeds the webview control panel.

mod camera;
mod debug;
mod keybindings;
mod lighting;
mod panel;

use std::path::Path;

pub use camera::CameraOptions;
pub use debug::DebugOptions;
pub use keybindings::KeybindingOptions;
pub use lighting::LightingOptions;
pub use panel::{PanelOptions, SliderRange};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::LumenError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Panel drag-control ranges.
    pub panel: PanelOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
    /// Debug overlay options.
    pub debug: DebugOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Io`] if the file cannot be read, or
    /// [`LumenError::OptionsParse`] for invalid TOML.
    pub fn load(path: &Path) -> Result<Self, LumenError> {
        let content = std::fs::read_to_string(path).map_err(LumenError::Io)?;
        let mut opts: Self = toml::from_str(&content)
            .map_err(|e| LumenError::OptionsParse(e.to_string()))?;
        opts.keybindings.rebuild_reverse_map();
        Ok(opts)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), LumenError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| LumenError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(LumenError::Io)?;
        }
        std::fs::write(path, content).map_err(LumenError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[lighting]
ambient = 0.6
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.lighting.ambient, 0.6);
        // Everything else should be default
        assert_eq!(opts.lighting.point_intensity, 0.25);
        assert_eq!(opts.camera.fovy, 45.0);
        assert_eq!(opts.panel.group_x.max, 4.0);
    }

    #[test]
    fn keybinding_lookup() {
        use crate::input::KeyAction;
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("ArrowRight"),
            Some(KeyAction::NextView)
        );
        assert_eq!(
            opts.keybindings.lookup("ArrowLeft"),
            Some(KeyAction::PrevView)
        );
        assert_eq!(
            opts.keybindings.lookup("KeyE"),
            Some(KeyAction::ExportFrame)
        );
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn panel_ranges_match_documented_controls() {
        let panel = PanelOptions::default();
        assert_eq!((panel.group_x.min, panel.group_x.max), (-4.0, 4.0));
        assert_eq!((panel.group_y.min, panel.group_y.max), (-3.0, 3.0));
        assert!((panel.group_angle.min + std::f32::consts::PI).abs() < 1e-6);
        assert!((panel.group_angle.max - std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(panel.group_angle.step, 0.1);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        // UI-exposed sections should be present
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("panel"));
        assert!(props.contains_key("debug"));

        // Skipped sections should be absent
        assert!(!props.contains_key("keybindings"));

        // Lighting should have exposed fields but not skipped ones
        let lighting = &props["lighting"]["properties"];
        assert!(lighting.get("point_intensity").is_some());
        assert!(lighting.get("ambient").is_some());
        assert!(lighting.get("point_position").is_none());
        assert!(lighting.get("shininess").is_none());
    }

    #[test]
    fn slider_range_clamps() {
        let range = SliderRange {
            min: -1.0,
            max: 1.0,
            step: 0.1,
        };
        assert_eq!(range.clamp(5.0), 1.0);
        assert_eq!(range.clamp(-5.0), -1.0);
        assert_eq!(range.clamp(0.5), 0.5);
    }
}
