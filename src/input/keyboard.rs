use serde::{Deserialize, Serialize};

/// Engine-level actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// next_view = "ArrowRight"
/// export_frame = "KeyE"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Render the active view offscreen and save a PNG snapshot.
    ExportFrame,
    /// Advance to the next registered view, wrapping past the last.
    NextView,
    /// Step to the previous registered view, wrapping to the last.
    PrevView,
}
