//! Wry webview child of the winit window.
//!
//! Creates a [`wry::WebView`] positioned at the right edge of the window,
//! loads the lumen-ui WASM bundle via a custom `lumen://` protocol, and
//! bridges IPC between the Dioxus web app and the native engine.

use std::borrow::Cow;
use std::sync::mpsc;

use rust_embed::RustEmbed;
use wry::http::{header::CONTENT_TYPE, Response};
use wry::{dpi, Rect, WebView, WebViewBuilder};

use crate::model::SceneModel;
use crate::options::Options;

/// Embedded lumen-ui dist output (built by `trunk build`).
#[derive(RustEmbed)]
#[folder = "crates/lumen-ui/dist/"]
struct UiAssets;

/// Default width of the debug panel in logical pixels.
pub const PANEL_WIDTH: u32 = 320;

/// Actions sent from the webview WASM app to the native engine.
#[derive(Debug)]
pub enum UiAction {
    /// Set a single option field: `options[section][field] = value`.
    SetOption {
        /// Top-level section key (e.g. `"lighting"`).
        path: String,
        /// Field key within the section (e.g. `"ambient"`).
        field: String,
        /// New JSON value.
        value: serde_json::Value,
    },
    /// Set a scene parameter slider (`group_x`, `group_y`, `group_angle`).
    SetParam {
        /// Parameter name.
        name: String,
        /// New value, clamped by the engine against the panel ranges.
        value: f64,
    },
    /// Demo control: push a background color through the host bridge.
    SetBackground {
        /// Packed `0xRRGGBB` color.
        color: u32,
    },
    /// Demo control: push a normalized slider value through the host
    /// bridge.
    SetPositionX {
        /// Value in `[0, 1]`.
        value: f64,
    },
    /// Toggle the panel pinned/hidden.
    TogglePanel,
    /// Resize the panel.
    ResizePanel {
        /// New width in physical pixels.
        width: u32,
    },
}

/// Create the wry webview as a child of the given window.
///
/// Returns `(webview, action_rx)` — the receiver yields [`UiAction`]s
/// from the WASM app.
///
/// # Errors
///
/// Returns a [`wry::Error`] if webview creation fails.
pub fn create_webview<W: wry::raw_window_handle::HasWindowHandle>(
    window: &W,
    window_width: u32,
    window_height: u32,
    panel_width: u32,
) -> Result<(WebView, mpsc::Receiver<UiAction>), wry::Error> {
    let (tx, rx) = mpsc::channel();

    let bounds = panel_bounds(window_width, window_height, panel_width);

    let webview = WebViewBuilder::new()
        .with_bounds(bounds)
        .with_custom_protocol("lumen".into(), |_id, request| {
            let path = request.uri().path();
            // Default to index.html for the root path.
            let path = if path == "/" { "index.html" } else { &path[1..] };

            match UiAssets::get(path) {
                Some(asset) => {
                    let mime = mime_guess::from_path(path)
                        .first_or_octet_stream()
                        .to_string();
                    Response::builder()
                        .header(CONTENT_TYPE, mime)
                        .body(Cow::from(asset.data.to_vec()))
                        .unwrap_or_else(|_| {
                            Response::new(Cow::from(Vec::new()))
                        })
                }
                None => Response::builder()
                    .status(404)
                    .body(Cow::from(Vec::new()))
                    .unwrap_or_else(|_| {
                        Response::new(Cow::from(Vec::new()))
                    }),
            }
        })
        .with_url("lumen://localhost/")
        .with_initialization_script(BRIDGE_JS)
        .with_ipc_handler(move |req| {
            let body = req.body();
            if let Ok(msg) =
                serde_json::from_str::<serde_json::Value>(body)
            {
                if let Some(action) = parse_action(&msg) {
                    let _ = tx.send(action);
                }
            }
        })
        .build_as_child(window)?;

    Ok((webview, rx))
}

/// Compute the [`Rect`] for the panel pinned at the right edge.
#[must_use]
pub fn panel_bounds(
    window_width: u32,
    window_height: u32,
    panel_width: u32,
) -> Rect {
    let x = window_width.saturating_sub(panel_width);
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(
            x as i32, 0,
        )),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(
            panel_width.min(window_width),
            window_height,
        )),
    }
}

/// Compute the [`Rect`] for the panel floating with a margin.
#[must_use]
pub fn panel_bounds_floating(
    window_width: u32,
    window_height: u32,
    panel_width: u32,
    margin: u32,
) -> Rect {
    let x = window_width.saturating_sub(panel_width + margin);
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(
            x as i32,
            margin as i32,
        )),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(
            panel_width.min(window_width),
            window_height.saturating_sub(margin * 2),
        )),
    }
}

/// Push the Options JSON schema to the webview (call once after creation).
pub fn push_schema(webview: &WebView, options: &Options) {
    let schema = Options::json_schema();
    let json = serde_json::to_string(&schema).unwrap_or_default();
    eval_push(webview, "__lumen_push_schema", &json);

    push_options(webview, options);
}

/// Push the current Options state to the webview.
pub fn push_options(webview: &WebView, options: &Options) {
    let json = serde_json::to_string(options).unwrap_or_default();
    eval_push(webview, "__lumen_push_options", &json);
}

/// Push the current scene parameters and active view to the webview.
pub fn push_params(webview: &WebView, model: &SceneModel, view_name: &str) {
    let payload = serde_json::json!({
        "group_x": model.group_x,
        "group_y": model.group_y,
        "group_angle": model.group_angle,
        "active_view": model.active_view,
        "view_name": view_name,
    });
    eval_push(webview, "__lumen_push_params", &payload.to_string());
}

/// Push render stats (currently just FPS) to the webview.
pub fn push_stats(webview: &WebView, fps: f32) {
    let payload = serde_json::json!({ "fps": fps });
    eval_push(webview, "__lumen_push_stats", &payload.to_string());
}

/// Push the pinned state so the UI can restyle itself.
pub fn push_panel_pinned(webview: &WebView, pinned: bool) {
    let _ = webview.evaluate_script(&format!(
        "window.__lumen_push_pinned({pinned})"
    ));
}

/// Notify the UI that a frame export finished and where it landed.
pub fn push_export(webview: &WebView, path: &str) {
    eval_push(webview, "__lumen_push_export", path);
}

fn eval_push(webview: &WebView, function: &str, json: &str) {
    let escaped = json.replace('\\', "\\\\").replace('\'', "\\'");
    let _ = webview
        .evaluate_script(&format!("window.{function}('{escaped}')"));
}

// ── Internals ────────────────────────────────────────────────────────────

/// JavaScript injected before page load. Defines the bridge functions that
/// the Dioxus WASM code calls, and dispatches `CustomEvent`s.
///
/// Calls that arrive before the WASM app has registered listeners are
/// buffered. When a listener attaches it replays any pending data.
const BRIDGE_JS: &str = r#"
(function() {
    var pending = {};
    var channels = {
        '__lumen_push_schema': 'lumen-schema',
        '__lumen_push_options': 'lumen-options',
        '__lumen_push_params': 'lumen-params',
        '__lumen_push_stats': 'lumen-stats',
        '__lumen_push_export': 'lumen-export'
    };

    function dispatch(name, json) {
        window.dispatchEvent(new CustomEvent(name, { detail: json }));
    }

    Object.keys(channels).forEach(function(fn) {
        var event = channels[fn];
        window[fn] = function(json) {
            pending[event] = json;
            dispatch(event, json);
        };
    });

    window.__lumen_push_pinned = function(pinned) {
        pending['lumen-pinned'] = String(pinned);
        dispatch('lumen-pinned', String(pinned));
    };

    // When the WASM app adds a listener, replay buffered data.
    var origAdd = EventTarget.prototype.addEventListener;
    EventTarget.prototype.addEventListener = function(type, fn, opts) {
        origAdd.call(this, type, fn, opts);
        if (this === window && pending[type] !== undefined) {
            dispatch(type, pending[type]);
        }
    };
})();
"#;

/// Parse an IPC message from the WASM side into a [`UiAction`].
fn parse_action(msg: &serde_json::Value) -> Option<UiAction> {
    let action = msg.get("action")?.as_str()?;
    match action {
        "set_option" => {
            let path = msg.get("path")?.as_str()?.to_owned();
            let field = msg.get("field")?.as_str()?.to_owned();
            let value = msg.get("value")?.clone();
            Some(UiAction::SetOption { path, field, value })
        }
        "set_param" => {
            let name = msg.get("name")?.as_str()?.to_owned();
            let value = msg.get("value")?.as_f64()?;
            Some(UiAction::SetParam { name, value })
        }
        "set_background" => {
            let color = msg.get("color")?.as_u64()?;
            u32::try_from(color)
                .ok()
                .map(|color| UiAction::SetBackground { color })
        }
        "set_position_x" => {
            let value = msg.get("value")?.as_f64()?;
            Some(UiAction::SetPositionX { value })
        }
        "toggle_panel" => Some(UiAction::TogglePanel),
        "resize_panel" => {
            let width = msg.get("width")?.as_u64()?;
            u32::try_from(width)
                .ok()
                .map(|width| UiAction::ResizePanel { width })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_set_param() {
        let msg = serde_json::json!({
            "action": "set_param",
            "name": "group_angle",
            "value": 1.5,
        });
        let action = parse_action(&msg);
        assert!(matches!(
            action,
            Some(UiAction::SetParam { ref name, value })
                if name == "group_angle" && (value - 1.5).abs() < 1e-9
        ));
    }

    #[test]
    fn parses_set_background_color() {
        let msg = serde_json::json!({
            "action": "set_background",
            "color": 0x22_AA_FF,
        });
        assert!(matches!(
            parse_action(&msg),
            Some(UiAction::SetBackground { color: 0x22_AA_FF })
        ));
    }

    #[test]
    fn rejects_unknown_action() {
        let msg = serde_json::json!({ "action": "launch_missiles" });
        assert!(parse_action(&msg).is_none());
    }

    #[test]
    fn pinned_bounds_hug_the_right_edge() {
        let rect = panel_bounds(1280, 720, 320);
        let dpi::Position::Physical(pos) = rect.position else {
            panic!("expected physical position");
        };
        assert_eq!(pos.x, 960);
        assert_eq!(pos.y, 0);
    }

    #[test]
    fn bounds_clamp_to_narrow_windows() {
        let rect = panel_bounds(200, 720, 320);
        let dpi::Size::Physical(size) = rect.size else {
            panic!("expected physical size");
        };
        assert_eq!(size.width, 200);
    }
}
