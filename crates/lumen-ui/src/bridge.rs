//! IPC bridge between the wry webview (native) and the Dioxus WASM app.
//!
//! **Inbound** (native → WASM): the native side calls
//! `window.__lumen_push_schema(json)`, `window.__lumen_push_params(json)`,
//! and friends, which dispatch `CustomEvent`s that we listen to here.
//!
//! **Outbound** (WASM → native): we call `window.ipc.postMessage(json)` to
//! send actions back to the engine.

use dioxus::signals::{Signal, Writable};
use serde_json::Value;
use wasm_bindgen::prelude::*;

// ── Inbound listeners ────────────────────────────────────────────────────

/// Attach a `CustomEvent` listener on `window` that parses the event detail
/// as JSON and writes it into `sig`.
fn listen_json(event: &'static str, mut sig: Signal<Option<Value>>) {
    let closure = Closure::<dyn FnMut(web_sys::CustomEvent)>::new(
        move |evt: web_sys::CustomEvent| {
            if let Some(json_str) = evt.detail().as_string() {
                if let Ok(val) = serde_json::from_str::<Value>(&json_str) {
                    sig.set(Some(val));
                }
            }
        },
    );
    web_sys::window()
        .expect("no global window")
        .add_event_listener_with_callback(
            event,
            closure.as_ref().unchecked_ref(),
        )
        .unwrap_or_else(|_| panic!("failed to add {event} listener"));
    closure.forget();
}

/// Register `CustomEvent` listeners that push schema and options JSON into
/// the provided signals. Call once at app startup.
pub fn register_listeners(
    schema_sig: Signal<Option<Value>>,
    options_sig: Signal<Option<Value>>,
) {
    listen_json("lumen-schema", schema_sig);
    listen_json("lumen-options", options_sig);
}

/// Register a listener for scene parameter updates (group transform and
/// active view) from the native engine.
pub fn register_params_listener(params_sig: Signal<Option<Value>>) {
    listen_json("lumen-params", params_sig);
}

/// Register a listener for stats updates (FPS, etc.) from the native
/// engine.
pub fn register_stats_listener(stats_sig: Signal<Option<Value>>) {
    listen_json("lumen-stats", stats_sig);
}

/// Register a listener for frame export notifications. The detail is the
/// path the PNG was written to.
pub fn register_export_listener(mut export_sig: Signal<Option<String>>) {
    let closure = Closure::<dyn FnMut(web_sys::CustomEvent)>::new(
        move |evt: web_sys::CustomEvent| {
            if let Some(path) = evt.detail().as_string() {
                export_sig.set(Some(path));
            }
        },
    );
    web_sys::window()
        .expect("no global window")
        .add_event_listener_with_callback(
            "lumen-export",
            closure.as_ref().unchecked_ref(),
        )
        .expect("failed to add lumen-export listener");
    closure.forget();
}

/// Register a listener for panel pinned state changes from the native
/// engine.
pub fn register_panel_listener(mut pinned_sig: Signal<bool>) {
    let closure = Closure::<dyn FnMut(web_sys::CustomEvent)>::new(
        move |evt: web_sys::CustomEvent| {
            if let Some(val_str) = evt.detail().as_string() {
                pinned_sig.set(val_str == "true");
            }
        },
    );
    web_sys::window()
        .expect("no global window")
        .add_event_listener_with_callback(
            "lumen-pinned",
            closure.as_ref().unchecked_ref(),
        )
        .expect("failed to add lumen-pinned listener");
    closure.forget();
}

// ── Outbound actions ─────────────────────────────────────────────────────

/// Send a `toggle_panel` action to the native engine.
pub fn send_toggle_panel() {
    let msg = serde_json::json!({ "action": "toggle_panel" });
    post_message(&msg.to_string());
}

/// Send a `set_option` action to the native engine.
pub fn send_set_option(path: &str, field: &str, value: &Value) {
    let msg = serde_json::json!({
        "action": "set_option",
        "path": path,
        "field": field,
        "value": value,
    });
    post_message(&msg.to_string());
}

/// Send a `set_param` action updating one scene parameter by name
/// (`group_x`, `group_y`, or `group_angle`).
pub fn send_set_param(name: &str, value: f64) {
    let msg = serde_json::json!({
        "action": "set_param",
        "name": name,
        "value": value,
    });
    post_message(&msg.to_string());
}

/// Send a `set_background` action with a packed `0xRRGGBB` color.
pub fn send_set_background(color: u32) {
    let msg = serde_json::json!({
        "action": "set_background",
        "color": color,
    });
    post_message(&msg.to_string());
}

/// Send a `set_position_x` action. The engine maps the slider value onto
/// the group rotation angle and forwards it over the host bridge.
pub fn send_set_position_x(value: f64) {
    let msg = serde_json::json!({
        "action": "set_position_x",
        "value": value,
    });
    post_message(&msg.to_string());
}

/// Call `window.ipc.postMessage(json)` to send a message to the native
/// wry IPC handler.
fn post_message(json: &str) {
    let js = format!(
        "window.ipc.postMessage('{}')",
        json.replace('\\', "\\\\").replace('\'', "\\'")
    );
    let _ = js_sys::eval(&js);
}
