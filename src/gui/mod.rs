//! Native-side GUI layer: wry webview hosting the lumen-ui WASM bundle.
//!
//! The webview is created as a child of the winit window and communicates
//! with the engine via a minimal JSON IPC bridge.

/// Webview panel controller: layout, IPC draining, periodic pushes.
pub(crate) mod panel;
/// Wry webview creation, IPC handler, and state push helpers.
pub mod webview;
