// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! GPU-accelerated demo scene viewer built on wgpu, with a webview debug
//! panel and a narrow host bridge driving an LED.
//!
//! Lumen renders two switchable 3D views — a lit spinning cube with a
//! wave-displaced plane, and a shader-material variant — and mirrors the
//! scene's rotation out to an LED sink over a four-channel JSON bridge.
//!
//! # Key entry points
//!
//! - [`LumenEngine`] - the rendering engine and frame loop
//! - [`Viewer`] - standalone winit window (requires the `viewer` feature)
//! - [`bridge`] - the four-channel host↔UI bridge and LED sinks
//! - [`options::Options`] - runtime configuration (camera, lighting,
//!   panel ranges, keybindings)
//!
//! # Architecture
//!
//! The engine owns the UI end of the bridge: inbound pushes are drained at
//! the top of every frame, and the LED brightness is written out on every
//! tick while the first view is active. A background thread owns the
//! [`bridge::LedSink`] so a slow sink never stalls the frame loop. With
//! the `gui` feature, a wry webview child window hosts the Dioxus control
//! panel, talking JSON IPC to the native side.

/// Asset loading: background workers, image decode, glTF import.
pub mod assets;
/// The four-channel host↔UI bridge.
pub mod bridge;
/// Camera types and GPU bindings.
pub mod camera;
/// The rendering engine and frame loop.
pub mod engine;
/// Crate-level error types.
pub mod error;
/// GPU resource management utilities.
pub mod gpu;
#[cfg(feature = "gui")]
pub mod gui;
/// Input handling.
pub mod input;
/// The shared scene parameter record.
pub mod model;
/// Runtime configuration.
pub mod options;
/// Mesh generation and render pipelines.
pub mod renderer;
/// Timing helpers.
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
/// The switchable scene views.
pub mod views;

pub use engine::LumenEngine;
pub use error::LumenError;
pub use input::{InputEvent, KeyAction};
pub use model::SceneModel;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
