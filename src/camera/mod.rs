//! Camera types for 3D scene viewing.

/// Camera uniform buffer and bind group management.
pub mod binding;
/// Core camera struct and GPU uniform types.
pub mod core;

pub use binding::CameraBinding;
pub use core::{Camera, CameraUniform};
