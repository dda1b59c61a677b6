//! Asset loading: background workers, image decode, and glTF import.

/// Pollable handles for worker-thread asset loads.
pub mod handle;
/// glTF scene flattening.
pub mod model;
/// Image decoding to RGBA8.
pub mod texture;

pub use handle::AssetHandle;
