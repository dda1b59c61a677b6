//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, dynamic vertex buffers,
//! texture helpers, and shader composition.

/// Growable GPU buffers with automatic reallocation.
pub mod dynamic_buffer;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Render-target, depth, and sampled texture abstractions.
pub mod texture;
