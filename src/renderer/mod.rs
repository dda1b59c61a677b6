//! Mesh generation and render pipelines.

/// Lighting uniform and bind group management.
pub mod lighting;
/// CPU mesh generation, wave displacement, and GPU mesh residency.
pub mod mesh;
/// Blinn-Phong mesh pipeline shared by both views.
pub mod phong;
/// Pipeline for the runtime-loaded wave shader pair.
pub mod wave;
