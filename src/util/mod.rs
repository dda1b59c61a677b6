//! Shared utilities for the frame driver.

/// Monotonic animation clock providing elapsed and delta times.
pub mod clock;
/// Per-frame timing and FPS tracking.
pub mod frame_timing;
