//! Input handling: event types, pointer normalization, and key actions.

/// Platform-agnostic input events and pointer normalization.
pub mod event;
/// Keyboard actions bindable through options.
pub mod keyboard;

pub use event::{normalized_pointer, InputEvent};
pub use keyboard::KeyAction;
