//! Input forwarding and key-action dispatch.

use crate::input::{normalized_pointer, InputEvent, KeyAction};

use super::LumenEngine;

impl LumenEngine {
    /// Forward a platform-agnostic input event into the engine.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.pointer = normalized_pointer(
                    x,
                    y,
                    self.context.config.width as f32,
                    self.context.config.height as f32,
                );
            }
        }
    }

    /// Run a bound key action.
    pub fn execute_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::ExportFrame => {
                if let Some(path) = self.export_frame() {
                    log::info!("frame exported to {path}");
                    self.last_export = Some(path);
                }
            }
            KeyAction::NextView => self.next_view(),
            KeyAction::PrevView => self.prev_view(),
        }
    }
}
