/// Platform-agnostic input events forwarded into the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
}

/// Map a cursor position in physical pixels onto normalized device-style
/// coordinates in `[-1, 1]²`, y pointing up.
///
/// Stored for prospective ray-casting; nothing consumes it yet.
#[must_use]
pub fn normalized_pointer(x: f32, y: f32, width: f32, height: f32) -> (f32, f32) {
    if width <= 0.0 || height <= 0.0 {
        return (0.0, 0.0);
    }
    ((x / width) * 2.0 - 1.0, -(y / height) * 2.0 + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_corners_map_to_unit_square() {
        assert_eq!(normalized_pointer(0.0, 0.0, 800.0, 600.0), (-1.0, 1.0));
        assert_eq!(normalized_pointer(800.0, 600.0, 800.0, 600.0), (1.0, -1.0));
        assert_eq!(normalized_pointer(400.0, 300.0, 800.0, 600.0), (0.0, 0.0));
    }

    #[test]
    fn degenerate_window_yields_origin() {
        assert_eq!(normalized_pointer(10.0, 10.0, 0.0, 0.0), (0.0, 0.0));
    }
}
