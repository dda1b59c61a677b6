//! Per-frame tick: bridge drain, animation advance, LED push.

use crate::bridge::HostEvent;

use super::LumenEngine;

impl LumenEngine {
    /// Advance one tick: apply pending bridge events, step the clock, run
    /// the active view's update, and mirror the rotation out to the LED.
    pub(crate) fn tick(&mut self) {
        // Drain inbound bridge events first so this frame sees them.
        while let Some(event) = self.bridge.poll_event() {
            match event {
                HostEvent::Background(color) => {
                    let rgb = unpack_rgb(color);
                    for view in &mut self.views {
                        view.set_background(rgb);
                    }
                }
                HostEvent::PositionX(value) => {
                    self.model.apply_position_x(value);
                }
            }
        }

        let delta = self.clock.tick();
        let elapsed = self.clock.elapsed();

        let active = self.model.active_view;
        self.views[active].update(
            &self.context,
            &self.resources,
            &self.model,
            elapsed,
            delta,
        );

        // Brightness shadows the rotation angle on every tick while the
        // first view is up, redundant values included; the sink is the
        // deduplication point.
        if active == 0 {
            self.bridge
                .write_led_brightness(self.model.led_brightness());
        }
    }

    /// Advance to the next view and report the switch to the LED.
    pub fn next_view(&mut self) {
        self.model.cycle_next(self.view_count());
        log::info!("switched to {}", self.active_view_name());
        self.push_led_status();
    }

    /// Step to the previous view and report the switch to the LED.
    pub fn prev_view(&mut self) {
        self.model.cycle_prev(self.view_count());
        log::info!("switched to {}", self.active_view_name());
        self.push_led_status();
    }
}

/// Unpack a `0xRRGGBB` color into linear-ish `[0, 1]` RGB components.
fn unpack_rgb(color: u32) -> [f32; 3] {
    [
        ((color >> 16) & 0xFF) as f32 / 255.0,
        ((color >> 8) & 0xFF) as f32 / 255.0,
        (color & 0xFF) as f32 / 255.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_channel_order() {
        let [r, g, b] = unpack_rgb(0xFF_80_00);
        assert!((r - 1.0).abs() < 1e-6);
        assert!((g - 128.0 / 255.0).abs() < 1e-6);
        assert!(b.abs() < 1e-6);
    }

    #[test]
    fn ignores_bits_above_rgb() {
        assert_eq!(unpack_rgb(0xFF_00_00_FF & 0x00FF_FFFF), unpack_rgb(0xFF));
    }
}
