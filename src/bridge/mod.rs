//! The narrow host↔UI bridge.
//!
//! Exactly four operations cross this boundary: two inbound pushes
//! (`update-background`, `update-position-x`) and two outbound
//! fire-and-forget writes (`write:LEDStatus`, `write:LEDBrightness`).
//! Messages travel as JSON-encoded strings over a pair of mpsc channels,
//! so the channel names in [`wire`] remain the literal wire contract and
//! delivery is at-most-once, in emission order, between one sender and one
//! receiver.
//!
//! The UI side never observes a failure: a closed channel or an
//! undecodable message is dropped silently.

pub mod led;
pub mod wire;

use std::sync::mpsc;
use std::thread;

pub use led::{LedSink, LedStatus, LogLed};
pub use wire::WireMessage;

use crate::error::LumenError;

/// An event pushed from the host context into the UI context.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// New background color for the second view, packed `0xRRGGBB`.
    Background(u32),
    /// Normalized slider position in `[0, 1]` driving the group angle.
    PositionX(f32),
}

/// UI-context endpoint: poll inbound events, write LED state out.
pub struct UiBridge {
    events: mpsc::Receiver<String>,
    commands: mpsc::Sender<String>,
}

impl UiBridge {
    /// Take the next pending host event, if any. Never blocks.
    ///
    /// Undecodable messages are logged and skipped.
    pub fn poll_event(&self) -> Option<HostEvent> {
        while let Ok(raw) = self.events.try_recv() {
            match WireMessage::decode(&raw) {
                Ok(WireMessage::UpdateBackground(color)) => {
                    return Some(HostEvent::Background(color));
                }
                Ok(WireMessage::UpdatePositionX(value)) => {
                    return Some(HostEvent::PositionX(value));
                }
                Ok(other) => {
                    log::warn!("outbound message on inbound channel: {other:?}");
                }
                Err(e) => {
                    log::warn!("undecodable bridge event: {e}");
                }
            }
        }
        None
    }

    /// Fire-and-forget LED on/off write.
    pub fn write_led_status(&self, status: LedStatus) {
        self.send(&WireMessage::WriteLedStatus(status));
    }

    /// Fire-and-forget LED brightness write. Pushed every tick while the
    /// first view is active; the sink must tolerate redundant values.
    pub fn write_led_brightness(&self, brightness: f32) {
        self.send(&WireMessage::WriteLedBrightness(brightness));
    }

    fn send(&self, msg: &WireMessage) {
        if let Ok(raw) = msg.encode() {
            let _ = self.commands.send(raw);
        }
    }
}

/// Host-context endpoint: push events in, drain LED writes out.
pub struct HostBridge {
    events: mpsc::Sender<String>,
    commands: mpsc::Receiver<String>,
}

impl HostBridge {
    /// Push a background color update to the UI context.
    pub fn push_background(&self, color: u32) {
        self.push(&WireMessage::UpdateBackground(color));
    }

    /// Push a normalized slider position to the UI context.
    pub fn push_position_x(&self, value: f32) {
        self.push(&WireMessage::UpdatePositionX(value));
    }

    fn push(&self, msg: &WireMessage) {
        if let Ok(raw) = msg.encode() {
            let _ = self.events.send(raw);
        }
    }

    /// Drain pending LED writes into the sink. Returns the number of
    /// messages handled, or `None` once the UI side has hung up.
    pub fn service(&self, sink: &mut dyn LedSink) -> Option<usize> {
        let mut handled = 0;
        loop {
            match self.commands.try_recv() {
                Ok(raw) => {
                    Self::dispatch(&raw, sink);
                    handled += 1;
                }
                Err(mpsc::TryRecvError::Empty) => return Some(handled),
                Err(mpsc::TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Block draining LED writes into the sink until the UI side hangs up.
    pub fn service_blocking(&self, sink: &mut dyn LedSink) {
        while let Ok(raw) = self.commands.recv() {
            Self::dispatch(&raw, sink);
        }
    }

    fn dispatch(raw: &str, sink: &mut dyn LedSink) {
        match WireMessage::decode(raw) {
            Ok(WireMessage::WriteLedStatus(status)) => {
                sink.write_status(status);
            }
            Ok(WireMessage::WriteLedBrightness(brightness)) => {
                sink.write_brightness(brightness);
            }
            Ok(other) => {
                log::warn!("inbound message on outbound channel: {other:?}");
            }
            Err(e) => {
                log::warn!("undecodable bridge command: {e}");
            }
        }
    }
}

/// Build the two endpoints of a fresh bridge.
#[must_use]
pub fn pair() -> (HostBridge, UiBridge) {
    let (event_tx, event_rx) = mpsc::channel();
    let (command_tx, command_rx) = mpsc::channel();
    (
        HostBridge {
            events: event_tx,
            commands: command_rx,
        },
        UiBridge {
            events: event_rx,
            commands: command_tx,
        },
    )
}

/// Handle to a host bridge whose command side is serviced on a thread.
///
/// The thread owns the [`LedSink`] and exits when the UI endpoint drops.
pub struct HostHandle {
    events: mpsc::Sender<String>,
}

impl HostHandle {
    /// Push a background color update to the UI context.
    pub fn push_background(&self, color: u32) {
        if let Ok(raw) = WireMessage::UpdateBackground(color).encode() {
            let _ = self.events.send(raw);
        }
    }

    /// Push a normalized slider position to the UI context.
    pub fn push_position_x(&self, value: f32) {
        if let Ok(raw) = WireMessage::UpdatePositionX(value).encode() {
            let _ = self.events.send(raw);
        }
    }
}

/// Spawn the host service thread around a sink and return the UI endpoint
/// plus a push handle for inbound events.
///
/// # Errors
///
/// Returns [`LumenError::ThreadSpawn`] if the OS refuses the thread.
pub fn spawn_host(
    mut sink: Box<dyn LedSink>,
) -> Result<(HostHandle, UiBridge), LumenError> {
    let (host, ui) = pair();
    let handle = HostHandle {
        events: host.events.clone(),
    };
    let _join = thread::Builder::new()
        .name("lumen-bridge-host".into())
        .spawn(move || host.service_blocking(sink.as_mut()))
        .map_err(LumenError::ThreadSpawn)?;
    Ok((handle, ui))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingLed {
        statuses: Vec<LedStatus>,
        brightness: Vec<f32>,
    }

    impl LedSink for RecordingLed {
        fn write_status(&mut self, status: LedStatus) {
            self.statuses.push(status);
        }

        fn write_brightness(&mut self, brightness: f32) {
            self.brightness.push(brightness);
        }
    }

    #[test]
    fn led_writes_arrive_in_emission_order() {
        let (host, ui) = pair();
        let mut sink = RecordingLed::default();

        ui.write_led_status(LedStatus::On);
        ui.write_led_brightness(0.25);
        ui.write_led_brightness(0.25);
        ui.write_led_status(LedStatus::Off);

        assert_eq!(host.service(&mut sink), Some(4));
        assert_eq!(sink.statuses, vec![LedStatus::On, LedStatus::Off]);
        // Redundant identical values are delivered, not deduplicated.
        assert_eq!(sink.brightness, vec![0.25, 0.25]);
    }

    #[test]
    fn host_events_poll_in_order() {
        let (host, ui) = pair();
        host.push_background(0x0000_ff00);
        host.push_position_x(0.5);

        assert_eq!(ui.poll_event(), Some(HostEvent::Background(0x0000_ff00)));
        assert_eq!(ui.poll_event(), Some(HostEvent::PositionX(0.5)));
        assert_eq!(ui.poll_event(), None);
    }

    #[test]
    fn writes_after_host_hangup_are_silent() {
        let (host, ui) = pair();
        drop(host);
        // Fire-and-forget: no panic, no error surfaced.
        ui.write_led_brightness(1.0);
        ui.write_led_status(LedStatus::On);
    }

    #[test]
    fn service_reports_hangup() {
        let (host, ui) = pair();
        drop(ui);
        let mut sink = RecordingLed::default();
        assert_eq!(host.service(&mut sink), None);
    }
}
