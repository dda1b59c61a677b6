//! LED-facing types and the hardware driver seam.
//!
//! The bridge relays values; the actual hardware driver is an external
//! collaborator behind [`LedSink`]. The shipped [`LogLed`] sink just logs,
//! which is enough for the demo and for running without hardware attached.

use std::fmt;

use serde::{Deserialize, Serialize};

/// LED on/off status. The wire payload is restricted to `1|0`; any other
/// value is rejected at the boundary by the `TryFrom` conversion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum LedStatus {
    /// LED off (wire value `0`).
    #[default]
    Off,
    /// LED on (wire value `1`).
    On,
}

impl From<LedStatus> for u8 {
    fn from(status: LedStatus) -> Self {
        match status {
            LedStatus::Off => 0,
            LedStatus::On => 1,
        }
    }
}

/// Error for LED status values outside `{0, 1}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidLedStatus(pub u8);

impl fmt::Display for InvalidLedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LED status must be 0 or 1, got {}", self.0)
    }
}

impl std::error::Error for InvalidLedStatus {}

impl TryFrom<u8> for LedStatus {
    type Error = InvalidLedStatus;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::On),
            other => Err(InvalidLedStatus(other)),
        }
    }
}

/// Destination for LED writes on the host side of the bridge.
///
/// Fire-and-forget by contract: implementations get no way to report
/// failure back to the UI context, and out-of-range brightness is theirs
/// to handle.
pub trait LedSink: Send {
    /// Set the LED on or off.
    fn write_status(&mut self, status: LedStatus);
    /// Set the LED brightness. The caller pre-normalizes to `[0, 1]`.
    fn write_brightness(&mut self, brightness: f32);
}

/// Logging sink used when no hardware driver is wired up.
///
/// Brightness arrives every tick while view 0 is active, so the sink only
/// logs when the value moves by a visible step.
#[derive(Debug, Default)]
pub struct LogLed {
    last_brightness: Option<f32>,
}

impl LedSink for LogLed {
    fn write_status(&mut self, status: LedStatus) {
        log::info!("LED status -> {}", u8::from(status));
    }

    fn write_brightness(&mut self, brightness: f32) {
        let changed = self
            .last_brightness
            .is_none_or(|last| (last - brightness).abs() >= 0.01);
        if changed {
            log::debug!("LED brightness -> {brightness:.3}");
            self.last_brightness = Some(brightness);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_zero_and_one_convert() {
        assert_eq!(LedStatus::try_from(0), Ok(LedStatus::Off));
        assert_eq!(LedStatus::try_from(1), Ok(LedStatus::On));
        for bad in [2u8, 3, 100, 255] {
            assert_eq!(LedStatus::try_from(bad), Err(InvalidLedStatus(bad)));
        }
    }

    #[test]
    fn status_round_trips_through_u8() {
        for status in [LedStatus::Off, LedStatus::On] {
            assert_eq!(LedStatus::try_from(u8::from(status)), Ok(status));
        }
    }
}
