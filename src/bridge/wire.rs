//! Wire format for the host↔UI bridge.
//!
//! Every message crossing the bridge is a JSON object of the shape
//! `{"channel": <name>, "value": <payload>}`. The four channel names are
//! the complete contract between the host context and the UI context; no
//! other host capability is reachable.

use serde::{Deserialize, Serialize};

use super::led::LedStatus;

/// Channel name for host→UI background color pushes.
pub const UPDATE_BACKGROUND: &str = "update-background";
/// Channel name for host→UI slider position pushes.
pub const UPDATE_POSITION_X: &str = "update-position-x";
/// Channel name for UI→host LED on/off writes.
pub const WRITE_LED_STATUS: &str = "write:LEDStatus";
/// Channel name for UI→host LED brightness writes.
pub const WRITE_LED_BRIGHTNESS: &str = "write:LEDBrightness";

/// A message crossing the bridge, tagged by its channel name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "channel", content = "value")]
pub enum WireMessage {
    /// Host pushes a new background color as a packed `0xRRGGBB` integer.
    #[serde(rename = "update-background")]
    UpdateBackground(u32),
    /// Host pushes a normalized slider position in `[0, 1]`.
    #[serde(rename = "update-position-x")]
    UpdatePositionX(f32),
    /// UI writes the LED on/off status. Payload is restricted to `1|0`.
    #[serde(rename = "write:LEDStatus")]
    WriteLedStatus(LedStatus),
    /// UI writes the LED brightness. The caller pre-normalizes the value;
    /// range policing is the hardware driver's concern.
    #[serde(rename = "write:LEDBrightness")]
    WriteLedBrightness(f32),
}

impl WireMessage {
    /// Encode to the JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode from the JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] for malformed JSON or an unknown
    /// channel.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_names_are_the_wire_contract() {
        let cases = [
            (WireMessage::UpdateBackground(0x00ff_00ff), UPDATE_BACKGROUND),
            (WireMessage::UpdatePositionX(0.5), UPDATE_POSITION_X),
            (WireMessage::WriteLedStatus(LedStatus::On), WRITE_LED_STATUS),
            (WireMessage::WriteLedBrightness(0.25), WRITE_LED_BRIGHTNESS),
        ];
        for (msg, channel) in cases {
            let raw = msg.encode().unwrap();
            let parsed: serde_json::Value =
                serde_json::from_str(&raw).unwrap();
            assert_eq!(parsed["channel"], channel, "bad channel in {raw}");
        }
    }

    #[test]
    fn status_payload_is_one_or_zero() {
        let on = WireMessage::WriteLedStatus(LedStatus::On)
            .encode()
            .unwrap();
        let off = WireMessage::WriteLedStatus(LedStatus::Off)
            .encode()
            .unwrap();
        assert!(on.contains("\"value\":1"), "{on}");
        assert!(off.contains("\"value\":0"), "{off}");
    }

    #[test]
    fn round_trips_through_json() {
        let msg = WireMessage::WriteLedBrightness(0.75);
        let raw = msg.encode().unwrap();
        assert_eq!(WireMessage::decode(&raw).unwrap(), msg);
    }

    #[test]
    fn decode_rejects_unknown_channels() {
        assert!(
            WireMessage::decode(r#"{"channel":"write:Servo","value":3}"#)
                .is_err()
        );
    }

    #[test]
    fn decode_rejects_out_of_range_status() {
        assert!(
            WireMessage::decode(r#"{"channel":"write:LEDStatus","value":2}"#)
                .is_err()
        );
    }
}
