//! Remote configuration messages from the companion app
//!
//! Messages arrive as small JSON objects carrying a string `tag` and a
//! payload. They are decoded here, once, into a [`ConfigUpdate`]; the engine
//! never sees the tag strings.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::state::{timer_config::Flag, ConfigUpdate};

/// Largest value a single companion field can carry (signed 8-bit)
pub const MAX_FIELD_VALUE: i64 = i8::MAX as i64;

/// Raw inbound message before decoding
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteMessage {
    pub tag: String,
    #[serde(default)]
    pub value: Option<Value>,
    /// Split duration form sent by the companion: minutes and seconds
    #[serde(default)]
    pub minutes: Option<Value>,
    #[serde(default)]
    pub seconds: Option<Value>,
}

/// Why a message was dropped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// Body is not a message object at all
    #[error("malformed message: {0}")]
    Malformed(String),

    /// Known tag without a payload
    #[error("'{tag}' message has no payload")]
    MissingPayload { tag: String },

    /// Payload of the wrong type
    #[error("'{tag}' message has a bad payload: {reason}")]
    BadPayload { tag: String, reason: String },

    /// Integer payload outside 0..=127
    #[error("'{tag}' value {value} is outside 0..={max}", max = MAX_FIELD_VALUE)]
    OutOfRange { tag: String, value: i64 },
}

impl RemoteMessage {
    /// Decode a raw message body
    ///
    /// Returns `Ok(None)` for a well-formed message with a tag this app does
    /// not know about.
    pub fn decode(body: &[u8]) -> Result<Option<ConfigUpdate>, MessageError> {
        let message: RemoteMessage = serde_json::from_slice(body)
            .map_err(|e| MessageError::Malformed(e.to_string()))?;
        message.into_update()
    }

    /// Turn the tag and payload into a typed update
    pub fn into_update(self) -> Result<Option<ConfigUpdate>, MessageError> {
        match self.tag.as_str() {
            "time" => self.duration().map(|seconds| Some(ConfigUpdate::Duration(seconds))),
            "vibes" => self.flag().map(|on| Some(ConfigUpdate::VibrationEnabled(on))),
            "flashes" => self.flag().map(|on| Some(ConfigUpdate::FlashEnabled(on))),
            other => {
                debug!("Ignoring message with unknown tag '{}'", other);
                Ok(None)
            }
        }
    }

    fn duration(&self) -> Result<u32, MessageError> {
        if let Some(value) = &self.value {
            return self.field(value);
        }

        match (&self.minutes, &self.seconds) {
            (None, None) => Err(MessageError::MissingPayload { tag: self.tag.clone() }),
            (minutes, seconds) => {
                let minutes = minutes.as_ref().map(|m| self.field(m)).transpose()?.unwrap_or(0);
                let seconds = seconds.as_ref().map(|s| self.field(s)).transpose()?.unwrap_or(0);
                Ok(minutes * 60 + seconds)
            }
        }
    }

    fn field(&self, value: &Value) -> Result<u32, MessageError> {
        let n = value.as_i64().ok_or_else(|| MessageError::BadPayload {
            tag: self.tag.clone(),
            reason: format!("expected an integer, got {}", value),
        })?;

        if !(0..=MAX_FIELD_VALUE).contains(&n) {
            return Err(MessageError::OutOfRange { tag: self.tag.clone(), value: n });
        }

        Ok(n as u32)
    }

    fn flag(&self) -> Result<bool, MessageError> {
        let value = self.value.clone()
            .ok_or_else(|| MessageError::MissingPayload { tag: self.tag.clone() })?;

        serde_json::from_value::<Flag>(value)
            .map(|flag| flag.is_on())
            .map_err(|e| MessageError::BadPayload {
                tag: self.tag.clone(),
                reason: e.to_string(),
            })
    }
}
