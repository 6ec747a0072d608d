//! Persisted timer configuration and the updates that mutate it

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Default run length: five minutes
pub const DEFAULT_DURATION_SECONDS: u32 = 5 * 60;

/// Durable timer configuration, loaded at startup and written back at shutdown
///
/// Each key is read on its own: a missing or unreadable value falls back to
/// its default without disturbing the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Countdown length, or count-up limit
    #[serde(rename = "duration", default = "default_duration", deserialize_with = "deserialize_duration")]
    pub duration_seconds: u32,
    /// Fire a short haptic pulse on every tick
    #[serde(default = "enabled", deserialize_with = "deserialize_flag")]
    pub vibration_enabled: bool,
    /// Invert the display colors on odd seconds
    #[serde(default = "enabled", deserialize_with = "deserialize_flag")]
    pub flash_enabled: bool,
}

impl TimerConfig {
    /// Create a config with explicit values
    pub fn new(duration_seconds: u32, vibration_enabled: bool, flash_enabled: bool) -> Self {
        Self {
            duration_seconds,
            vibration_enabled,
            flash_enabled,
        }
    }

    /// Apply a single field update, leaving the other fields untouched
    pub fn apply(&mut self, update: ConfigUpdate) {
        match update {
            ConfigUpdate::Duration(seconds) => self.duration_seconds = seconds,
            ConfigUpdate::VibrationEnabled(on) => self.vibration_enabled = on,
            ConfigUpdate::FlashEnabled(on) => self.flash_enabled = on,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_SECONDS, true, true)
    }
}

/// One decoded remote configuration change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigUpdate {
    Duration(u32),
    VibrationEnabled(bool),
    FlashEnabled(bool),
}

/// Loosely-typed on/off value as found in settings files and companion messages
///
/// Older watch builds stored flags as `"yes"` / empty strings, newer ones as
/// integers; both are accepted alongside plain booleans.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl Flag {
    pub fn is_on(&self) -> bool {
        match self {
            Flag::Bool(on) => *on,
            Flag::Int(n) => *n != 0,
            Flag::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "yes" | "on" | "true" | "1"
            ),
        }
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value.as_u64().and_then(|n| u32::try_from(n).ok()) {
        Some(seconds) => Ok(seconds),
        None => {
            warn!("Unreadable duration {}, using default", value);
            Ok(default_duration())
        }
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match serde_json::from_value::<Flag>(value.clone()) {
        Ok(flag) => Ok(flag.is_on()),
        Err(_) => {
            warn!("Unreadable flag {}, using default", value);
            Ok(enabled())
        }
    }
}

fn default_duration() -> u32 {
    DEFAULT_DURATION_SECONDS
}

fn enabled() -> bool {
    true
}
