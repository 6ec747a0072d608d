//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::EngineSnapshot;

/// Response for button presses and remote messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub engine: EngineSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: &str, message: String, engine: EngineSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            engine,
        }
    }

    /// The request changed the engine
    pub fn applied(message: String, engine: EngineSnapshot) -> Self {
        Self::new("applied", message, engine)
    }

    /// Well-formed message with a tag nobody handles
    pub fn ignored(message: String, engine: EngineSnapshot) -> Self {
        Self::new("ignored", message, engine)
    }

    /// Message could not be decoded and was thrown away
    pub fn dropped(message: String, engine: EngineSnapshot) -> Self {
        Self::new("dropped", message, engine)
    }
}

/// Status response with engine and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub engine: EngineSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
