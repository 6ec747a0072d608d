//! State management module
//! 
//! This module contains the timer configuration, the transient timer state,
//! the engine that drives both, and the shared application state used by the
//! HTTP layer.

pub mod timer_config;
pub mod timer_state;
pub mod engine;
pub mod app_state;

// Re-export main types
pub use timer_config::{ConfigUpdate, TimerConfig};
pub use timer_state::{Direction, Phase, TickHandle, TimerState};
pub use engine::{ButtonPolicy, Engine, EngineOptions, EngineSnapshot};
pub use app_state::AppState;
