//! Findwatch - A watch-face countdown/stopwatch timer
//! 
//! This library provides the timer engine (countdown or count-up, with
//! vibration and flash alerts), the collaborators it drives, and an HTTP
//! surface through which button presses and companion-app configuration
//! messages are delivered.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, Engine, TimerConfig};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
