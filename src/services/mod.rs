//! External collaborator module
//! 
//! This module contains the things the timer engine talks to but does not
//! own: the display, the vibration motor, the tick scheduler, the settings
//! store and the remote configuration decoder.

pub mod display;
pub mod haptics;
pub mod remote;
pub mod scheduler;
pub mod settings;

// Re-export main types
pub use display::{Color, DisplaySink, Frame, Style, TerminalDisplay};
pub use haptics::{AlertSink, TerminalHaptics};
pub use remote::{MessageError, RemoteMessage};
pub use scheduler::{Scheduler, TokioScheduler};
pub use settings::{FileStore, MemoryStore, SettingsError, SettingsStore};
