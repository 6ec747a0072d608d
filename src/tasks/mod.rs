//! Background tasks module
//! 
//! This module contains the engine event loop and the input sources that
//! feed it.

pub mod button_input;
pub mod engine_loop;
pub mod shutdown;

// Re-export main functions
pub use button_input::stdin_button_task;
pub use engine_loop::{engine_task, Event};
pub use shutdown::shutdown_and_persist;
