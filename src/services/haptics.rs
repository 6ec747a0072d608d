//! Haptic alert sink

use std::io::Write;

use tracing::{debug, warn};

/// Fires short vibration pulses
pub trait AlertSink: Send {
    fn short_pulse(&mut self);
}

/// Stands in for the vibration motor by ringing the terminal bell
#[derive(Debug, Default)]
pub struct TerminalHaptics;

impl AlertSink for TerminalHaptics {
    fn short_pulse(&mut self) {
        debug!("Short pulse");
        let mut stdout = std::io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}
