//! Timer state structure and management

use serde::{Deserialize, Serialize};

use super::TimerConfig;

/// Engine lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// Which way the timer counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    /// Count down from the configured duration to zero
    Countdown,
    /// Count up from zero to the configured duration
    CountUp,
}

impl Direction {
    /// Time value a fresh run starts from
    pub fn initial_value(&self, config: &TimerConfig) -> u32 {
        match self {
            Direction::Countdown => config.duration_seconds,
            Direction::CountUp => 0,
        }
    }
}

/// Opaque handle to one scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Transient timer state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    /// Remaining seconds for a countdown, elapsed seconds for a count-up
    pub seconds: u32,
    pub phase: Phase,
    /// Pending tick; `Some` exactly while running
    pub tick_handle: Option<TickHandle>,
}

impl TimerState {
    /// Create an idle timer state at zero
    pub fn new() -> Self {
        Self {
            seconds: 0,
            phase: Phase::Idle,
            tick_handle: None,
        }
    }

    /// Check if the timer is running
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Minutes component of the time value
    pub fn minutes_part(&self) -> u32 {
        self.seconds / 60
    }

    /// Seconds component of the time value
    pub fn seconds_part(&self) -> u32 {
        self.seconds % 60
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}
