//! Timer engine: the countdown/count-up state machine
//!
//! The engine owns the [`TimerConfig`] and [`TimerState`] and is driven by
//! three kinds of input: ticks from the [`Scheduler`], button presses and
//! remote config updates. It must only ever be touched from one place at a
//! time; the event loop in `tasks` guarantees that.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ConfigUpdate, Direction, Phase, TickHandle, TimerConfig, TimerState};
use crate::services::{AlertSink, DisplaySink, Frame, Scheduler, Style};

/// Fixed spacing between ticks
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// What a button press does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonPolicy {
    /// Stop a running timer, start an idle one
    Toggle,
    /// Stop a running timer, otherwise do nothing
    StopOnly,
}

/// Behaviour knobs fixed for the lifetime of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub direction: Direction,
    pub button: ButtonPolicy,
    /// Stay in `Finished` after a run completes instead of dropping to `Idle`
    pub linger_on_finish: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            direction: Direction::Countdown,
            button: ButtonPolicy::Toggle,
            linger_on_finish: false,
        }
    }
}

/// Serializable view of the engine after an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub phase: Phase,
    pub direction: Direction,
    pub seconds: u32,
    pub display: String,
    pub style: Style,
    pub config: TimerConfig,
}

pub struct Engine {
    config: TimerConfig,
    state: TimerState,
    options: EngineOptions,
    display: Box<dyn DisplaySink>,
    haptics: Box<dyn AlertSink>,
    scheduler: Box<dyn Scheduler>,
}

impl Engine {
    /// Create an idle engine
    pub fn new(
        config: TimerConfig,
        options: EngineOptions,
        display: Box<dyn DisplaySink>,
        haptics: Box<dyn AlertSink>,
        scheduler: Box<dyn Scheduler>,
    ) -> Self {
        Self {
            config,
            state: TimerState::new(),
            options,
            display,
            haptics,
            scheduler,
        }
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Frame for the current time value, with the flash style applied
    pub fn frame(&self) -> Frame {
        let style = if self.config.flash_enabled {
            Style::for_parity(self.state.seconds_part())
        } else {
            Style::NORMAL
        };
        Frame::new(self.state.seconds, style)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        let frame = self.frame();
        EngineSnapshot {
            phase: self.state.phase,
            direction: self.options.direction,
            seconds: self.state.seconds,
            display: frame.to_string(),
            style: frame.style,
            config: self.config.clone(),
        }
    }

    /// Begin a fresh run. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.state.is_running() {
            debug!("Start requested while running, ignoring");
            return false;
        }

        self.cancel_pending();
        self.state.phase = Phase::Running;
        self.state.seconds = self.initial_value();
        self.state.tick_handle = Some(self.scheduler.schedule(TICK_INTERVAL));

        info!("Start: {} ({:?})", self.frame(), self.options.direction);
        self.render();
        self.haptics.short_pulse();
        true
    }

    /// Advance the time value by one second
    pub fn tick(&mut self) {
        if !self.state.is_running() {
            debug!("Tick while {:?}, ignoring", self.state.phase);
            return;
        }

        self.cancel_pending();

        let finished = match self.options.direction {
            Direction::Countdown => {
                self.state.seconds = self.state.seconds.saturating_sub(1);
                self.state.seconds == 0
            }
            Direction::CountUp => {
                let limit = self.config.duration_seconds;
                self.state.seconds = (self.state.seconds + 1).min(limit);
                self.state.seconds >= limit
            }
        };

        if finished {
            self.state.phase = if self.options.linger_on_finish {
                Phase::Finished
            } else {
                Phase::Idle
            };
            info!("Timer finished at {}", self.frame());
        } else {
            self.state.tick_handle = Some(self.scheduler.schedule(TICK_INTERVAL));
            debug!("Timer: {}", self.frame());
        }

        self.render();
        if self.config.vibration_enabled {
            self.haptics.short_pulse();
        }
    }

    /// Handle a fired tick, discarding it if it is not the one currently pending
    pub fn on_tick(&mut self, handle: TickHandle) -> bool {
        if self.state.tick_handle != Some(handle) {
            debug!("Discarding stale tick {:?}", handle);
            return false;
        }

        self.tick();
        true
    }

    /// Stop and fully reset a running timer. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        if !self.state.is_running() {
            debug!("Stop requested while {:?}, ignoring", self.state.phase);
            return false;
        }

        info!("Stop: {}", self.frame());
        self.cancel_pending();
        self.reset();
        self.render();
        true
    }

    /// Stop when running, start otherwise
    pub fn toggle(&mut self) {
        if self.state.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Handle one press of the watch button under the configured policy
    pub fn press(&mut self) {
        match (self.options.button, self.state.phase) {
            (ButtonPolicy::Toggle, _) => self.toggle(),
            (ButtonPolicy::StopOnly, Phase::Running) => {
                self.stop();
            }
            (ButtonPolicy::StopOnly, Phase::Finished) => {
                self.reset();
                self.render();
            }
            (ButtonPolicy::StopOnly, Phase::Idle) => {
                debug!("Button pressed while idle, ignoring");
            }
        }
    }

    /// Change one config field and restart the timer, whatever it was doing
    pub fn apply_config_update(&mut self, update: ConfigUpdate) {
        info!("New config: {:?}", update);
        self.config.apply(update);

        self.cancel_pending();
        self.reset();
        self.start();
    }

    /// Cancel anything pending and hand back the config for persisting
    pub fn shutdown(&mut self) -> TimerConfig {
        self.cancel_pending();
        self.reset();
        self.config.clone()
    }

    fn initial_value(&self) -> u32 {
        self.options.direction.initial_value(&self.config)
    }

    fn reset(&mut self) {
        self.state.phase = Phase::Idle;
        self.state.seconds = self.initial_value();
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.state.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn render(&mut self) {
        let frame = self.frame();
        self.display.render(&frame);
    }
}
