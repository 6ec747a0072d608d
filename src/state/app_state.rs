//! Shared application state handed to the HTTP handlers

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::warn;

use super::{ConfigUpdate, EngineSnapshot, TimerConfig};
use crate::tasks::Event;

/// Handle to the running engine plus server metadata
///
/// The engine itself lives in its own task; everything here talks to it
/// through the event queue and reads the latest snapshot from a watch channel.
#[derive(Debug)]
pub struct AppState {
    /// Queue into the engine task
    pub events: mpsc::UnboundedSender<Event>,
    /// Latest engine snapshot
    pub snapshot_rx: watch::Receiver<EngineSnapshot>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    pub fn new(
        events: mpsc::UnboundedSender<Event>,
        snapshot_rx: watch::Receiver<EngineSnapshot>,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            events,
            snapshot_rx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Forward one button press and wait for the resulting snapshot
    pub async fn press_button(&self) -> Result<EngineSnapshot, String> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Button(Some(tx)))?;
        let snapshot = rx.await
            .map_err(|e| format!("Engine dropped button reply: {}", e))?;

        self.record_action("button");
        Ok(snapshot)
    }

    /// Forward a decoded config update and wait for the resulting snapshot
    pub async fn apply_update(&self, update: ConfigUpdate) -> Result<EngineSnapshot, String> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Config(update, Some(tx)))?;
        let snapshot = rx.await
            .map_err(|e| format!("Engine dropped config reply: {}", e))?;

        self.record_action("config");
        Ok(snapshot)
    }

    /// Ask the engine to wind down and return the config to persist
    pub async fn shutdown(&self) -> Result<TimerConfig, String> {
        let (tx, rx) = oneshot::channel();
        self.send(Event::Shutdown(tx))?;
        rx.await.map_err(|e| format!("Engine dropped shutdown reply: {}", e))
    }

    /// Get the most recent engine snapshot
    pub fn get_snapshot(&self) -> EngineSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Remember the last externally triggered action
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    fn send(&self, event: Event) -> Result<(), String> {
        self.events.send(event).map_err(|e| {
            warn!("Engine queue closed: {}", e);
            format!("Engine is not running: {}", e)
        })
    }
}
