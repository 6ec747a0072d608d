//! Engine event loop
//!
//! Every engine mutation goes through this one task, one event at a time, so
//! ticks, button presses and config updates can never interleave.

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info};

use crate::state::{ConfigUpdate, Engine, EngineSnapshot, TickHandle, TimerConfig};

/// Everything the engine reacts to
#[derive(Debug)]
pub enum Event {
    /// A scheduled tick fired
    Tick(TickHandle),
    /// The watch button was pressed
    Button(Option<oneshot::Sender<EngineSnapshot>>),
    /// A decoded remote config update arrived
    Config(ConfigUpdate, Option<oneshot::Sender<EngineSnapshot>>),
    /// Stop processing and hand back the config to persist
    Shutdown(oneshot::Sender<TimerConfig>),
}

/// Run the engine until a shutdown event arrives, returning the final config
pub async fn engine_task(
    mut engine: Engine,
    mut events: mpsc::UnboundedReceiver<Event>,
    snapshots: watch::Sender<EngineSnapshot>,
) -> TimerConfig {
    info!("Starting engine task");
    snapshots.send_replace(engine.snapshot());

    while let Some(event) = events.recv().await {
        match event {
            Event::Tick(handle) => {
                engine.on_tick(handle);
            }
            Event::Button(reply) => {
                debug!("Button pressed");
                engine.press();
                respond(reply, engine.snapshot());
            }
            Event::Config(update, reply) => {
                engine.apply_config_update(update);
                respond(reply, engine.snapshot());
            }
            Event::Shutdown(reply) => {
                info!("Engine shutting down");
                let config = engine.shutdown();
                snapshots.send_replace(engine.snapshot());
                if reply.send(config.clone()).is_err() {
                    debug!("Shutdown requester went away");
                }
                return config;
            }
        }

        snapshots.send_replace(engine.snapshot());
    }

    // The engine's scheduler holds a sender, so the queue cannot close while
    // the engine is alive; shutdown always arrives as an event
    info!("Engine queue closed");
    engine.shutdown()
}

fn respond(reply: Option<oneshot::Sender<EngineSnapshot>>, snapshot: EngineSnapshot) {
    if let Some(reply) = reply {
        if reply.send(snapshot).is_err() {
            debug!("Requester went away before the reply");
        }
    }
}
