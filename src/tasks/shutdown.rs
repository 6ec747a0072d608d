//! Engine wind-down and settings persistence

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{
    services::SettingsStore,
    state::{AppState, TimerConfig},
};

/// Stop the engine task and write its final config to the store
///
/// A failed write is logged and otherwise ignored; the config is returned
/// either way.
pub async fn shutdown_and_persist<S: SettingsStore>(
    state: &AppState,
    engine: JoinHandle<TimerConfig>,
    store: &S,
) -> anyhow::Result<TimerConfig> {
    let final_config = match state.shutdown().await {
        Ok(final_config) => final_config,
        Err(e) => {
            warn!("{}, waiting for engine task", e);
            engine.await?
        }
    };

    match store.save(&final_config) {
        Ok(()) => info!("Settings saved"),
        Err(e) => warn!("Failed to persist settings: {}", e),
    }

    Ok(final_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::{mpsc, watch};

    use crate::{
        services::{AlertSink, DisplaySink, Frame, MemoryStore, SettingsError, TokioScheduler},
        state::{ConfigUpdate, Engine, EngineOptions, Phase},
        tasks::engine_task,
    };

    struct Quiet;

    impl DisplaySink for Quiet {
        fn render(&mut self, _frame: &Frame) {}
    }

    impl AlertSink for Quiet {
        fn short_pulse(&mut self) {}
    }

    struct ReadOnlyStore;

    impl SettingsStore for ReadOnlyStore {
        fn load(&self) -> TimerConfig {
            TimerConfig::default()
        }

        fn save(&self, _config: &TimerConfig) -> Result<(), SettingsError> {
            Err(SettingsError::Unavailable("read-only".to_string()))
        }
    }

    fn spawn_app(config: TimerConfig) -> (AppState, JoinHandle<TimerConfig>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut engine = Engine::new(
            config,
            EngineOptions::default(),
            Box::new(Quiet),
            Box::new(Quiet),
            Box::new(TokioScheduler::new(tx.clone())),
        );
        engine.start();

        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
        let handle = tokio::spawn(engine_task(engine, rx, snapshot_tx));
        (AppState::new(tx, snapshot_rx, 20554, "127.0.0.1".to_string()), handle)
    }

    #[tokio::test(start_paused = true)]
    async fn test_persists_remote_changes() {
        let store = MemoryStore::default();
        let (state, handle) = spawn_app(TimerConfig::default());

        state.apply_update(ConfigUpdate::Duration(90)).await.unwrap();
        state.apply_update(ConfigUpdate::FlashEnabled(false)).await.unwrap();

        let config = shutdown_and_persist(&state, handle, &store).await.unwrap();
        assert_eq!(config, TimerConfig::new(90, true, false));
        assert_eq!(store.saved(), Some(TimerConfig::new(90, true, false)));
        assert_eq!(state.get_snapshot().phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_save_still_returns_config() {
        let (state, handle) = spawn_app(TimerConfig::new(30, false, true));

        let config = shutdown_and_persist(&state, handle, &ReadOnlyStore).await.unwrap();
        assert_eq!(config, TimerConfig::new(30, false, true));
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_stops_ticking() {
        let store = MemoryStore::default();
        let (state, handle) = spawn_app(TimerConfig::new(60, false, false));

        shutdown_and_persist(&state, handle, &store).await.unwrap();
        let after = state.get_snapshot();

        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        assert_eq!(state.get_snapshot(), after);
        assert!(state.press_button().await.is_err());
    }
}
