//! Findwatch - A watch-face countdown/stopwatch timer
//!
//! This is the main entry point for the findwatch application.

use std::sync::Arc;
use tokio::{
    net::TcpListener,
    sync::{mpsc, watch},
};
use tracing::info;

use findwatch::{
    api::create_router,
    config::Config,
    services::{FileStore, SettingsStore, TerminalDisplay, TerminalHaptics, TokioScheduler},
    state::{AppState, Engine},
    tasks::{engine_task, shutdown_and_persist, stdin_button_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("findwatch={},tower_http=info", config.log_level()))
        .init();

    info!("Starting findwatch v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, direction={:?}, button={:?}",
          config.host, config.port, config.direction, config.button);

    // Load persisted timer settings
    let store = FileStore::new(&config.settings);
    let timer_config = store.load();

    // Build the engine; ticks come back through the same queue as every other event
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut engine = Engine::new(
        timer_config,
        config.engine_options(),
        Box::new(TerminalDisplay),
        Box::new(TerminalHaptics),
        Box::new(TokioScheduler::new(events_tx.clone())),
    );

    if config.autostart() {
        engine.start();
    }

    let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
    let engine_handle = tokio::spawn(engine_task(engine, events_rx, snapshot_tx));

    if config.stdin_button {
        tokio::spawn(stdin_button_task(events_tx.clone()));
    }

    let state = Arc::new(AppState::new(events_tx, snapshot_rx, config.port, config.host.clone()));
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /button  - Press the watch button");
    info!("  POST /message - Deliver a companion configuration message");
    info!("  GET  /status  - Current timer status");
    info!("  GET  /health  - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    // Stop the engine and persist whatever the companion configured
    shutdown_and_persist(&state, engine_handle, &store).await?;
    info!("Settings file: {}", store.path().display());

    info!("Shutdown complete");
    Ok(())
}
