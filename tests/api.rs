//! HTTP surface tests
//!
//! These drive the router directly, with a live engine task behind it, and
//! check what button presses and companion messages do to the timer.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tokio::sync::{mpsc, watch};
use tower::ServiceExt;

use findwatch::{
    api::{
        create_router,
        responses::{ApiResponse, HealthResponse, StatusResponse},
    },
    services::{AlertSink, DisplaySink, Frame, TokioScheduler},
    state::{AppState, Direction, Engine, EngineOptions, Phase, TimerConfig},
    tasks::engine_task,
};

struct Quiet;

impl DisplaySink for Quiet {
    fn render(&mut self, _frame: &Frame) {}
}

impl AlertSink for Quiet {
    fn short_pulse(&mut self) {}
}

fn setup(config: TimerConfig, options: EngineOptions, autostart: bool) -> (Router, Arc<AppState>) {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let mut engine = Engine::new(
        config,
        options,
        Box::new(Quiet),
        Box::new(Quiet),
        Box::new(TokioScheduler::new(events_tx.clone())),
    );
    if autostart {
        engine.start();
    }

    let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
    tokio::spawn(engine_task(engine, events_rx, snapshot_tx));

    let state = Arc::new(AppState::new(events_tx, snapshot_rx, 20554, "127.0.0.1".to_string()));
    (create_router(Arc::clone(&state)), state)
}

async fn post(app: &Router, uri: &str, body: &str) -> (StatusCode, ApiResponse) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get<T: serde::de::DeserializeOwned>(app: &Router, uri: &str) -> T {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_health() {
    let (app, _) = setup(TimerConfig::default(), EngineOptions::default(), false);
    let health: HealthResponse = get(&app, "/health").await;
    assert_eq!(health.status, "ok");
}

#[tokio::test(start_paused = true)]
async fn test_button_toggles_timer() {
    let (app, _) = setup(TimerConfig::new(60, false, false), EngineOptions::default(), false);

    let (status, response) = post(&app, "/button", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.status, "applied");
    assert_eq!(response.engine.phase, Phase::Running);
    assert_eq!(response.engine.display, "01:00");

    tokio::time::sleep(std::time::Duration::from_millis(2500)).await;

    let (_, response) = post(&app, "/button", "").await;
    assert_eq!(response.engine.phase, Phase::Idle);
    assert_eq!(response.engine.seconds, 60);

    let status: StatusResponse = get(&app, "/status").await;
    assert_eq!(status.engine.phase, Phase::Idle);
    assert_eq!(status.last_action.as_deref(), Some("button"));
    assert!(status.last_action_time.is_some());
}

#[tokio::test(start_paused = true)]
async fn test_duration_message_restarts_timer() {
    let (app, state) = setup(TimerConfig::default(), EngineOptions::default(), true);

    tokio::time::sleep(std::time::Duration::from_millis(3500)).await;
    assert_eq!(state.get_snapshot().seconds, 297);

    let (status, response) = post(&app, "/message", r#"{"tag":"time","value":120}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.status, "applied");
    assert_eq!(response.engine.phase, Phase::Running);
    assert_eq!(response.engine.seconds, 120);
    assert_eq!(response.engine.config, TimerConfig::new(120, true, true));
}

#[tokio::test(start_paused = true)]
async fn test_companion_split_time_and_flags() {
    let (app, _) = setup(TimerConfig::default(), EngineOptions::default(), false);

    let (_, response) = post(&app, "/message", r#"{"tag":"time","minutes":2,"seconds":30}"#).await;
    assert_eq!(response.engine.seconds, 150);

    let (_, response) = post(&app, "/message", r#"{"tag":"vibes","value":0}"#).await;
    assert!(!response.engine.config.vibration_enabled);

    let (_, response) = post(&app, "/message", r#"{"tag":"flashes","value":""}"#).await;
    assert_eq!(response.engine.config, TimerConfig::new(150, false, false));
    assert_eq!(response.engine.phase, Phase::Running);
}

#[tokio::test(start_paused = true)]
async fn test_flag_update_restarts_idle_timer() {
    let (app, state) = setup(TimerConfig::default(), EngineOptions::default(), false);
    assert_eq!(state.get_snapshot().phase, Phase::Idle);

    let (_, response) = post(&app, "/message", r#"{"tag":"flashes","value":"yes"}"#).await;
    assert_eq!(response.engine.phase, Phase::Running);
    assert_eq!(response.engine.seconds, 300);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_tag_changes_nothing() {
    let (app, state) = setup(TimerConfig::new(42, false, true), EngineOptions::default(), false);
    let before = state.get_snapshot();

    let (status, response) = post(&app, "/message", r#"{"tag":"foo","value":1}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.status, "ignored");
    assert_eq!(response.engine, before);
    assert_eq!(state.get_snapshot(), before);
    assert_eq!(state.get_snapshot().phase, Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_unknown_tag_leaves_run_alone() {
    let (app, state) = setup(TimerConfig::new(42, false, true), EngineOptions::default(), true);

    tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
    let (_, response) = post(&app, "/message", r#"{"tag":"foo","value":1}"#).await;
    assert_eq!(response.status, "ignored");

    let after = state.get_snapshot();
    assert_eq!(after.phase, Phase::Running);
    assert_eq!(after.config, TimerConfig::new(42, false, true));
    assert!(after.seconds < 42, "run was restarted: {:?}", after);
}

#[tokio::test(start_paused = true)]
async fn test_malformed_message_dropped() {
    let (app, state) = setup(TimerConfig::new(90, true, false), EngineOptions::default(), false);
    let before = state.get_snapshot();

    for body in ["garbage", r#"{"tag":"time","value":500}"#, r#"{"tag":"vibes"}"#, ""] {
        let (status, response) = post(&app, "/message", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(response.status, "dropped");
        assert_eq!(response.engine, before);
    }

    assert_eq!(state.get_snapshot(), before);
}

#[tokio::test(start_paused = true)]
async fn test_count_up_run_finishes() {
    let options = EngineOptions {
        direction: Direction::CountUp,
        ..EngineOptions::default()
    };
    let (app, state) = setup(TimerConfig::new(5, false, false), options, true);

    tokio::time::sleep(std::time::Duration::from_millis(6000)).await;
    let status: StatusResponse = get(&app, "/status").await;
    assert_eq!(status.engine.phase, Phase::Idle);
    assert_eq!(status.engine.seconds, 5);
    assert_eq!(status.engine.display, "00:05");

    let config = state.shutdown().await.unwrap();
    assert_eq!(config, TimerConfig::new(5, false, false));
}
