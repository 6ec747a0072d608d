//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
};
use tracing::{error, info};

use crate::{services::RemoteMessage, state::AppState};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

/// Handle POST /button - One press of the watch button
pub async fn button_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    match state.press_button().await {
        Ok(engine) => {
            info!("Button endpoint called - timer now {:?}", engine.phase);
            Ok(Json(ApiResponse::applied(
                format!("Button pressed, timer {:?} at {}", engine.phase, engine.display),
                engine,
            )))
        }
        Err(e) => {
            error!("Failed to deliver button press: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /message - Raw configuration message from the companion app
///
/// Undecodable messages are dropped rather than rejected, so the companion
/// always gets a 200 back.
pub async fn message_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ApiResponse>, StatusCode> {
    match RemoteMessage::decode(&body) {
        Ok(Some(update)) => match state.apply_update(update).await {
            Ok(engine) => {
                info!("Applied config update {:?}, timer restarted", update);
                Ok(Json(ApiResponse::applied(
                    format!("Config updated, timer restarted at {}", engine.display),
                    engine,
                )))
            }
            Err(e) => {
                error!("Failed to deliver config update: {}", e);
                Err(StatusCode::INTERNAL_SERVER_ERROR)
            }
        },
        Ok(None) => {
            info!("Message from phone ignored: unknown tag");
            Ok(Json(ApiResponse::ignored(
                "Unknown message tag".to_string(),
                state.get_snapshot(),
            )))
        }
        Err(e) => {
            info!("Message from phone dropped: {}", e);
            Ok(Json(ApiResponse::dropped(e.to_string(), state.get_snapshot())))
        }
    }
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        engine: state.get_snapshot(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
