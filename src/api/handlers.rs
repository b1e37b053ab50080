//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{extract::State, response::Json};
use chrono::Utc;
use tracing::info;

use crate::{
    engine::{GameDescriptor, Intent},
    error::ApiError,
    state::AppState,
};
use super::responses::{HealthResponse, SessionResponse};

/// Handle POST /session - Enter play mode for a game
pub async fn enter_handler(
    State(state): State<Arc<AppState>>,
    Json(game): Json<GameDescriptor>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.enter_session(&game).await?;
    info!("Play mode entered for {:?}", session.game_name);
    Ok(Json(SessionResponse::active(
        format!("Playing {}", session.game_name),
        session,
    )))
}

/// Handle GET /session - Return the current session state
pub async fn session_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.current_state().await?;
    Ok(Json(SessionResponse::active("Current session".to_string(), session)))
}

/// Handle POST /session/intent - Apply a user intent
pub async fn intent_handler(
    State(state): State<Arc<AppState>>,
    Json(intent): Json<Intent>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.dispatch(intent).await?;
    Ok(Json(SessionResponse::active("Intent applied".to_string(), session)))
}

/// Handle DELETE /session - Exit play mode
pub async fn exit_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.exit_session().await?;
    Ok(Json(SessionResponse::closed(
        format!("Stopped playing {}", session.game_name),
        session,
    )))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let (last_action, last_action_time) = state.get_last_action();
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        session_active: state.has_session().await,
        last_action,
        last_action_time,
    })
}
