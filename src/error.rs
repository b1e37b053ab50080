//! Error types for the play session host

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors talking to a running session task
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session task has stopped and no longer accepts intents
    #[error("play session is no longer running")]
    Closed,
}

/// Errors surfaced by the HTTP host
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no active play session")]
    NoSession,
    #[error("a play session is already active")]
    SessionActive,
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// JSON body for error responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoSession => StatusCode::NOT_FOUND,
            ApiError::SessionActive => StatusCode::CONFLICT,
            ApiError::Session(SessionError::Closed) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.to_string(),
            timestamp: Utc::now(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
