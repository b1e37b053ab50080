//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::PlaySessionState;

/// Response for every play session endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: PlaySessionState,
}

impl SessionResponse {
    /// Create a new session response
    pub fn new(status: String, message: String, session: PlaySessionState) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            session,
        }
    }

    /// Session is open and accepting intents
    pub fn active(message: String, session: PlaySessionState) -> Self {
        Self::new("active".to_string(), message, session)
    }

    /// Session has been exited; `session` is its final state
    pub fn closed(message: String, session: PlaySessionState) -> Self {
        Self::new("closed".to_string(), message, session)
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub session_active: bool,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}
