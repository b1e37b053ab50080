//! Host application state: owns the play session opened through the API

use std::{
    sync::Mutex as StdMutex,
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::PlaySessionState;
use crate::{
    engine::{GameDescriptor, Intent},
    error::{ApiError, SessionError},
    tasks::SessionHandle,
};

/// Application state shared by the HTTP handlers
///
/// At most one play session is open at a time. It is owned here and reached
/// only through the handler `State`, never through a global.
#[derive(Debug)]
pub struct AppState {
    /// Handle to the open play session, if any
    session: Mutex<Option<SessionHandle>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: StdMutex<Option<String>>,
    last_action_time: StdMutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a new AppState with no open session
    pub fn new(port: u16, host: String) -> Self {
        Self {
            session: Mutex::new(None),
            start_time: Instant::now(),
            port,
            host,
            last_action: StdMutex::new(None),
            last_action_time: StdMutex::new(None),
        }
    }

    /// Enter play mode for `game`; fails if a session is already open
    pub async fn enter_session(&self, game: &GameDescriptor) -> Result<PlaySessionState, ApiError> {
        let mut slot = self.session.lock().await;
        if slot.is_some() {
            warn!("Refusing to enter play mode while a session is open");
            return Err(ApiError::SessionActive);
        }

        let handle = SessionHandle::enter(game);
        let state = handle.subscribe().borrow().clone();
        *slot = Some(handle);
        drop(slot);

        self.record_action("enter");
        Ok(state)
    }

    /// Snapshot of the open session
    pub async fn current_state(&self) -> Result<PlaySessionState, ApiError> {
        let mut slot = self.session.lock().await;
        let handle = slot.as_ref().ok_or(ApiError::NoSession)?;
        let result = handle.snapshot().await;
        Self::forget_if_closed(&mut *slot, result)
    }

    /// Dispatch a user intent to the open session
    pub async fn dispatch(&self, intent: Intent) -> Result<PlaySessionState, ApiError> {
        let action = intent_name(&intent);
        let mut slot = self.session.lock().await;
        let handle = slot.as_ref().ok_or(ApiError::NoSession)?;
        let result = handle.dispatch(intent).await;
        let state = Self::forget_if_closed(&mut *slot, result)?;
        drop(slot);

        self.record_action(action);
        Ok(state)
    }

    /// Exit play mode, releasing the session's tick source
    pub async fn exit_session(&self) -> Result<PlaySessionState, ApiError> {
        let handle = self.session.lock().await.take().ok_or(ApiError::NoSession)?;
        let state = handle.exit().await?;
        self.record_action("exit");
        info!("Play session for {:?} closed", state.game_name);
        Ok(state)
    }

    pub async fn has_session(&self) -> bool {
        self.session.lock().await.is_some()
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

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    // A session task that stopped on its own cannot be revived; drop its handle
    fn forget_if_closed(
        slot: &mut Option<SessionHandle>,
        result: Result<PlaySessionState, SessionError>,
    ) -> Result<PlaySessionState, ApiError> {
        if let Err(SessionError::Closed) = &result {
            warn!("Play session task is gone, discarding its handle");
            *slot = None;
        }
        Ok(result?)
    }
}

fn intent_name(intent: &Intent) -> &'static str {
    match intent {
        Intent::ToggleRunning => "toggle-running",
        Intent::ResetTimer => "reset-timer",
        Intent::SetTimerKind { .. } => "set-timer-kind",
        Intent::SetActiveView { .. } => "set-active-view",
        Intent::AddTeam => "add-team",
        Intent::RemoveTeam { .. } => "remove-team",
        Intent::RenameTeam { .. } => "rename-team",
        Intent::UpdateScore { .. } => "update-score",
        Intent::ResetAllScores => "reset-all-scores",
    }
}
