//! Session task: the single event loop that owns one play session

use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::{
    engine::{GameDescriptor, Intent, PlaySession},
    error::SessionError,
    state::PlaySessionState,
};
use super::tick_source::IntervalScheduler;

const COMMAND_BUFFER: usize = 32;

/// Requests from the host to the session task
#[derive(Debug)]
pub enum SessionCommand {
    Apply {
        intent: Intent,
        reply: oneshot::Sender<PlaySessionState>,
    },
    Snapshot {
        reply: oneshot::Sender<PlaySessionState>,
    },
    Exit {
        reply: oneshot::Sender<PlaySessionState>,
    },
}

/// Host-side handle to a running play session
///
/// Dropping the handle ends the session task and releases its tick subscription.
#[derive(Debug)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<SessionCommand>,
    state_rx: watch::Receiver<PlaySessionState>,
    task: JoinHandle<()>,
}

impl SessionHandle {
    /// Enter play mode for `game`, spawning the session task
    pub fn enter(game: &GameDescriptor) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        let session = PlaySession::enter(game, IntervalScheduler::new(tick_tx));
        let (state_tx, state_rx) = watch::channel(session.snapshot());
        let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);

        let task = tokio::spawn(session_task(session, command_rx, tick_rx, state_tx));

        Self {
            command_tx,
            state_rx,
            task,
        }
    }

    /// Apply an intent and return the resulting snapshot
    pub async fn dispatch(&self, intent: Intent) -> Result<PlaySessionState, SessionError> {
        self.request(|reply| SessionCommand::Apply { intent, reply }).await
    }

    /// Current snapshot, as seen by the session task
    pub async fn snapshot(&self) -> Result<PlaySessionState, SessionError> {
        self.request(|reply| SessionCommand::Snapshot { reply }).await
    }

    /// Watch every snapshot the session publishes, ticks included
    pub fn subscribe(&self) -> watch::Receiver<PlaySessionState> {
        self.state_rx.clone()
    }

    /// Leave play mode and wait for the session task to finish
    pub async fn exit(self) -> Result<PlaySessionState, SessionError> {
        let final_state = self.request(|reply| SessionCommand::Exit { reply }).await?;
        if let Err(e) = self.task.await {
            warn!("Session task ended abnormally: {}", e);
        }
        Ok(final_state)
    }

    async fn request<F>(&self, build: F) -> Result<PlaySessionState, SessionError>
    where
        F: FnOnce(oneshot::Sender<PlaySessionState>) -> SessionCommand,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| SessionError::Closed)?;
        reply_rx.await.map_err(|_| SessionError::Closed)
    }
}

/// Event loop owning `session` until an exit command arrives or every handle is dropped
///
/// Host commands and ticks are handled one at a time, so intents and ticks
/// never interleave.
pub async fn session_task(
    mut session: PlaySession<IntervalScheduler>,
    mut command_rx: mpsc::Receiver<SessionCommand>,
    mut tick_rx: mpsc::UnboundedReceiver<u64>,
    state_tx: watch::Sender<PlaySessionState>,
) {
    info!("Starting play session task for {:?}", session.game_name());

    loop {
        tokio::select! {
            // host intents win over a tick that became ready at the same time
            biased;

            command = command_rx.recv() => match command {
                Some(SessionCommand::Apply { intent, reply }) => {
                    let state = session.apply(intent);
                    state_tx.send_replace(state.clone());
                    let _ = reply.send(state);
                }
                Some(SessionCommand::Snapshot { reply }) => {
                    let _ = reply.send(session.snapshot());
                }
                Some(SessionCommand::Exit { reply }) => {
                    let state = session.exit();
                    state_tx.send_replace(state.clone());
                    let _ = reply.send(state);
                    return;
                }
                None => {
                    debug!("All session handles dropped, closing session");
                    break;
                }
            },

            Some(epoch) = tick_rx.recv() => {
                if session.tick(epoch) {
                    let state = session.snapshot();
                    if state.timer.is_expired() {
                        info!("Countdown for {:?} expired", state.game_name);
                    }
                    state_tx.send_replace(state);
                }
            }
        }
    }

    session.exit();
}
