//! Play session snapshot returned to the host after every intent

use serde::{Deserialize, Serialize};

use super::{ScoreboardState, TimerState};
use crate::engine::{ActiveView, Scoreboard, TimerEngine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaySessionState {
    pub game_name: String,
    pub active_view: ActiveView,
    pub timer: TimerState,
    pub scoreboard: ScoreboardState,
}

impl PlaySessionState {
    pub fn capture(
        game_name: &str,
        active_view: ActiveView,
        timer: &TimerEngine,
        scoreboard: &Scoreboard,
    ) -> Self {
        Self {
            game_name: game_name.to_string(),
            active_view,
            timer: TimerState::from(timer),
            scoreboard: ScoreboardState::from(scoreboard),
        }
    }
}
