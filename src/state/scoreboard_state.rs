//! Scoreboard state snapshot

use serde::{Deserialize, Serialize};

use crate::engine::{Scoreboard, Team, TeamColor};

/// One team as shown to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    pub name: String,
    pub score: u64,
    pub color: TeamColor,
    /// CSS value for `color`
    pub css: String,
}

impl From<&Team> for TeamState {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name().to_string(),
            score: team.score(),
            color: team.color(),
            css: team.color().css().to_string(),
        }
    }
}

/// Teams in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardState {
    pub teams: Vec<TeamState>,
}

impl From<&Scoreboard> for ScoreboardState {
    fn from(board: &Scoreboard) -> Self {
        Self {
            teams: board.teams().iter().map(TeamState::from).collect(),
        }
    }
}
