//! Scoreboard engine: a bounded, ordered list of teams with non-negative scores

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fewest teams a scoreboard may hold
pub const MIN_TEAMS: usize = 2;
/// Most teams a scoreboard may hold
pub const MAX_TEAMS: usize = 6;

/// Team colors, in palette order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    Red,
    Green,
    Yellow,
    Orange,
    Purple,
    Blue,
}

impl TeamColor {
    /// Colors of the two seeded teams
    pub const PRIMARY: [TeamColor; MIN_TEAMS] = [TeamColor::Red, TeamColor::Green];

    /// Colors handed to added teams, cycled by position
    pub const SECONDARY: [TeamColor; 4] = [
        TeamColor::Yellow,
        TeamColor::Orange,
        TeamColor::Purple,
        TeamColor::Blue,
    ];

    /// Color for a team appended to a board that already holds `existing` teams
    pub fn for_added_team(existing: usize) -> TeamColor {
        let slot = existing.saturating_sub(MIN_TEAMS) % Self::SECONDARY.len();
        Self::SECONDARY[slot]
    }

    /// CSS value used by the host when rendering the team
    pub fn css(&self) -> &'static str {
        match self {
            TeamColor::Red => "var(--accent-red)",
            TeamColor::Green => "var(--accent-green)",
            TeamColor::Yellow => "var(--accent-yellow)",
            TeamColor::Orange => "var(--accent-orange)",
            TeamColor::Purple => "#9B59B6",
            TeamColor::Blue => "#3498DB",
        }
    }
}

/// One scoreboard entry. The color is fixed when the team is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    name: String,
    score: u64,
    color: TeamColor,
}

impl Team {
    fn new(name: String, color: TeamColor) -> Self {
        Self { name, score: 0, color }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn color(&self) -> TeamColor {
        self.color
    }
}

/// Ordered teams of a play session
///
/// Every mutation that would break the team-count bounds or address a missing
/// team is ignored. Mutators report whether anything changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    teams: Vec<Team>,
}

impl Scoreboard {
    /// Two teams, "Team 1" and "Team 2", both at zero
    pub fn new() -> Self {
        let teams = TeamColor::PRIMARY
            .iter()
            .enumerate()
            .map(|(i, &color)| Team::new(default_team_name(i), color))
            .collect();
        Self { teams }
    }

    pub fn initialize(&mut self) {
        *self = Self::new();
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn add_team(&mut self) -> bool {
        let existing = self.teams.len();
        if existing >= MAX_TEAMS {
            debug!("Scoreboard already holds {} teams, not adding another", MAX_TEAMS);
            return false;
        }
        self.teams.push(Team::new(
            default_team_name(existing),
            TeamColor::for_added_team(existing),
        ));
        true
    }

    pub fn remove_team(&mut self, index: usize) -> bool {
        if self.teams.len() <= MIN_TEAMS {
            debug!("Scoreboard at {} teams, not removing team {}", MIN_TEAMS, index);
            return false;
        }
        if index >= self.teams.len() {
            debug!("No team at index {} to remove", index);
            return false;
        }
        self.teams.remove(index);
        true
    }

    /// Replace a team's name verbatim
    pub fn rename_team(&mut self, index: usize, name: impl Into<String>) -> bool {
        match self.teams.get_mut(index) {
            Some(team) => {
                team.name = name.into();
                true
            }
            None => {
                debug!("No team at index {} to rename", index);
                false
            }
        }
    }

    /// Add `delta` to a team's score, flooring at zero
    pub fn update_score(&mut self, index: usize, delta: i64) -> bool {
        match self.teams.get_mut(index) {
            Some(team) => {
                team.score = team.score.saturating_add_signed(delta);
                true
            }
            None => {
                debug!("No team at index {} to score", index);
                false
            }
        }
    }

    pub fn reset_all_scores(&mut self) {
        for team in &mut self.teams {
            team.score = 0;
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

fn default_team_name(position: usize) -> String {
    format!("Team {}", position + 1)
}
