//! Timer state snapshot

use serde::{Deserialize, Serialize};

use crate::engine::{TimerEngine, TimerKind, TimerPhase};

/// Point-in-time view of the play session clock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub kind: TimerKind,
    pub default_seconds: u64,
    /// Seconds remaining for a countdown, seconds elapsed for a stopwatch
    pub seconds: u64,
    pub is_running: bool,
    pub phase: TimerPhase,
    /// `MM:SS` rendering of `seconds`
    pub display: String,
    pub low_time: bool,
}

impl TimerState {
    /// Check if the countdown has run out
    pub fn is_expired(&self) -> bool {
        self.phase == TimerPhase::Expired
    }
}

impl From<&TimerEngine> for TimerState {
    fn from(timer: &TimerEngine) -> Self {
        Self {
            kind: timer.kind(),
            default_seconds: timer.default_seconds(),
            seconds: timer.seconds(),
            is_running: timer.is_running(),
            phase: timer.phase(),
            display: timer.display(),
            low_time: timer.is_low_time(),
        }
    }
}
