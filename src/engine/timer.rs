//! Timer engine: a single countdown/stopwatch clock at one-second granularity

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Seconds used when a game carries no usable minimum duration
pub const FALLBACK_SECONDS: u64 = 300;

/// Countdown values at or below this are flagged as running low
pub const LOW_TIME_SECONDS: u64 = 10;

/// Direction the clock counts in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    #[default]
    Countdown,
    Stopwatch,
}

/// Observable state of the clock, derived from the counter and the running flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Stopped with the counter at its reset value
    Idle,
    Running,
    /// Stopped somewhere between the reset value and expiry
    Paused,
    /// Countdown reached zero; only `reset` or `set_kind` leave this phase
    Expired,
}

/// The clock owned by a play session
///
/// The counter only moves through [`TimerEngine::tick`], and only while the
/// clock is running. Scheduling the ticks is the owner's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    kind: TimerKind,
    default_seconds: u64,
    seconds: u64,
    running: bool,
}

impl TimerEngine {
    /// Create a stopped countdown seeded with `default_seconds`
    pub fn new(default_seconds: f64) -> Self {
        let default_seconds = sanitize_default_seconds(default_seconds);
        Self {
            kind: TimerKind::Countdown,
            default_seconds,
            seconds: default_seconds,
            running: false,
        }
    }

    /// Re-seed the clock, returning to a stopped countdown
    pub fn initialize(&mut self, default_seconds: f64) {
        *self = Self::new(default_seconds);
    }

    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    pub fn default_seconds(&self) -> u64 {
        self.default_seconds
    }

    /// Seconds remaining (countdown) or elapsed (stopwatch)
    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Flip between running and stopped, returning the new running flag
    pub fn toggle_running(&mut self) -> bool {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
        self.running
    }

    /// Start the clock. An expired countdown stays stopped until it is reset.
    pub fn start(&mut self) -> bool {
        if self.running {
            return true;
        }
        if self.kind == TimerKind::Countdown && self.seconds == 0 {
            debug!("Ignoring start on an expired countdown");
            return false;
        }
        self.running = true;
        true
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    /// Advance the clock by one second. Does nothing while stopped.
    pub fn tick(&mut self) {
        if !self.running {
            return;
        }
        match self.kind {
            TimerKind::Countdown => {
                self.seconds = self.seconds.saturating_sub(1);
                if self.seconds == 0 {
                    debug!("Countdown expired");
                    self.running = false;
                }
            }
            TimerKind::Stopwatch => {
                self.seconds = self.seconds.saturating_add(1);
            }
        }
    }

    /// Stop the clock and return the counter to its starting value for the current kind
    pub fn reset(&mut self) {
        self.running = false;
        self.seconds = self.reset_value();
    }

    /// Switch counting direction. The clock always stops; the counter is only
    /// reinitialized when the kind actually changes.
    pub fn set_kind(&mut self, kind: TimerKind) {
        self.running = false;
        if self.kind != kind {
            self.kind = kind;
            self.seconds = self.reset_value();
        }
    }

    pub fn phase(&self) -> TimerPhase {
        if self.running {
            TimerPhase::Running
        } else if self.kind == TimerKind::Countdown && self.seconds == 0 {
            TimerPhase::Expired
        } else if self.seconds == self.reset_value() {
            TimerPhase::Idle
        } else {
            TimerPhase::Paused
        }
    }

    /// Whether a countdown is close enough to zero to warn the players
    pub fn is_low_time(&self) -> bool {
        self.kind == TimerKind::Countdown && self.seconds <= LOW_TIME_SECONDS
    }

    /// Current counter rendered as `MM:SS`
    pub fn display(&self) -> String {
        format_clock(self.seconds)
    }

    fn reset_value(&self) -> u64 {
        match self.kind {
            TimerKind::Countdown => self.default_seconds,
            TimerKind::Stopwatch => 0,
        }
    }
}

/// Whole seconds of a seed value, or [`FALLBACK_SECONDS`] when it is not a
/// finite value of at least one second
pub fn sanitize_default_seconds(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds >= 1.0 {
        seconds.floor() as u64
    } else {
        FALLBACK_SECONDS
    }
}

/// Render a second count as zero-padded `MM:SS`; minutes are not capped
pub fn format_clock(total_seconds: u64) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}
