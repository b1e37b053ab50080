//! Play mode engine
//!
//! Pure, synchronous state machines for the clock, the scoreboard and the
//! session that composes them. Nothing here touches the network or storage;
//! ticks come in through the [`session::TickScheduler`] seam.

pub mod scoreboard;
pub mod session;
pub mod timer;

pub use scoreboard::{Scoreboard, Team, TeamColor, MAX_TEAMS, MIN_TEAMS};
pub use session::{ActiveView, GameDescriptor, Intent, PlaySession, TickScheduler};
pub use timer::{format_clock, TimerEngine, TimerKind, TimerPhase, FALLBACK_SECONDS};
