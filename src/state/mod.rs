//! State management module
//! 
//! Serializable snapshots of a play session and the host-side application state.

pub mod app_state;
pub mod scoreboard_state;
pub mod session_state;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use scoreboard_state::{ScoreboardState, TeamState};
pub use session_state::PlaySessionState;
pub use timer_state::TimerState;
