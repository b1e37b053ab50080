//! Play Mode - countdown/stopwatch clock and multi-team scoreboard for a game session
//! 
//! This library provides the play mode engine (timer, scoreboard, session
//! controller), the tokio runtime that drives its clock, and an HTTP host.

pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use engine::{GameDescriptor, Intent, PlaySession};
pub use state::{AppState, PlaySessionState};
pub use tasks::SessionHandle;
pub use api::create_router;
pub use utils::signals::shutdown_signal;
