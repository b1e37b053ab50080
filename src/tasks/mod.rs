//! Background tasks module
//! 
//! This module contains the tokio tasks that run a play session: the session
//! event loop and the interval that feeds it ticks.

pub mod session_task;
pub mod tick_source;

// Re-export main types
pub use session_task::{session_task, SessionCommand, SessionHandle};
pub use tick_source::{IntervalScheduler, IntervalSubscription, TICK_PERIOD};
