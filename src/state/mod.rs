//! State management module
//!
//! This module contains the timer record, the registry owning all timers, and
//! the application state wrapping it for the HTTP host.

pub mod app_state;
pub mod registry;
pub mod timer;

// Re-export main types
pub use app_state::AppState;
pub use registry::{CompletionCallback, TimerRegistry};
pub use timer::{Timer, TimerId, TimerPhase};
