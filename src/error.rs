//! Errors raised by the timer registry

use thiserror::Error;

use crate::state::TimerId;

/// Caller-facing failures of registry commands.
///
/// All variants indicate a host bug rather than an end-user condition: a
/// well-behaved host never asks for a zero-length timer, never holds on to
/// the id of a deleted one and starts timers only where a Tokio runtime exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerError {
    /// `add_timer` was called with a duration that is not a positive number of seconds
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A command referenced a timer that is not in the registry
    #[error("timer {0} not found")]
    NotFound(TimerId),

    /// A countdown had to be spawned but no Tokio runtime was reachable
    #[error("no tokio runtime available to run the countdown")]
    RuntimeUnavailable,
}
