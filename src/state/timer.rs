//! Timer record and identity

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identity of a timer, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(Uuid);

impl TimerId {
    /// Generate a fresh id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TimerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TimerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Where a timer sits in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerPhase {
    /// Stopped with the full duration left
    Idle,
    Running,
    /// Stopped part way through
    Paused,
    /// Counted all the way down to zero
    Completed,
}

/// A single countdown.
///
/// Snapshots of this record are handed out by the registry; mutating a
/// snapshot has no effect on the registry's own copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    pub label: String,
    /// Total length in seconds, the value `reset` returns to
    pub duration: u64,
    /// Seconds left, always within `0..=duration`
    pub remaining: u64,
    pub is_running: bool,
}

impl Timer {
    pub(crate) fn new(label: String, duration: u64, is_running: bool) -> Self {
        Self {
            id: TimerId::new(),
            label,
            duration,
            remaining: duration,
            is_running,
        }
    }

    /// Derive the lifecycle phase from the remaining time and running flag
    pub fn phase(&self) -> TimerPhase {
        if self.is_running {
            TimerPhase::Running
        } else if self.remaining == 0 {
            TimerPhase::Completed
        } else if self.remaining == self.duration {
            TimerPhase::Idle
        } else {
            TimerPhase::Paused
        }
    }

    /// Check if the countdown has reached zero
    pub fn is_completed(&self) -> bool {
        self.remaining == 0
    }

    /// Seconds counted down so far
    pub fn elapsed(&self) -> u64 {
        self.duration.saturating_sub(self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_timer_starts_full() {
        let timer = Timer::new("Boil pasta".to_string(), 600, true);

        assert_eq!(timer.remaining, 600);
        assert_eq!(timer.elapsed(), 0);
        assert_eq!(timer.phase(), TimerPhase::Running);
    }

    #[test]
    fn phase_follows_remaining_and_running() {
        let mut timer = Timer::new(String::new(), 120, false);
        assert_eq!(timer.phase(), TimerPhase::Idle);

        timer.remaining = 90;
        assert_eq!(timer.phase(), TimerPhase::Paused);

        timer.remaining = 0;
        assert_eq!(timer.phase(), TimerPhase::Completed);
        assert!(timer.is_completed());
    }

    #[test]
    fn ids_are_unique_and_parse_back() {
        let a = TimerId::new();
        let b = TimerId::new();
        assert_ne!(a, b);

        let parsed: TimerId = a.to_string().parse().unwrap();
        assert_eq!(parsed, a);
        assert!("not-a-timer".parse::<TimerId>().is_err());
    }

    #[test]
    fn phase_serializes_lowercase() {
        let json = serde_json::to_string(&TimerPhase::Completed).unwrap();
        assert_eq!(json, "\"completed\"");
    }
}
