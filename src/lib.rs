//! Kitchen Timers - countdown timers for cooking, with time detection
//!
//! This library manages any number of independent one-second countdown
//! timers, extracts candidate durations from instruction text, and serves
//! both over a small HTTP API.

pub mod api;
pub mod config;
pub mod detect;
pub mod error;
pub mod format;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use detect::{detect, detect_times, DetectedTime};
pub use error::TimerError;
pub use format::{format_detected, format_duration};
pub use state::{AppState, Timer, TimerId, TimerPhase, TimerRegistry};
pub use utils::signals::shutdown_signal;
