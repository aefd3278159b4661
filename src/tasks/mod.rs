//! Background tasks module
//!
//! This module contains the per-timer countdown and the tasks that run
//! alongside the HTTP server.

pub mod alerts;
pub mod countdown;

// Re-export main functions
pub use alerts::completion_alert_task;
pub use countdown::TICK_PERIOD;
