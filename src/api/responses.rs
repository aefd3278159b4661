//! API request and response structures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    detect::DetectedTime,
    error::TimerError,
    format::{format_detected, format_duration},
    state::{Timer, TimerPhase},
};

/// Body of POST /timers
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimerRequest {
    #[serde(default)]
    pub label: String,
    /// Seconds
    pub duration: u64,
    #[serde(default = "default_auto_start")]
    pub auto_start: bool,
}

fn default_auto_start() -> bool {
    true
}

/// Body of POST /detect
#[derive(Debug, Clone, Deserialize)]
pub struct DetectRequest {
    pub text: String,
}

/// A timer as rendered to clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    #[serde(flatten)]
    pub timer: Timer,
    pub phase: TimerPhase,
    /// Remaining time in clock style
    pub display: String,
}

impl From<Timer> for TimerView {
    fn from(timer: Timer) -> Self {
        Self {
            phase: timer.phase(),
            display: format_duration(timer.remaining),
            timer,
        }
    }
}

/// API response structure for timer commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    /// The timer after the command, absent once deleted
    pub timer: Option<TimerView>,
}

impl ApiResponse {
    /// Create a successful command response
    pub fn ok(message: String, timer: Option<Timer>) -> Self {
        Self {
            status: "ok".to_string(),
            message,
            timestamp: Utc::now(),
            timer: timer.map(TimerView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerListResponse {
    pub timers: Vec<TimerView>,
}

/// A single "add a timer for this" suggestion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub seconds: u64,
    /// Compact label for a suggestion chip
    pub label: String,
    /// The phrase the time was found in
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl From<DetectedTime> for Suggestion {
    fn from(time: DetectedTime) -> Self {
        Self {
            label: format_detected(time.seconds),
            seconds: time.seconds,
            text: time.text,
            start: time.start,
            end: time.end,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectResponse {
    pub suggestions: Vec<Suggestion>,
}

/// Server status with timer counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timers: usize,
    pub running: usize,
    pub completions: u64,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error body returned for rejected commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for TimerError {
    fn into_response(self) -> Response {
        let status = match &self {
            TimerError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            TimerError::NotFound(_) => StatusCode::NOT_FOUND,
            TimerError::RuntimeUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!("Rejected timer command: {}", self);

        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.to_string(),
            timestamp: Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}
