//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, info};

use crate::{
    detect::detect_times,
    error::TimerError,
    state::{AppState, TimerId, TimerRegistry},
};
use super::responses::{
    ApiResponse, CreateTimerRequest, DetectRequest, DetectResponse, HealthResponse,
    StatusResponse, Suggestion, TimerListResponse, TimerView,
};

/// Run a registry command against one timer and answer with its new state
fn run_command<F>(
    state: &AppState,
    id: TimerId,
    action: &str,
    command: F,
) -> Result<Json<ApiResponse>, TimerError>
where
    F: FnOnce(&TimerRegistry, TimerId) -> Result<(), TimerError>,
{
    command(&state.registry, id)?;
    state.record_action(action);
    info!("{} endpoint called for timer {}", action, id);

    Ok(Json(ApiResponse::ok(
        format!("Timer {}", action),
        state.registry.get_timer(id),
    )))
}

/// Handle GET /timers - List all timers
pub async fn list_timers_handler(State(state): State<Arc<AppState>>) -> Json<TimerListResponse> {
    let timers = state.registry.timers().into_iter().map(TimerView::from).collect();
    Json(TimerListResponse { timers })
}

/// Handle POST /timers - Create a timer
pub async fn create_timer_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateTimerRequest>,
) -> Result<(StatusCode, Json<ApiResponse>), TimerError> {
    let id = state
        .registry
        .add_timer(request.label, request.duration, request.auto_start)?;
    state.record_action("added");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Timer added".to_string(), state.registry.get_timer(id))),
    ))
}

/// Handle GET /timers/:id - Single timer
pub async fn get_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Json<TimerView>, TimerError> {
    state
        .registry
        .get_timer(id)
        .map(|timer| Json(TimerView::from(timer)))
        .ok_or(TimerError::NotFound(id))
}

/// Handle POST /timers/:id/start - Start or resume a timer
pub async fn start_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse>, TimerError> {
    run_command(&state, id, "started", TimerRegistry::start_timer)
}

/// Handle POST /timers/:id/pause - Pause a timer
pub async fn pause_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse>, TimerError> {
    run_command(&state, id, "paused", TimerRegistry::pause_timer)
}

/// Handle POST /timers/:id/toggle - Pause if running, otherwise start
pub async fn toggle_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse>, TimerError> {
    run_command(&state, id, "toggled", TimerRegistry::toggle_timer)
}

/// Handle POST /timers/:id/reset - Restore the full duration
pub async fn reset_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse>, TimerError> {
    run_command(&state, id, "reset", TimerRegistry::reset_timer)
}

/// Handle DELETE /timers/:id - Remove a timer
pub async fn delete_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse>, TimerError> {
    run_command(&state, id, "deleted", TimerRegistry::delete_timer)
}

/// Handle POST /detect - Suggest timers for an instruction
pub async fn detect_handler(Json(request): Json<DetectRequest>) -> Json<DetectResponse> {
    let suggestions: Vec<Suggestion> = detect_times(&request.text)
        .into_iter()
        .map(Into::into)
        .collect();
    debug!("Detected {} time suggestions", suggestions.len());

    Json(DetectResponse { suggestions })
}

/// Handle GET /status - Return current server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();
    let (timers, running) = state.registry.counts();

    Json(StatusResponse {
        timers,
        running,
        completions: state.completions(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
