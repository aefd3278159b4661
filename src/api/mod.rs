//! HTTP API module
//!
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timers", get(list_timers_handler).post(create_timer_handler))
        .route("/timers/:id", get(get_timer_handler).delete(delete_timer_handler))
        .route("/timers/:id/start", post(start_timer_handler))
        .route("/timers/:id/pause", post(pause_timer_handler))
        .route("/timers/:id/toggle", post(toggle_timer_handler))
        .route("/timers/:id/reset", post(reset_timer_handler))
        .route("/detect", post(detect_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::state::TimerId;

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(body) => Body::from(body.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    fn app() -> (Router, Arc<AppState>) {
        let state = Arc::new(AppState::new(20554, "127.0.0.1".to_string(), 16));
        (create_router(Arc::clone(&state)), state)
    }

    #[tokio::test(start_paused = true)]
    async fn create_then_list() {
        let (app, _) = app();

        let (status, body) = send(
            &app,
            "POST",
            "/timers",
            Some(json!({ "label": "Boil pasta", "duration": 600 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["timer"]["label"], "Boil pasta");
        assert_eq!(body["timer"]["remaining"], 600);
        assert_eq!(body["timer"]["is_running"], true);
        assert_eq!(body["timer"]["phase"], "running");
        assert_eq!(body["timer"]["display"], "10:00");

        let (status, body) = send(&app, "GET", "/timers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timers"].as_array().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_is_bad_request() {
        let (app, _) = app();

        let (status, body) = send(&app, "POST", "/timers", Some(json!({ "duration": 0 }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test(start_paused = true)]
    async fn commands_drive_the_timer() {
        let (app, state) = app();
        let id = state.registry.add_timer("Rest dough", 120, false).unwrap();

        let (status, body) = send(&app, "POST", &format!("/timers/{}/start", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timer"]["is_running"], true);

        let (_, body) = send(&app, "POST", &format!("/timers/{}/toggle", id), None).await;
        assert_eq!(body["timer"]["is_running"], false);

        let (_, body) = send(&app, "POST", &format!("/timers/{}/pause", id), None).await;
        assert_eq!(body["timer"]["is_running"], false);

        let (_, body) = send(&app, "POST", &format!("/timers/{}/reset", id), None).await;
        assert_eq!(body["timer"]["remaining"], 120);

        let (status, body) = send(&app, "DELETE", &format!("/timers/{}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["timer"].is_null());
        assert!(state.registry.is_empty());

        let (_, body) = send(&app, "GET", "/status", None).await;
        assert_eq!(body["last_action"], "deleted");
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_timer_is_not_found() {
        let (app, _) = app();
        let id = TimerId::new();

        let (status, _) = send(&app, "GET", &format!("/timers/{}", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, "POST", &format!("/timers/{}/pause", id), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], format!("timer {} not found", id));
    }

    #[tokio::test]
    async fn detect_suggests_timers() {
        let (app, _) = app();

        let (status, body) = send(
            &app,
            "POST",
            "/detect",
            Some(json!({ "text": "Simmer for 1 hour and 30 minutes, check after 10 seconds" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let suggestions = body["suggestions"].as_array().unwrap();
        let seconds: Vec<u64> = suggestions
            .iter()
            .map(|s| s["seconds"].as_u64().unwrap())
            .collect();
        let labels: Vec<&str> = suggestions
            .iter()
            .map(|s| s["label"].as_str().unwrap())
            .collect();
        assert_eq!(seconds, vec![3600, 1800, 10]);
        assert_eq!(labels, vec!["1h", "30 min", "10s"]);
    }

    #[tokio::test]
    async fn health_and_status() {
        let (app, _) = app();

        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, body) = send(&app, "GET", "/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["timers"], 0);
        assert_eq!(body["running"], 0);
        assert_eq!(body["completions"], 0);
    }

    #[tokio::test(start_paused = true)]
    async fn status_counts_running_timers() {
        let (app, state) = app();
        state.registry.add_timer("Roast", 3600, true).unwrap();
        state.registry.add_timer("Rest", 600, false).unwrap();

        let (_, body) = send(&app, "GET", "/status", None).await;

        assert_eq!(body["timers"], 2);
        assert_eq!(body["running"], 1);
    }
}
