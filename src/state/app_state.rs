//! Main application state management

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::debug;

use super::{Timer, TimerRegistry};
use crate::format::format_duration;

/// Application state shared by the HTTP handlers and background tasks
#[derive(Debug)]
pub struct AppState {
    /// All timers and their countdowns
    pub registry: TimerRegistry,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Fan-out of finished timers
    pub completion_tx: broadcast::Sender<Timer>,
    /// Number of timers that counted down to zero since startup
    completions: Arc<AtomicU64>,
}

impl AppState {
    /// Create a new AppState with an empty registry wired to the completion
    /// channel, which holds up to `alert_buffer` unread completions
    pub fn new(port: u16, host: String, alert_buffer: usize) -> Self {
        let (completion_tx, _) = broadcast::channel(alert_buffer.max(1));
        let completions = Arc::new(AtomicU64::new(0));

        let registry = {
            let completion_tx = completion_tx.clone();
            let completions = Arc::clone(&completions);
            TimerRegistry::with_completion(move |timer| {
                completions.fetch_add(1, Ordering::Relaxed);
                if let Err(e) = completion_tx.send(timer) {
                    debug!("No listeners for timer completion: {}", e);
                }
            })
        };

        Self {
            registry,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            completion_tx,
            completions,
        }
    }

    /// Subscribe to timers finishing
    pub fn subscribe_completions(&self) -> broadcast::Receiver<Timer> {
        self.completion_tx.subscribe()
    }

    /// Remember the most recent command
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }

    pub fn completions(&self) -> u64 {
        self.completions.load(Ordering::Relaxed)
    }

    /// Server uptime in clock style
    pub fn get_uptime(&self) -> String {
        format_duration(self.start_time.elapsed().as_secs())
    }
}
