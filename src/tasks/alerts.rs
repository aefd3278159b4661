//! Completion alert background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

use crate::{format::format_duration, state::AppState};

/// Background task that raises an alert for every timer that finishes
pub async fn completion_alert_task(state: Arc<AppState>) {
    info!("Starting completion alert task");

    let mut completion_rx = state.subscribe_completions();

    loop {
        match completion_rx.recv().await {
            Ok(timer) => {
                info!(
                    "ALERT: timer '{}' is done ({} elapsed)",
                    timer.label,
                    format_duration(timer.duration)
                );
            }
            Err(RecvError::Lagged(missed)) => {
                warn!("Completion alerts lagged, {} alerts dropped", missed);
            }
            Err(RecvError::Closed) => {
                error!("Completion channel closed, stopping alert task");
                break;
            }
        }
    }
}
