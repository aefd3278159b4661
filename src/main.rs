//! Kitchen Timers - countdown timers for cooking, with time detection
//!
//! This is the main entry point for the kitchen-timers server.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use kitchen_timers::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::completion_alert_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("kitchen_timers={},tower_http=info", config.log_level()))
        .init();

    info!("Starting kitchen-timers server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.alert_buffer));

    // Announce finished timers
    let alert_state = Arc::clone(&state);
    tokio::spawn(async move {
        completion_alert_task(alert_state).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /timers            - List timers");
    info!("  POST   /timers            - Add a timer");
    info!("  GET    /timers/:id        - Show a timer");
    info!("  POST   /timers/:id/start  - Start or resume a timer");
    info!("  POST   /timers/:id/pause  - Pause a timer");
    info!("  POST   /timers/:id/toggle - Pause or resume a timer");
    info!("  POST   /timers/:id/reset  - Reset a timer");
    info!("  DELETE /timers/:id        - Delete a timer");
    info!("  POST   /detect            - Suggest timers from instruction text");
    info!("  GET    /status            - Server status");
    info!("  GET    /health            - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Failed to listen for shutdown signals: {}", e),
            }
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
