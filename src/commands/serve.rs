//! Serve command - Starts the HTTP server.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    // Initialize database
    let db = Arc::new(Database::connect(&config).await?);
    tracing::info!("Database connected");

    let sweep_interval = Duration::from_secs(config.session_sweep_interval_seconds);
    let addr = config.server_addr();

    let app_state = AppState::from_config(db, config)?;

    // Expired session cleanup runs for the lifetime of the server
    tokio::spawn(app_state.session_store.clone().sweep_expired(sweep_interval));

    // Build router
    let app = create_router(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
