//! Server execution logic.

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::{
    common::time::SystemClock,
    exchange::{ExchangeService, PrivatBankClient, RateHistoryWriter},
};

use super::{
    handler::{health_check, websocket_handler},
    registry::ClientRegistry,
    signal::shutdown_signal,
    state::AppState,
};

/// Server configuration assembled by the binary's argument parser
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to (e.g. "127.0.0.1")
    pub host: String,
    /// Port number to bind to (e.g. 8080)
    pub port: u16,
    /// Upstream exchange-rate endpoint, templated by a DD.MM.YYYY suffix
    pub rate_api_url: String,
    /// File receiving one JSON line per served exchange request
    pub history_file: PathBuf,
}

/// Run the chat server until a shutdown signal arrives.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = Arc::new(PrivatBankClient::new(config.rate_api_url.clone()));
    let history = RateHistoryWriter::new(config.history_file.clone());
    let exchange = ExchangeService::new(source, history, Arc::new(SystemClock));

    let app_state = Arc::new(AppState {
        registry: ClientRegistry::new(),
        exchange,
    });

    let app = Router::new()
        .route("/ws", get(websocket_handler))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Chat server listening on {}", listener.local_addr()?);
    tracing::info!("Connect to: ws://{}/ws", bind_addr);
    tracing::info!("Press Ctrl+C to shutdown gracefully");

    // Graceful shutdown drains the connection tasks, so no fetch started
    // from a chat command outlives the server.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
