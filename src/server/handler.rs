//! WebSocket connection handlers.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json,
    extract::{
        ConnectInfo, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::command::{Inbound, parse_line},
    exchange::formatter::REPORT_BANNER,
};

use super::{names, registry::ClientHandle, state::AppState};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, addr))
}

/// Per-connection session loop.
///
/// The socket is split into a receive half (reads and dispatches inbound
/// lines in arrival order) and a send half (drains this client's channel
/// into the socket). Whichever task finishes first aborts the other, and
/// the connection is unregistered exactly once afterwards, whatever
/// ended the loop.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, addr: SocketAddr) {
    let (mut sender, mut receiver) = socket.split();

    // Create a channel for this client to receive broadcast messages
    let (tx, mut rx) = mpsc::unbounded_channel();

    let name = names::generate();
    let id = state
        .registry
        .register(ClientHandle {
            name: name.clone(),
            addr,
            sender: tx,
        })
        .await;

    let state_clone = state.clone();
    let name_clone = name.clone();

    // Receive messages from this client and dispatch them one by one
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error for '{}': {}", name_clone, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    dispatch(&state_clone, &name_clone, text.as_str()).await;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Client '{}' requested close", name_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    // Drain this client's channel into the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.registry.unregister(id).await;
}

/// Handle one inbound line: relay it to everyone, then run the exchange
/// pipeline when the line is a recognized command.
async fn dispatch(state: &Arc<AppState>, name: &str, text: &str) {
    tracing::info!("Received text from '{}': {}", name, text);

    let inbound = parse_line(text);

    // Every line is relayed, command or not
    state.registry.broadcast(&chat_echo(name, text)).await;

    if let Inbound::Exchange(request) = inbound {
        tracing::info!("Exchange request from '{}': {:?}", name, request);
        let blocks = state.exchange.run(&request).await;

        state.registry.broadcast(REPORT_BANNER).await;
        for block in &blocks {
            state.registry.broadcast(block).await;
        }
        tracing::info!(
            "Exchange request from '{}' served ({} block(s))",
            name,
            blocks.len()
        );
    }
}

/// Broadcast form of a relayed chat line
pub fn chat_echo(name: &str, text: &str) -> String {
    format!("{}: {}", name, text)
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
