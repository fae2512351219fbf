//! Interactive chat client.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin client
//! cargo run --bin client -- --url ws://127.0.0.1:8080/ws
//! ```

use clap::Parser;
use kawase::{client::session::run_client_session, common::logger::setup_logger};

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Interactive chat client", long_about = None)]
struct Args {
    /// WebSocket URL of the chat server
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client_session(&args.url).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
