//! WebSocket chat server with broadcast and exchange-rate reporting.
//!
//! Receives messages from clients and broadcasts them to all connected
//! clients; the `exchange <codes> <days>` chat command additionally
//! broadcasts an aggregated rate report.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::path::PathBuf;

use clap::Parser;
use kawase::{
    common::logger::setup_logger,
    exchange::api::DEFAULT_RATE_API_URL,
    server::runner::{ServerConfig, run_server},
};

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Chat server with exchange-rate broadcasting", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Upstream exchange-rate endpoint, templated by a DD.MM.YYYY suffix
    #[arg(long, default_value = DEFAULT_RATE_API_URL)]
    rate_api_url: String,

    /// File receiving one JSON line per served exchange request
    #[arg(long, default_value = "exchange.log")]
    history_file: PathBuf,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        rate_api_url: args.rate_api_url,
        history_file: args.history_file,
    };

    if let Err(e) = run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
