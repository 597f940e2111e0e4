//! Watch-party CLI client.
//!
//! Connects to a watch-party backend: register or log in, browse or create
//! rooms, then join one to chat and keep playback synchronized with the
//! other viewers.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin client
//! cargo run --bin client -- --api-url http://127.0.0.1:8080/api/v1 --ws-url ws://127.0.0.1:8080/ws
//! ```

use clap::Parser;

use watch_party_rs::client::{ClientOptions, run_client};
use watch_party_rs::common::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "client")]
#[command(about = "Watch-party client with synchronized playback and chat", long_about = None)]
struct Args {
    /// Base URL of the backend HTTP API
    #[arg(short = 'a', long, default_value = "http://127.0.0.1:8080/api/v1")]
    api_url: String,

    /// URL of the real-time channel
    #[arg(short = 'w', long, default_value = "ws://127.0.0.1:8080/ws")]
    ws_url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = run_client(ClientOptions {
        api_url: args.api_url,
        ws_url: args.ws_url,
    })
    .await
    {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
