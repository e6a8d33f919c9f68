//! Terminal client for Gameroom.
//!
//! Connects to the game server, reads commands from the prompt and shows
//! game events as they arrive. The player name is remembered between runs.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin gameroom-client
//! cargo run --bin gameroom-client -- --url ws://127.0.0.1:8080/ws
//! ```

use std::path::PathBuf;

use clap::Parser;

use gameroom_client::{ClientConfig, DEFAULT_SERVER_URL, run_client};
use gameroom_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "gameroom-client")]
#[command(about = "Terminal client for a turn-based multiplayer game", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = DEFAULT_SERVER_URL)]
    url: String,

    /// Preference file (defaults to the platform config directory)
    #[arg(short = 'p', long)]
    preferences: Option<PathBuf>,
}

impl From<Args> for ClientConfig {
    fn from(args: Args) -> Self {
        let config = ClientConfig::new(args.url);
        match args.preferences {
            Some(path) => config.with_preferences_path(path),
            None => config,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    if let Err(e) = run_client(args.into()).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
