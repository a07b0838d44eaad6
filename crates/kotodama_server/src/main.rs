//! Kotodama - game server entry point.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use kotodama_server::{Cli, Command, ServerConfig};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(&config, host, port).await,
        Command::Normalize { words } => {
            run_normalize(&words);
            Ok(())
        }
    }
}

/// Run the WebSocket game server
async fn run_server(
    config_path: &std::path::Path,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let config = ServerConfig::load_or_default(config_path)?.with_overrides(host, port);
    initialize_tracing(config.log_filter());

    info!(
        config_path = %config_path.display(),
        default_room = %config.default_room(),
        "Starting kotodama server"
    );
    kotodama_server::serve(config).await
}

/// Print each word next to its normalized form
fn run_normalize(words: &[String]) {
    for word in words {
        let valid = if kotodama_core::is_valid_word_format(word) {
            ""
        } else {
            "  (not a valid word)"
        };
        println!("{} -> {}{}", word, kotodama_core::normalize(word), valid);
    }
}

fn initialize_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Tracing initialized");
}
