//! Command-line interface for kotodama.

use clap::{Parser, Subcommand};

/// Kotodama - kana word-elimination game server
#[derive(Parser, Debug)]
#[command(name = "kotodama")]
#[command(about = "Multiplayer kana word-elimination game server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the WebSocket game server
    Serve {
        /// Path to the TOML config file (defaults apply if it doesn't exist)
        #[arg(short, long, default_value = "kotodama.toml")]
        config: std::path::PathBuf,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print how words normalize for comparison
    Normalize {
        /// Words to normalize
        #[arg(required = true)]
        words: Vec<String>,
    },
}
