//! Kotodama server library - WebSocket transport for the kana word game.
//!
//! # Architecture
//!
//! - **Protocol**: typed JSON events exchanged with browsers
//! - **Room**: one game plus its connections, returning deliveries (sans-IO)
//! - **RoomManager**: lock-guarded registry of rooms
//! - **Server**: axum routes and the per-socket read/write loop
//! - **Config**: TOML configuration with CLI overrides

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod manager;
mod protocol;
mod room;
mod server;

pub use cli::{Cli, Command};
pub use config::{ConfigError, ServerConfig};
pub use manager::{Outbox, RoomManager};
pub use protocol::{
    AttackRequest, ChatKind, ChatMessage, ChatRequest, ClientEvent, JoinRequest, ServerEvent,
};
pub use room::{Delivery, GREETING, RESET_NOTICE, Room, RoomSettings, RoomSummary, START_NOTICE};
pub use server::{AppState, router, serve};
