//! A game room: one [`Game`] and the connections watching it.
//!
//! The room never touches sockets. Every request returns the
//! [`Delivery`] actions the transport must carry out, which keeps the
//! routing rules (who sees what) testable without a network.

use std::collections::BTreeSet;

use derive_getters::Getters;
use kotodama_core::{Game, Phase, PlayerId, validate_word};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::protocol::{
    AttackRequest, ChatKind, ChatMessage, ChatRequest, ClientEvent, JoinRequest, ServerEvent,
};

/// Greeting sent to every new connection.
pub const GREETING: &str = "Connected to Game Server";

/// Notice broadcast after a reset.
pub const RESET_NOTICE: &str = "Game has been reset. Returning to lobby.";

/// Log line broadcast when a game starts.
pub const START_NOTICE: &str = "Game Started!";

const CANNOT_START: &str = "Cannot start game (needs 2+ players or already started)";
const CANNOT_JOIN: &str = "Game already started or join failed";

/// Where an outbound event must go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Only to this connection.
    To {
        /// Recipient connection.
        target: PlayerId,
        /// Event to send.
        event: ServerEvent,
    },
    /// To every connection in the room.
    Broadcast(ServerEvent),
}

impl Delivery {
    fn to(target: &PlayerId, event: ServerEvent) -> Self {
        Self::To {
            target: target.clone(),
            event,
        }
    }
}

/// Per-room settings taken from the server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomSettings {
    /// Maximum characters kept from a text chat message.
    pub chat_max_len: usize,
}

impl Default for RoomSettings {
    fn default() -> Self {
        Self { chat_max_len: 100 }
    }
}

/// Summary of a room for the lobby listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomSummary {
    /// Room id.
    pub id: String,
    /// Joined players.
    pub players: usize,
    /// Open connections.
    pub connections: usize,
    /// Lifecycle phase.
    pub phase: Phase,
}

/// One running game and its audience.
#[derive(Debug, Getters)]
pub struct Room {
    /// Room id.
    id: String,
    /// Authoritative game state.
    game: Game,
    /// Open connections, joined or not.
    connections: BTreeSet<PlayerId>,
    /// Room settings.
    settings: RoomSettings,
}

impl Room {
    /// Creates a room with an empty lobby.
    #[instrument]
    pub fn new(id: String, settings: RoomSettings) -> Self {
        info!(room = %id, "Creating room");
        Self {
            id,
            game: Game::new(),
            connections: BTreeSet::new(),
            settings,
        }
    }

    /// Registers a connection and greets it.
    #[instrument(skip(self), fields(room = %self.id))]
    pub fn connect(&mut self, conn: &PlayerId) -> Vec<Delivery> {
        info!(%conn, "Client connected");
        self.connections.insert(conn.clone());
        vec![Delivery::to(
            conn,
            ServerEvent::Message {
                data: GREETING.to_string(),
            },
        )]
    }

    /// Forgets a connection. A joined player stays in the game.
    #[instrument(skip(self), fields(room = %self.id))]
    pub fn disconnect(&mut self, conn: &PlayerId) {
        info!(%conn, "Client disconnected");
        self.connections.remove(conn);
    }

    /// Decodes a raw frame and handles it.
    #[instrument(skip(self, frame), fields(room = %self.id))]
    pub fn handle_frame(&mut self, from: &PlayerId, frame: &str) -> Vec<Delivery> {
        match serde_json::from_str::<ClientEvent>(frame) {
            Ok(event) => self.handle(from, event),
            Err(e) => {
                warn!(%from, error = %e, "Malformed frame");
                vec![Delivery::to(
                    from,
                    ServerEvent::error(format!("Malformed request: {}", e)),
                )]
            }
        }
    }

    /// Applies a request from `from` and returns what to send.
    #[instrument(skip(self, event), fields(room = %self.id))]
    pub fn handle(&mut self, from: &PlayerId, event: ClientEvent) -> Vec<Delivery> {
        debug!(?event, "Handling event");
        match event {
            ClientEvent::JoinGame(req) => self.join(from, req),
            ClientEvent::RequestStartGame => self.start(from),
            ClientEvent::RequestResetGame => self.reset(),
            ClientEvent::Attack(req) => self.attack(from, req),
            ClientEvent::SendChat(req) => self.chat(from, req),
        }
    }

    fn join(&mut self, from: &PlayerId, req: JoinRequest) -> Vec<Delivery> {
        if let Err(e) = validate_word(&req.word) {
            warn!(%from, error = %e, "Rejected word");
            return vec![Delivery::to(from, ServerEvent::error(e.to_string()))];
        }

        let name = req.name.unwrap_or_else(|| from.guest_name());

        match self.game.add_player(from.clone(), name, req.word) {
            Ok(()) => self.state_updates(),
            Err(e) => {
                warn!(%from, error = %e, "Join rejected");
                vec![Delivery::to(from, ServerEvent::error(CANNOT_JOIN))]
            }
        }
    }

    fn start(&mut self, from: &PlayerId) -> Vec<Delivery> {
        match self.game.start_game() {
            Ok(()) => {
                let mut out = vec![Delivery::Broadcast(ServerEvent::log(START_NOTICE))];
                out.extend(self.state_updates());
                out
            }
            Err(e) => {
                warn!(%from, error = %e, "Start rejected");
                vec![Delivery::to(from, ServerEvent::error(CANNOT_START))]
            }
        }
    }

    fn reset(&mut self) -> Vec<Delivery> {
        self.game.reset();
        vec![Delivery::Broadcast(ServerEvent::GameReset {
            message: RESET_NOTICE.to_string(),
        })]
    }

    fn attack(&mut self, from: &PlayerId, req: AttackRequest) -> Vec<Delivery> {
        if !kotodama_core::is_valid_word_format(&req.ch) {
            warn!(%from, ch = %req.ch, "Rejected attack character");
            return vec![Delivery::to(from, ServerEvent::error("Invalid char"))];
        }

        match self.game.attack(from, &req.ch) {
            Ok(outcome) => {
                let verdict = if outcome.hit { "HIT" } else { "MISS" };
                let line = format!("Attack '{}' by {}: {}", req.ch, from.short(), verdict);
                info!(
                    %from,
                    ch = %outcome.ch,
                    hit = outcome.hit,
                    game_over = outcome.game_over,
                    "Attack resolved"
                );
                let mut out = self.state_updates();
                out.push(Delivery::Broadcast(ServerEvent::log(line)));
                out
            }
            Err(e) => {
                warn!(%from, error = %e, kind = %e.kind(), "Attack rejected");
                vec![Delivery::to(from, ServerEvent::error(e.to_string()))]
            }
        }
    }

    fn chat(&self, from: &PlayerId, req: ChatRequest) -> Vec<Delivery> {
        let name = self
            .game
            .player(from)
            .map(|p| p.name().clone())
            .unwrap_or_else(|| from.guest_name());

        let message = match req.kind {
            ChatKind::Text => req.message.chars().take(self.settings.chat_max_len).collect(),
            ChatKind::Stamp => req.message,
        };

        vec![Delivery::Broadcast(ServerEvent::NewChat(ChatMessage {
            uid: from.clone(),
            name,
            message,
            kind: req.kind,
        }))]
    }

    /// One masked snapshot per joined player.
    fn state_updates(&self) -> Vec<Delivery> {
        self.game
            .players()
            .map(|p| {
                let view = self.game.view_for(p.id());
                Delivery::to(p.id(), ServerEvent::UpdateState(view))
            })
            .collect()
    }

    /// Lobby listing entry for this room.
    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            players: self.game.player_count(),
            connections: self.connections.len(),
            phase: self.game.phase(),
        }
    }
}
