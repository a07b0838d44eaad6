//! Wire protocol between browsers and the game server.
//!
//! Every frame is a JSON object `{"event": <name>, "data": <payload>}`.
//! Inbound frames decode into [`ClientEvent`], outbound frames encode from
//! [`ServerEvent`].

use kotodama_core::{GameView, PlayerId};
use serde::{Deserialize, Serialize};

/// Payload of a `join_game` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    /// Display name; a guest name is derived from the connection id if absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Secret word.
    #[serde(default)]
    pub word: String,
}

/// Payload of an `attack` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackRequest {
    /// Guessed character, before normalization.
    #[serde(default, rename = "char")]
    pub ch: String,
}

/// Kind of chat message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatKind {
    /// Free text, length-limited.
    #[default]
    Text,
    /// Stamp identifier, passed through as is.
    Stamp,
}

/// Payload of a `send_chat` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Message body or stamp identifier.
    #[serde(default)]
    pub message: String,
    /// Text or stamp.
    #[serde(default, rename = "type")]
    pub kind: ChatKind,
}

/// A request from a connected browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Register a word and join the lobby.
    JoinGame(JoinRequest),
    /// Start the game.
    RequestStartGame,
    /// Return everyone to an empty lobby.
    RequestResetGame,
    /// Guess a character.
    Attack(AttackRequest),
    /// Say something to the room.
    SendChat(ChatRequest),
}

/// A chat line relayed to the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Sender's connection id.
    pub uid: PlayerId,
    /// Sender's player name, or guest name before joining.
    pub name: String,
    /// Clamped body or stamp identifier.
    pub message: String,
    /// Text or stamp.
    #[serde(rename = "type")]
    pub kind: ChatKind,
}

/// A message pushed to a connected browser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Greeting sent on connect.
    Message {
        /// Greeting text.
        data: String,
    },
    /// The recipient's masked view of the game.
    UpdateState(GameView),
    /// A request from the recipient was rejected.
    Error {
        /// Human-readable reason.
        message: String,
    },
    /// Game log line for the whole room.
    Log {
        /// Log text.
        message: String,
    },
    /// The game was reset to an empty lobby.
    GameReset {
        /// Notice text.
        message: String,
    },
    /// A chat line.
    NewChat(ChatMessage),
}

impl ServerEvent {
    /// Builds an error event.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Builds a log event.
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log {
            message: message.into(),
        }
    }
}
