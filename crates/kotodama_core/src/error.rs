//! Error types for game operations.
//!
//! Each operation on [`Game`](crate::Game) has its own error enum so callers
//! match on exactly the failures that operation can produce. All of them
//! classify into an [`ErrorKind`].

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// Broad classification of a rejected request.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIs,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The payload itself is malformed (bad word, bad character).
    Validation,
    /// The payload is fine but the game is in the wrong phase for it.
    Precondition,
}

/// Error returned by [`Game::add_player`](crate::Game::add_player).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum JoinError {
    /// Joining closes once the game starts.
    #[display("Game already started")]
    AlreadyStarted,
}

impl JoinError {
    /// Returns the error classification.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Precondition
    }
}

/// Error returned by [`Game::start_game`](crate::Game::start_game).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum StartError {
    /// The game is already running or finished.
    #[display("Game already started")]
    AlreadyStarted,
    /// Fewer than two players have joined.
    #[display("Need at least 2 players to start (have {})", joined)]
    NotEnoughPlayers {
        /// Number of players currently in the lobby.
        joined: usize,
    },
}

impl StartError {
    /// Returns the error classification.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Precondition
    }
}

/// Error returned by [`Game::attack`](crate::Game::attack).
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum AttackError {
    /// No game is running yet.
    #[display("Game has not started yet")]
    NotStarted,
    /// The game already has a result.
    #[display("Game is over")]
    GameOver,
    /// Someone else holds the turn.
    #[display("Not your turn")]
    NotYourTurn,
    /// The guess does not normalize to exactly one character.
    #[display("Invalid char")]
    InvalidChar,
}

impl AttackError {
    /// Returns the error classification.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AttackError::InvalidChar => ErrorKind::Validation,
            AttackError::NotStarted | AttackError::GameOver | AttackError::NotYourTurn => {
                ErrorKind::Precondition
            }
        }
    }
}
