//! Turn-based game state machine.
//!
//! A [`Game`] moves through three phases:
//!
//! ```text
//! Lobby ──start_game──▶ InProgress ──last survivor──▶ Finished
//!   ▲                                                    │
//!   └───────────────────────── reset ◀───────────────────┘
//! ```
//!
//! Players join in the lobby, then take turns guessing one kana at a time.
//! A guess flips matching tiles on every board, including the guesser's own.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::{AttackError, JoinError, StartError};
use crate::player::{Player, PlayerId};
use crate::text::normalize;
use crate::used_chars::UsedChars;

/// Bonus turns granted for consecutive hits.
pub const MAX_ATTACK_STREAK: u8 = 1;

/// Minimum number of players needed to start.
pub const MIN_PLAYERS: usize = 2;

/// Lifecycle phase of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Accepting players.
    Lobby,
    /// Turns are being played.
    InProgress,
    /// A winner or draw has been decided.
    Finished,
}

/// Result of a finished game.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Winner {
    /// The named player outlasted everyone.
    Player(String),
    /// The last players were eliminated by the same guess.
    Draw,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Player(name) => f.write_str(name),
            Winner::Draw => f.write_str("Draw"),
        }
    }
}

/// What happened when an attack resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// The guess after normalization.
    pub ch: char,
    /// At least one tile flipped somewhere.
    pub hit: bool,
    /// This attack decided the game.
    pub game_over: bool,
}

/// The authoritative state of one game.
#[derive(Debug, Clone, Default)]
pub struct Game {
    players: HashMap<PlayerId, Player>,
    turn_order: Vec<PlayerId>,
    current_turn_index: usize,
    attack_streak: u8,
    game_started: bool,
    game_over: bool,
    winner: Option<Winner>,
    used_chars: UsedChars,
}

impl Game {
    /// Creates an empty lobby.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards every player and all history, returning to the lobby.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(players = self.players.len(), "Resetting game");
        *self = Self::default();
    }

    /// Adds a player to the lobby, or replaces the word and name of a
    /// player who already joined under `id`.
    #[instrument(skip(self, raw_word), fields(player_id = %id))]
    pub fn add_player(
        &mut self,
        id: PlayerId,
        name: String,
        raw_word: String,
    ) -> Result<(), JoinError> {
        if self.game_started {
            warn!("Join rejected, game already started");
            return Err(JoinError::AlreadyStarted);
        }

        let player = Player::new(id.clone(), name, raw_word);
        if self.players.insert(id.clone(), player).is_some() {
            debug!("Replaced existing player entry");
        } else {
            self.turn_order.push(id);
        }

        info!(players = self.players.len(), "Player joined");
        Ok(())
    }

    /// Starts the game once at least [`MIN_PLAYERS`] have joined.
    #[instrument(skip(self))]
    pub fn start_game(&mut self) -> Result<(), StartError> {
        if self.players.len() < MIN_PLAYERS {
            warn!(joined = self.players.len(), "Not enough players to start");
            return Err(StartError::NotEnoughPlayers {
                joined: self.players.len(),
            });
        }
        if self.game_started {
            warn!("Start rejected, game already started");
            return Err(StartError::AlreadyStarted);
        }

        self.game_started = true;
        self.game_over = false;
        self.winner = None;
        info!(players = self.players.len(), "Game started");
        Ok(())
    }

    /// Resolves a guess of `ch` by `attacker`.
    ///
    /// Every living board is checked, the attacker's included. A hit lets
    /// the attacker go again, at most [`MAX_ATTACK_STREAK`] times in a row.
    #[instrument(skip(self), fields(attacker = %attacker))]
    pub fn attack(&mut self, attacker: &PlayerId, ch: &str) -> Result<AttackOutcome, AttackError> {
        if !self.game_started {
            return Err(AttackError::NotStarted);
        }
        if self.game_over {
            return Err(AttackError::GameOver);
        }
        if self.current_player_id() != Some(attacker) {
            warn!("Attack out of turn");
            return Err(AttackError::NotYourTurn);
        }

        let normalized = normalize(ch);
        let mut chars = normalized.chars();
        let ch = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(AttackError::InvalidChar),
        };

        self.used_chars.insert(ch);

        let mut hit = false;
        for player in self.players.values_mut() {
            if player.check_hit(ch) {
                hit = true;
            }
        }

        let alive: Vec<&Player> = self.players.values().filter(|p| *p.is_alive()).collect();
        if self.players.len() > 1 && alive.len() <= 1 {
            let winner = match alive.first() {
                Some(survivor) => Winner::Player(survivor.name().clone()),
                None => Winner::Draw,
            };
            info!(%winner, "Game over");
            self.game_over = true;
            self.winner = Some(winner);
            return Ok(AttackOutcome {
                ch,
                hit,
                game_over: true,
            });
        }

        if hit && self.attack_streak < MAX_ATTACK_STREAK {
            self.attack_streak += 1;
            debug!(streak = self.attack_streak, "Hit, attacker goes again");
        } else {
            self.next_turn();
        }

        Ok(AttackOutcome {
            ch,
            hit,
            game_over: false,
        })
    }

    /// Passes the turn to the next living player in join order.
    ///
    /// If nobody else is alive the scan stops where it began.
    #[instrument(skip(self))]
    pub fn next_turn(&mut self) {
        self.attack_streak = 0;
        if self.turn_order.is_empty() {
            return;
        }

        let start = self.current_turn_index;
        loop {
            self.current_turn_index = (self.current_turn_index + 1) % self.turn_order.len();
            let next = &self.turn_order[self.current_turn_index];
            if self.players.get(next).is_some_and(|p| *p.is_alive()) {
                break;
            }
            if self.current_turn_index == start {
                break;
            }
        }
        debug!(turn = %self.turn_order[self.current_turn_index], "Turn passed");
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        match (self.game_started, self.game_over) {
            (false, _) => Phase::Lobby,
            (true, false) => Phase::InProgress,
            (true, true) => Phase::Finished,
        }
    }

    /// Id of the player holding the turn, if anyone has joined.
    pub fn current_player_id(&self) -> Option<&PlayerId> {
        self.turn_order.get(self.current_turn_index)
    }

    /// Looks up a player by id.
    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.get(id)
    }

    /// Players in join order.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.turn_order.iter().filter_map(|id| self.players.get(id))
    }

    /// Number of joined players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Ids in turn order.
    pub fn turn_order(&self) -> &[PlayerId] {
        &self.turn_order
    }

    /// Consecutive hits by the current attacker.
    pub fn attack_streak(&self) -> u8 {
        self.attack_streak
    }

    /// Characters guessed so far.
    pub fn used_chars(&self) -> &UsedChars {
        &self.used_chars
    }

    /// Result of the game, once decided.
    pub fn winner(&self) -> Option<&Winner> {
        self.winner.as_ref()
    }

    /// Whether turns have begun.
    pub fn is_started(&self) -> bool {
        self.game_started
    }

    /// Whether a result has been decided.
    pub fn is_over(&self) -> bool {
        self.game_over
    }
}
