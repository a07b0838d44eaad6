//! A single contestant and their secret word.

use std::collections::BTreeSet;
use std::fmt;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::text::normalize;

/// Number of tiles on every player's board.
pub const BOARD_SIZE: usize = 7;

/// Filler for boards whose word is shorter than [`BOARD_SIZE`].
pub const PADDING_CHAR: char = '×';

/// Opaque, stable identifier of a connected player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wraps a raw connection handle.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First four characters of the id, used in log lines and guest names.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(4) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }

    /// Display name for players who did not pick one.
    pub fn guest_name(&self) -> String {
        format!("Guest-{}", self.short())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A player's board: their normalized word and which tiles are face up.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Player {
    /// Stable identifier.
    id: PlayerId,
    /// Display name.
    name: String,
    /// Word exactly as submitted.
    raw_word: String,
    /// Normalized, truncated and padded word.
    normalized_word: [char; BOARD_SIZE],
    /// Tiles holding a real character.
    valid_char_count: usize,
    /// Revealed tile positions.
    opened_indices: BTreeSet<usize>,
    /// False once every real tile is revealed.
    is_alive: bool,
}

impl Player {
    /// Creates a player, fitting their word onto a [`BOARD_SIZE`] board.
    #[instrument(skip(raw_word), fields(player_id = %id))]
    pub fn new(id: PlayerId, name: String, raw_word: String) -> Self {
        let mut normalized_word = [PADDING_CHAR; BOARD_SIZE];
        for (slot, c) in normalized_word
            .iter_mut()
            .zip(normalize(&raw_word).chars())
        {
            *slot = c;
        }
        let valid_char_count = normalized_word
            .iter()
            .filter(|c| **c != PADDING_CHAR)
            .count();

        debug!(valid_char_count, "Player board prepared");

        Self {
            id,
            name,
            raw_word,
            normalized_word,
            valid_char_count,
            opened_indices: BTreeSet::new(),
            is_alive: true,
        }
    }

    /// Reveals every unopened tile showing `ch`.
    ///
    /// Returns true if at least one tile flipped. Revealing the last real
    /// tile eliminates the player.
    #[instrument(skip(self), fields(player_id = %self.id))]
    pub fn check_hit(&mut self, ch: char) -> bool {
        if !self.is_alive || ch == PADDING_CHAR {
            return false;
        }

        let mut hit = false;
        for (index, tile) in self.normalized_word.iter().enumerate() {
            if *tile == ch && self.opened_indices.insert(index) {
                hit = true;
            }
        }

        if hit && self.opened_valid_count() == self.valid_char_count {
            info!(name = %self.name, "Player eliminated");
            self.is_alive = false;
        }

        hit
    }

    /// Number of revealed tiles that hold a real character.
    pub fn opened_valid_count(&self) -> usize {
        self.opened_indices
            .iter()
            .filter(|i| self.normalized_word[**i] != PADDING_CHAR)
            .count()
    }

    /// Whether the tile at `index` has been revealed.
    pub fn is_opened(&self, index: usize) -> bool {
        self.opened_indices.contains(&index)
    }

    /// Normalized word as a string, padding included.
    pub fn board_string(&self) -> String {
        self.normalized_word.iter().collect()
    }
}
