//! Per-viewer snapshots of a game.
//!
//! Each connected player must receive their own snapshot: it shows their
//! own word in full and hides the unrevealed tiles of everyone else.
//! Sharing one snapshot between viewers would leak secret words.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::game::Game;
use crate::player::{BOARD_SIZE, Player, PlayerId};

/// Placeholder shown for a hidden tile.
pub const MASK_CHAR: char = '*';

/// One player's board as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    /// Player id.
    pub uid: PlayerId,
    /// Display name.
    pub name: String,
    /// Tiles, masked where the viewer may not see them.
    pub display_word: [char; BOARD_SIZE],
    /// Still in the game.
    pub is_alive: bool,
    /// Holds the turn.
    pub is_turn: bool,
}

/// The whole game as seen by a particular viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameView {
    /// Boards in join order.
    pub players: Vec<PlayerView>,
    /// Who is attacking, once the game has started.
    pub turn_player_uid: Option<PlayerId>,
    /// Guessed characters in first-guessed order.
    pub used_chars: Vec<char>,
    /// Turns have begun.
    pub game_started: bool,
    /// A result has been decided.
    pub game_over: bool,
    /// Winner's name or `"Draw"`.
    pub winner: Option<String>,
}

fn mask_board(player: &Player, reveal_all: bool) -> [char; BOARD_SIZE] {
    let mut display = *player.normalized_word();
    if reveal_all {
        return display;
    }
    for (index, tile) in display.iter_mut().enumerate() {
        if !player.is_opened(index) {
            *tile = MASK_CHAR;
        }
    }
    display
}

impl Game {
    /// Builds the snapshot `viewer` is allowed to see.
    ///
    /// Eliminated players are shown in full to everyone.
    #[instrument(skip(self), fields(viewer = %viewer))]
    pub fn view_for(&self, viewer: &PlayerId) -> GameView {
        let turn_player = if self.is_started() {
            self.current_player_id()
        } else {
            None
        };

        let players = self
            .players()
            .map(|player| {
                let reveal_all = player.id() == viewer || !*player.is_alive();
                PlayerView {
                    uid: player.id().clone(),
                    name: player.name().clone(),
                    display_word: mask_board(player, reveal_all),
                    is_alive: *player.is_alive(),
                    is_turn: turn_player == Some(player.id()),
                }
            })
            .collect();

        GameView {
            players,
            turn_player_uid: turn_player.cloned(),
            used_chars: self.used_chars().as_slice().to_vec(),
            game_started: self.is_started(),
            game_over: self.is_over(),
            winner: self.winner().map(ToString::to_string),
        }
    }
}
