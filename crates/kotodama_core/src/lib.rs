//! Kotodama core - pure game logic for a kana word-elimination game.
//!
//! Every player hides a word of up to seven kana. Players take turns
//! guessing one character; a guess flips the matching tiles on every board.
//! A player whose tiles are all face up is eliminated, and the last player
//! standing wins.
//!
//! # Architecture
//!
//! - **Text**: kana normalization and word validation
//! - **Player**: one board and its elimination rule
//! - **Game**: membership, turn order, attacks, win and draw detection
//! - **View**: per-viewer masked snapshots for broadcast
//!
//! # Example
//!
//! ```
//! use kotodama_core::{Game, PlayerId};
//!
//! let mut game = Game::new();
//! let alice = PlayerId::new("alice");
//! let bob = PlayerId::new("bob");
//! game.add_player(alice.clone(), "Alice".into(), "ねこ".into()).unwrap();
//! game.add_player(bob.clone(), "Bob".into(), "いぬ".into()).unwrap();
//! game.start_game().unwrap();
//!
//! let outcome = game.attack(&alice, "ね").unwrap();
//! assert!(outcome.hit);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod game;
mod player;
mod text;
mod used_chars;
mod view;

pub use error::{AttackError, ErrorKind, JoinError, StartError};
pub use game::{AttackOutcome, Game, MAX_ATTACK_STREAK, MIN_PLAYERS, Phase, Winner};
pub use player::{BOARD_SIZE, PADDING_CHAR, Player, PlayerId};
pub use text::{
    LONG_VOWEL_MARK, WordError, is_valid_word_format, normalize, normalize_char, validate_word,
};
pub use used_chars::UsedChars;
pub use view::{GameView, MASK_CHAR, PlayerView};
