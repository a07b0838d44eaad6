//! Kana normalization and word validation.
//!
//! Every comparison in the game happens in a reduced alphabet: katakana
//! folds into hiragana, voicing marks are dropped and small kana grow to
//! their full-size form. `ガッコウ`, `がっこう` and `かつこう` all compare
//! equal after [`normalize`].

use derive_more::{Display, Error};
use tracing::instrument;

use crate::error::ErrorKind;

/// Distance between a hiragana codepoint and its katakana counterpart.
const KANA_OFFSET: u32 = 0x60;

/// Long-vowel mark, allowed in words and never normalized away.
pub const LONG_VOWEL_MARK: char = 'ー';

const HIRAGANA_START: char = '\u{3041}';
const HIRAGANA_END: char = '\u{3096}';
const KATAKANA_START: char = '\u{30A1}';
const KATAKANA_END: char = '\u{30F6}';

/// Last hiragana accepted in a player's word (`ん`).
const WORD_HIRAGANA_END: char = '\u{3093}';

/// Katakana folding table: voiced and semi-voiced forms map to their base,
/// small forms map to full size.
const KATAKANA_FOLDS: &[(char, char)] = &[
    ('ガ', 'カ'),
    ('ギ', 'キ'),
    ('グ', 'ク'),
    ('ゲ', 'ケ'),
    ('ゴ', 'コ'),
    ('ザ', 'サ'),
    ('ジ', 'シ'),
    ('ズ', 'ス'),
    ('ゼ', 'セ'),
    ('ゾ', 'ソ'),
    ('ダ', 'タ'),
    ('ヂ', 'チ'),
    ('ヅ', 'ツ'),
    ('デ', 'テ'),
    ('ド', 'ト'),
    ('バ', 'ハ'),
    ('ビ', 'ヒ'),
    ('ブ', 'フ'),
    ('ベ', 'ヘ'),
    ('ボ', 'ホ'),
    ('パ', 'ハ'),
    ('ピ', 'ヒ'),
    ('プ', 'フ'),
    ('ペ', 'ヘ'),
    ('ポ', 'ホ'),
    ('ヴ', 'ウ'),
    ('ァ', 'ア'),
    ('ィ', 'イ'),
    ('ゥ', 'ウ'),
    ('ェ', 'エ'),
    ('ォ', 'オ'),
    ('ッ', 'ツ'),
    ('ャ', 'ヤ'),
    ('ュ', 'ユ'),
    ('ョ', 'ヨ'),
    ('ヮ', 'ワ'),
    ('ヵ', 'カ'),
    ('ヶ', 'ケ'),
];

fn shift(c: char, up: bool) -> char {
    let code = if up {
        c as u32 + KANA_OFFSET
    } else {
        c as u32 - KANA_OFFSET
    };
    char::from_u32(code).unwrap_or(c)
}

fn to_katakana(c: char) -> char {
    if (HIRAGANA_START..=HIRAGANA_END).contains(&c) {
        shift(c, true)
    } else {
        c
    }
}

fn to_hiragana(c: char) -> char {
    if (KATAKANA_START..=KATAKANA_END).contains(&c) {
        shift(c, false)
    } else {
        c
    }
}

fn fold(c: char) -> char {
    KATAKANA_FOLDS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
        .unwrap_or(c)
}

/// Folds a single character into the comparison alphabet.
pub fn normalize_char(c: char) -> char {
    to_hiragana(fold(to_katakana(c)))
}

/// Canonicalizes `text` into the comparison alphabet.
///
/// Characters outside the kana blocks (the long-vowel mark, the padding
/// symbol, Latin letters) pass through untouched. The function is total
/// and idempotent.
pub fn normalize(text: &str) -> String {
    text.chars().map(normalize_char).collect()
}

fn is_word_char(c: char) -> bool {
    (HIRAGANA_START..=WORD_HIRAGANA_END).contains(&c)
        || (KATAKANA_START..=KATAKANA_END).contains(&c)
        || c == LONG_VOWEL_MARK
}

/// Returns true when `text` is non-empty and uses only hiragana, katakana
/// and the long-vowel mark.
pub fn is_valid_word_format(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_word_char)
}

/// Why a word or attack character was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum WordError {
    /// Nothing was entered.
    #[display("Word is required")]
    Empty,
    /// A character falls outside the kana alphabet.
    #[display("Words may only use hiragana, katakana and the long-vowel mark (found {:?})", found)]
    InvalidCharacter {
        /// First offending character.
        found: char,
    },
}

impl WordError {
    /// Word errors are always validation failures.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Checks `text` against the word alphabet, reporting the first failure.
#[instrument]
pub fn validate_word(text: &str) -> Result<(), WordError> {
    if text.is_empty() {
        return Err(WordError::Empty);
    }
    match text.chars().find(|c| !is_word_char(*c)) {
        Some(found) => Err(WordError::InvalidCharacter { found }),
        None => Ok(()),
    }
}
