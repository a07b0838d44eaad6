//! Ordered record of guessed characters.

use std::collections::HashSet;

/// Characters guessed so far, in first-guessed order, without repeats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedChars {
    order: Vec<char>,
    seen: HashSet<char>,
}

impl UsedChars {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `ch`. Returns false if it was already present.
    pub fn insert(&mut self, ch: char) -> bool {
        if !self.seen.insert(ch) {
            return false;
        }
        self.order.push(ch);
        true
    }

    /// Whether `ch` was guessed before.
    pub fn contains(&self, ch: char) -> bool {
        self.seen.contains(&ch)
    }

    /// Guessed characters in first-guessed order.
    pub fn as_slice(&self) -> &[char] {
        &self.order
    }

    /// Number of distinct guesses.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True before the first guess.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
