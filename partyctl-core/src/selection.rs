//! Bounded move selection used while a member's moves are being edited

use crate::member::MAX_SELECTED_MOVES;

/// Ordered, duplicate-free set of at most [`MAX_SELECTED_MOVES`] move names.
///
/// Insertion order is kept: the committed selection is sent in the order the
/// moves were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveSelection {
    moves: Vec<String>,
}

impl MoveSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from an existing list, dropping duplicates and anything past the cap
    pub fn seeded<I, S>(moves: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self::new();
        for m in moves {
            selection.check(m);
        }
        selection
    }

    /// Add a move. Returns false (and changes nothing) when the move is
    /// already selected or the selection is full.
    pub fn check(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.is_full() || self.contains(&name) {
            return false;
        }
        self.moves.push(name);
        true
    }

    /// Remove a move. Returns false if it was not selected.
    pub fn uncheck(&mut self, name: &str) -> bool {
        match self.moves.iter().position(|m| m == name) {
            Some(idx) => {
                self.moves.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.moves.iter().any(|m| m == name)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.moves.len() >= MAX_SELECTED_MOVES
    }

    pub fn as_slice(&self) -> &[String] {
        &self.moves
    }

    pub fn into_vec(self) -> Vec<String> {
        self.moves
    }
}
