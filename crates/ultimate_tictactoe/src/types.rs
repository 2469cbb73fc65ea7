//! Core domain types for ultimate tic-tac-toe.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// A player's mark.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Mark X (always the first mover).
    #[display("X")]
    X,
    /// Mark O.
    #[display("O")]
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A single cell of a sub-board. Write-once: `Empty` becomes `Occupied` and stays so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Cell claimed by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }

    /// Checks if the cell is empty.
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Outcome of a sub-board or of the meta-board.
///
/// Monotonic: once `WonBy` or `Drawn`, it never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Still being played.
    #[default]
    Undecided,
    /// Three in a row for this mark.
    WonBy(Mark),
    /// Full with no line.
    Drawn,
}

impl Outcome {
    /// Returns true once the outcome is `WonBy` or `Drawn`.
    pub fn is_decided(self) -> bool {
        !matches!(self, Outcome::Undecided)
    }

    /// Returns the winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::WonBy(mark) => Some(mark),
            Outcome::Undecided | Outcome::Drawn => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Undecided => write!(f, "undecided"),
            Outcome::WonBy(mark) => write!(f, "won by {}", mark),
            Outcome::Drawn => write!(f, "drawn"),
        }
    }
}

/// Outcome of the whole game.
///
/// Transitions only from `Undecided` to one of the terminal variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Game is ongoing.
    #[default]
    Undecided,
    /// Meta-board line completed by this mark.
    WonBy(Mark),
    /// Every sub-board decided without a meta line.
    Drawn,
    /// This mark resigned; the opponent is the implied winner.
    Forfeited(Mark),
}

impl GameOutcome {
    /// Returns true if the game has reached a terminal outcome.
    pub fn is_over(self) -> bool {
        !matches!(self, GameOutcome::Undecided)
    }

    /// Returns the winning mark, counting a forfeit as a win for the opponent.
    pub fn winner(self) -> Option<Mark> {
        match self {
            GameOutcome::WonBy(mark) => Some(mark),
            GameOutcome::Forfeited(by) => Some(by.opponent()),
            GameOutcome::Undecided | GameOutcome::Drawn => None,
        }
    }
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOutcome::Undecided => write!(f, "In progress"),
            GameOutcome::WonBy(mark) => write!(f, "Player {} wins", mark),
            GameOutcome::Drawn => write!(f, "Draw"),
            GameOutcome::Forfeited(by) => {
                write!(f, "Player {} resigned, player {} wins", by, by.opponent())
            }
        }
    }
}
