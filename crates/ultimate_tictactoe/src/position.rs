//! Positions within a 3x3 grid.
//!
//! The same nine positions address cells inside a sub-board and sub-boards
//! inside the meta-board. The send rule relies on that: the cell just played
//! names the sub-board the opponent must play in next.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoEnumIterator;
use tracing::instrument;

/// A position on a 3x3 grid (index 0-8, row-major).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (index 0)
    TopLeft,
    /// Top-center (index 1)
    TopCenter,
    /// Top-right (index 2)
    TopRight,
    /// Middle-left (index 3)
    MiddleLeft,
    /// Center (index 4)
    Center,
    /// Middle-right (index 5)
    MiddleRight,
    /// Bottom-left (index 6)
    BottomLeft,
    /// Bottom-center (index 7)
    BottomCenter,
    /// Bottom-right (index 8)
    BottomRight,
}

impl Position {
    /// All 9 positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Label for display.
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Converts to a grid index (0-8).
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Creates a position from a grid index; `None` outside 0-8.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parses an index (`"4"`) or a label (`"center"`, case-insensitive).
    #[instrument]
    pub fn from_label_or_number(s: &str) -> Option<Position> {
        let trimmed = s.trim();
        if let Ok(num) = trimmed.parse::<usize>() {
            return Self::from_index(num);
        }

        let wanted = trimmed.to_lowercase();
        Position::iter().find(|pos| pos.label().to_lowercase() == wanted)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Input that names no position.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid position: {input:?} (expected 0-8 or a label such as \"center\")")]
pub struct ParsePositionError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label_or_number(s).ok_or_else(|| ParsePositionError {
            input: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_round_trip_matches_declaration_order() {
        for (i, pos) in Position::iter().enumerate() {
            assert_eq!(pos.to_index(), i);
            assert_eq!(Position::from_index(i), Some(pos));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_parse_number_and_label() {
        assert_eq!("4".parse::<Position>(), Ok(Position::Center));
        assert_eq!(" bottom-right ".parse::<Position>(), Ok(Position::BottomRight));
        assert_eq!("TOP-LEFT".parse::<Position>(), Ok(Position::TopLeft));
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        let err = "9".parse::<Position>().unwrap_err();
        assert_eq!(err.input, "9");
        assert!("middle".parse::<Position>().is_err());
    }
}
