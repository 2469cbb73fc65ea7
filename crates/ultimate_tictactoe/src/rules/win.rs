//! Line evaluation for a 3x3 grid.

use super::draw::is_full;
use crate::{Mark, Outcome, Position};
use tracing::instrument;

/// The 8 winning lines: rows, then columns, then diagonals.
///
/// Enumeration order is the tie-break if more than one line could match.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Evaluates nine slots.
///
/// Returns `WonBy(mark)` for the first line holding three identical marks,
/// `Drawn` if no slot is empty and no line matched, and `Undecided` otherwise.
#[instrument(level = "trace")]
pub fn evaluate_lines(slots: &[Option<Mark>; 9]) -> Outcome {
    for [a, b, c] in LINES {
        let first = slots[a.to_index()];
        if let Some(mark) = first
            && slots[b.to_index()] == first
            && slots[c.to_index()] == first
        {
            return Outcome::WonBy(mark);
        }
    }

    if is_full(slots) {
        Outcome::Drawn
    } else {
        Outcome::Undecided
    }
}
