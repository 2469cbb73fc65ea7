//! Cached outcome invariant.

use super::Invariant;
use crate::{GameOutcome, Outcome, UltimateBoard};

/// Invariant: cached outcomes agree with a fresh rescan, and the game outcome
/// agrees with the meta outcome.
///
/// A forfeit may only happen while the meta-board is undecided.
pub struct CachedOutcomeInvariant;

impl Invariant<UltimateBoard> for CachedOutcomeInvariant {
    fn holds(board: &UltimateBoard) -> bool {
        let meta = board.meta();

        let subs_fresh = meta
            .sub_boards()
            .iter()
            .all(|sb| sb.outcome() == sb.evaluate());
        if !subs_fresh || meta.outcome() != meta.evaluate() {
            return false;
        }

        match (board.outcome(), meta.outcome()) {
            (GameOutcome::Undecided, Outcome::Undecided) => true,
            (GameOutcome::Forfeited(_), Outcome::Undecided) => true,
            (GameOutcome::WonBy(a), Outcome::WonBy(b)) => a == b,
            (GameOutcome::Drawn, Outcome::Drawn) => true,
            _ => false,
        }
    }

    fn description() -> &'static str {
        "Cached outcomes match a full rescan"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Position};

    #[test]
    fn test_new_board_holds() {
        assert!(CachedOutcomeInvariant::holds(&UltimateBoard::new(Mark::X)));
    }

    #[test]
    fn test_resigned_board_holds() {
        let mut board = UltimateBoard::new(Mark::X);
        board.resign(Mark::O).unwrap();
        assert!(CachedOutcomeInvariant::holds(&board));
    }

    #[test]
    fn test_outcome_without_meta_line_violates() {
        let mut board = UltimateBoard::new(Mark::X);
        board
            .apply_move(Mark::X, Position::Center, Position::Center)
            .unwrap();
        board.outcome = GameOutcome::WonBy(Mark::X);
        assert!(!CachedOutcomeInvariant::holds(&board));
    }
}
