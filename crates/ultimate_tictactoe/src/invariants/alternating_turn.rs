//! Alternating turn invariant.

use super::Invariant;
use crate::{GameOutcome, UltimateBoard};

/// Invariant: marks alternate, starting with the first mover.
///
/// `current_turn` is the opponent of the last mover while the game continues
/// (a resignation does not move the turn) and stays with the last mover once
/// a move has won or drawn the game.
pub struct AlternatingTurnInvariant;

impl Invariant<UltimateBoard> for AlternatingTurnInvariant {
    fn holds(board: &UltimateBoard) -> bool {
        let history = board.history();

        let Some(last) = history.last() else {
            return board.current_turn() == board.first_mover();
        };

        if history[0].mark != board.first_mover() {
            return false;
        }

        if history.windows(2).any(|w| w[0].mark == w[1].mark) {
            return false;
        }

        let expected = match board.outcome() {
            GameOutcome::WonBy(_) | GameOutcome::Drawn => last.mark,
            GameOutcome::Undecided | GameOutcome::Forfeited(_) => last.mark.opponent(),
        };
        board.current_turn() == expected
    }

    fn description() -> &'static str {
        "Marks alternate starting with the first mover"
    }
}
