//! Active sub-board invariant.

use super::Invariant;
use crate::UltimateBoard;

/// Invariant: an active sub-board is always open, and there is none once the
/// game is over.
pub struct ActiveSubBoardInvariant;

impl Invariant<UltimateBoard> for ActiveSubBoardInvariant {
    fn holds(board: &UltimateBoard) -> bool {
        match board.active_sub_board() {
            None => true,
            Some(_) if board.outcome().is_over() => false,
            Some(pos) => board.meta().sub_board(pos).is_open(),
        }
    }

    fn description() -> &'static str {
        "Active sub-board is undecided and has an empty cell"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Position};

    #[test]
    fn test_free_choice_holds() {
        assert!(ActiveSubBoardInvariant::holds(&UltimateBoard::new(Mark::X)));
    }

    #[test]
    fn test_sent_board_is_open() {
        let mut board = UltimateBoard::new(Mark::X);
        board
            .apply_move(Mark::X, Position::Center, Position::BottomLeft)
            .unwrap();
        assert_eq!(board.active_sub_board(), Some(Position::BottomLeft));
        assert!(ActiveSubBoardInvariant::holds(&board));
    }

    #[test]
    fn test_active_board_on_decided_sub_board_violates() {
        let mut board = UltimateBoard::new(Mark::X);
        for cell in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            board.meta.place(Position::Center, cell, Mark::O);
        }
        board.active_sub_board = Some(Position::Center);
        assert!(!ActiveSubBoardInvariant::holds(&board));
    }
}
