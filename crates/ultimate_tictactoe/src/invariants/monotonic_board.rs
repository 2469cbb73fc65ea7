//! Monotonic board invariant: cells never change once set.

use super::Invariant;
use crate::{MetaBoard, UltimateBoard};

/// Invariant: every cell is written at most once.
///
/// Replays the move history onto an empty meta-board, requiring each target
/// cell to be empty before it is written, and compares the result with the
/// live board.
pub struct MonotonicBoardInvariant;

impl Invariant<UltimateBoard> for MonotonicBoardInvariant {
    fn holds(board: &UltimateBoard) -> bool {
        let mut reconstructed = MetaBoard::new();

        for mov in board.history() {
            if !reconstructed
                .sub_board(mov.sub_board)
                .cell(mov.cell)
                .is_empty()
            {
                return false;
            }
            reconstructed.place(mov.sub_board, mov.cell, mov.mark);
        }

        reconstructed == *board.meta()
    }

    fn description() -> &'static str {
        "Cells are write-once and match the move history"
    }
}
