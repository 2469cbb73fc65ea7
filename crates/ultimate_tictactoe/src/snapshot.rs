//! Read-only view of a game for presentation layers.

use crate::{Cell, GameOutcome, Mark, Outcome, Position, UltimateBoard};
use serde::{Deserialize, Serialize};

/// Everything a renderer needs, copied out of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// `cells[sub_board][cell]`, both indexed 0-8 row-major.
    pub cells: [[Cell; 9]; 9],
    /// Outcome of each sub-board.
    pub sub_board_outcomes: [Outcome; 9],
    /// Sub-board the mover is confined to; `None` means free choice.
    pub active_sub_board: Option<Position>,
    /// Mark to move.
    pub current_turn: Mark,
    /// Game outcome.
    pub game_outcome: GameOutcome,
    /// Number of accepted moves.
    pub move_count: usize,
}

impl BoardSnapshot {
    /// Gets a cell by sub-board and cell position.
    pub fn cell(&self, sub_board: Position, cell: Position) -> Cell {
        self.cells[sub_board.to_index()][cell.to_index()]
    }
}

impl From<&UltimateBoard> for BoardSnapshot {
    fn from(board: &UltimateBoard) -> Self {
        let subs = board.meta().sub_boards();
        Self {
            cells: std::array::from_fn(|i| *subs[i].cells()),
            sub_board_outcomes: std::array::from_fn(|i| subs[i].outcome()),
            active_sub_board: board.active_sub_board(),
            current_turn: board.current_turn(),
            game_outcome: board.outcome(),
            move_count: board.history().len(),
        }
    }
}

/// Plain-text 9x9 grid with a status line, for logs and debugging.
impl std::fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..9 {
            if row > 0 && row % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..9 {
                if col > 0 && col % 3 == 0 {
                    write!(f, " |")?;
                }
                let sub = (row / 3) * 3 + col / 3;
                let cell = (row % 3) * 3 + col % 3;
                let symbol = match self.cells[sub][cell] {
                    Cell::Empty => '.',
                    Cell::Occupied(Mark::X) => 'X',
                    Cell::Occupied(Mark::O) => 'O',
                };
                if col == 0 {
                    write!(f, "{symbol}")?;
                } else {
                    write!(f, " {symbol}")?;
                }
            }
            writeln!(f)?;
        }

        match (self.game_outcome, self.active_sub_board) {
            (GameOutcome::Undecided, Some(active)) => {
                write!(f, "{} to move in {}", self.current_turn, active)
            }
            (GameOutcome::Undecided, None) => {
                write!(f, "{} to move in any open sub-board", self.current_turn)
            }
            (outcome, _) => write!(f, "{outcome}"),
        }
    }
}
