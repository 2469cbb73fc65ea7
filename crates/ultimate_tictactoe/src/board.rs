//! Two-level board storage: nine sub-boards under one meta-board.
//!
//! Outcomes are cached on each level and recomputed from a full rescan after
//! every placement. At nine slots per level a rescan is trivially cheap.

use crate::rules::evaluate_lines;
use crate::{Cell, Mark, Outcome, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// An ordinary 3x3 tic-tac-toe board inside the grid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubBoard {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
    /// Cached outcome of `cells`.
    outcome: Outcome,
}

impl SubBoard {
    /// Creates an empty, undecided sub-board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the cell at the given position.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Returns the cached outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Checks whether at least one cell is still empty.
    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(|c| c.is_empty())
    }

    /// A sub-board is open while undecided with room left to play.
    pub fn is_open(&self) -> bool {
        self.outcome == Outcome::Undecided && self.has_empty_cell()
    }

    /// Positions of the empty cells, in index order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(|pos| self.cell(*pos).is_empty())
    }

    /// The cells as line-evaluation slots.
    pub fn slots(&self) -> [Option<Mark>; 9] {
        self.cells.map(Cell::mark)
    }

    /// Recomputes the outcome from the cells.
    pub fn evaluate(&self) -> Outcome {
        evaluate_lines(&self.slots())
    }

    /// Writes a mark and refreshes the cached outcome.
    ///
    /// Callers check emptiness and openness first; the outcome never moves
    /// off a decided value.
    pub(crate) fn place(&mut self, pos: Position, mark: Mark) -> Outcome {
        debug_assert!(self.cell(pos).is_empty(), "cell {pos} written twice");
        self.cells[pos.to_index()] = Cell::Occupied(mark);
        if self.outcome == Outcome::Undecided {
            self.outcome = self.evaluate();
        }
        self.outcome
    }
}

/// The 3x3 arrangement of sub-boards, itself played like tic-tac-toe.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MetaBoard {
    /// Sub-boards in row-major order (0-8).
    sub_boards: [SubBoard; 9],
    /// Cached outcome over the sub-board outcomes.
    outcome: Outcome,
}

impl MetaBoard {
    /// Creates a meta-board of nine empty sub-boards.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the sub-board at the given position.
    pub fn sub_board(&self, pos: Position) -> &SubBoard {
        &self.sub_boards[pos.to_index()]
    }

    /// Returns all sub-boards.
    pub fn sub_boards(&self) -> &[SubBoard; 9] {
        &self.sub_boards
    }

    /// Returns the cached meta outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Sub-board outcomes as meta slots: a won sub-board counts as the
    /// winner's mark, undecided and drawn sub-boards as empty.
    pub fn slots(&self) -> [Option<Mark>; 9] {
        std::array::from_fn(|i| self.sub_boards[i].outcome().winner())
    }

    /// Checks whether every sub-board has been decided.
    pub fn all_decided(&self) -> bool {
        self.sub_boards.iter().all(|sb| sb.outcome().is_decided())
    }

    /// Recomputes the meta outcome from the sub-board outcomes.
    ///
    /// A meta line wins; failing that, the meta-board is drawn once all nine
    /// sub-boards are decided.
    pub fn evaluate(&self) -> Outcome {
        match evaluate_lines(&self.slots()) {
            Outcome::WonBy(mark) => Outcome::WonBy(mark),
            _ if self.all_decided() => Outcome::Drawn,
            _ => Outcome::Undecided,
        }
    }

    /// Writes a mark into a sub-board and refreshes both cached outcomes.
    ///
    /// Returns the target sub-board's outcome after placement.
    #[instrument(level = "debug", skip(self))]
    pub(crate) fn place(&mut self, sub_board: Position, cell: Position, mark: Mark) -> Outcome {
        let sub_outcome = self.sub_boards[sub_board.to_index()].place(cell, mark);
        if self.outcome == Outcome::Undecided {
            self.outcome = self.evaluate();
        }
        debug!(?sub_outcome, meta_outcome = ?self.outcome, "Outcomes refreshed");
        sub_outcome
    }
}
