//! First-class move types and the rejection taxonomy.
//!
//! Moves are domain events: a mark placed at a cell of a sub-board. Every
//! rejection is a final verdict on one call and leaves the board untouched.

use crate::{GameOutcome, Mark, Outcome, Position};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A mark placed at `cell` inside `sub_board`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark being placed.
    pub mark: Mark,
    /// The sub-board played in.
    pub sub_board: Position,
    /// The cell played within the sub-board.
    pub cell: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} -> {} / {}",
            self.mark,
            self.sub_board.label(),
            self.cell.label()
        )
    }
}

/// Why a move was refused. Checked in declaration order.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionKind {
    /// The game already has a terminal outcome.
    #[display("Game is already over")]
    GameAlreadyOver,
    /// The mover is not the player whose turn it is.
    #[display("It is not your turn")]
    NotYourTurn,
    /// The move targets a sub-board other than the active one.
    #[display("You must play in the active sub-board")]
    WrongSubBoard,
    /// The chosen sub-board has already been won or drawn.
    #[display("That sub-board is already finished")]
    SubBoardClosed,
    /// The chosen cell already holds a mark.
    #[display("That cell is already occupied")]
    CellOccupied,
}

/// Why a resignation was refused.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResignRejection {
    /// The game already has a terminal outcome.
    #[display("Game is already over")]
    GameAlreadyOver,
    /// The resigning player is not in this game.
    #[display("You are not playing in this game")]
    NotAParticipant,
}

/// Why a game could not be started.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StartError {
    /// Both player identifiers are the same.
    #[display("You can't challenge yourself")]
    SelfChallenge,
    /// The pair already has a live game.
    #[display("A game between these players is already in progress")]
    AlreadyPlaying,
}

/// Why a stored board could not be restored.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum RestoreError {
    /// A move in the recorded history is illegal at its point in the game.
    #[display("Recorded move {index} is illegal: {kind}")]
    IllegalMove {
        /// Position of the move in the history.
        index: usize,
        /// Why the move was refused.
        kind: RejectionKind,
    },
    /// The recorded forfeit cannot follow the recorded history.
    #[display("Recorded resignation comes after the game ended")]
    IllegalResignation,
    /// Stored state disagrees with what the history produces.
    #[display("Recorded state does not match its move history")]
    StateMismatch,
}

/// State after an accepted move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// The move that was applied.
    pub placed: Move,
    /// Outcome of the sub-board played in, after the placement.
    pub sub_board_outcome: Outcome,
    /// Where the next move must go; `None` means free choice (or game over).
    pub active_sub_board: Option<Position>,
    /// Mark to move next. Unchanged when the move ended the game.
    pub current_turn: Mark,
    /// Game outcome after the placement.
    pub game_outcome: GameOutcome,
}
