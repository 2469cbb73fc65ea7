//! Contract-based validation for moves.
//!
//! Preconditions are the ordered legality checks; the first failing check
//! names the rejection. Postconditions are the board invariants plus the
//! before/after relations that a single invariant cannot see.

use crate::invariants::{InvariantSet, InvariantViolation, UltimateInvariants};
use crate::{Move, RejectionKind, UltimateBoard};
use tracing::instrument;

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Why an action is refused.
    type Rejection;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), Self::Rejection>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), Vec<InvariantViolation>>;
}

/// Precondition: the game has no terminal outcome yet.
pub struct GameInProgress;

impl GameInProgress {
    /// Rejects with `GameAlreadyOver` once the game has ended.
    pub fn check(_mov: &Move, board: &UltimateBoard) -> Result<(), RejectionKind> {
        if board.outcome().is_over() {
            Err(RejectionKind::GameAlreadyOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: it must be the mover's turn.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Rejects with `NotYourTurn` when the mark is not to move.
    pub fn check(mov: &Move, board: &UltimateBoard) -> Result<(), RejectionKind> {
        if mov.mark != board.current_turn() {
            Err(RejectionKind::NotYourTurn)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the move respects the active sub-board.
pub struct InActiveSubBoard;

impl InActiveSubBoard {
    /// Rejects with `WrongSubBoard` when another sub-board is active.
    pub fn check(mov: &Move, board: &UltimateBoard) -> Result<(), RejectionKind> {
        match board.active_sub_board() {
            Some(active) if active != mov.sub_board => Err(RejectionKind::WrongSubBoard),
            _ => Ok(()),
        }
    }
}

/// Precondition: the target sub-board is still undecided.
pub struct SubBoardOpen;

impl SubBoardOpen {
    /// Rejects with `SubBoardClosed` when the sub-board is won or drawn.
    pub fn check(mov: &Move, board: &UltimateBoard) -> Result<(), RejectionKind> {
        if board.meta().sub_board(mov.sub_board).outcome().is_decided() {
            Err(RejectionKind::SubBoardClosed)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Rejects with `CellOccupied` when the cell already holds a mark.
    pub fn check(mov: &Move, board: &UltimateBoard) -> Result<(), RejectionKind> {
        if board.meta().sub_board(mov.sub_board).cell(mov.cell).is_empty() {
            Ok(())
        } else {
            Err(RejectionKind::CellOccupied)
        }
    }
}

/// Composite precondition: all checks, in order.
pub struct LegalMove;

impl LegalMove {
    /// Validates all preconditions for a move.
    #[instrument(level = "debug", skip(board))]
    pub fn check(mov: &Move, board: &UltimateBoard) -> Result<(), RejectionKind> {
        GameInProgress::check(mov, board)?;
        PlayersTurn::check(mov, board)?;
        InActiveSubBoard::check(mov, board)?;
        SubBoardOpen::check(mov, board)?;
        CellIsEmpty::check(mov, board)?;
        Ok(())
    }
}

/// Contract for move application.
pub struct MoveContract;

impl Contract<UltimateBoard, Move> for MoveContract {
    type Rejection = RejectionKind;

    fn pre(board: &UltimateBoard, action: &Move) -> Result<(), RejectionKind> {
        LegalMove::check(action, board)
    }

    fn post(before: &UltimateBoard, after: &UltimateBoard) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match UltimateInvariants::check_all(after) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };

        if before.outcome().is_over() && before.outcome() != after.outcome() {
            violations.push(InvariantViolation::new("Game outcome reverted"));
        }

        let kept_marks = before
            .meta()
            .sub_boards()
            .iter()
            .zip(after.meta().sub_boards())
            .all(|(old, new)| {
                old.cells()
                    .iter()
                    .zip(new.cells())
                    .all(|(o, n)| o.is_empty() || o == n)
            });
        if !kept_marks {
            violations.push(InvariantViolation::new("Occupied cell was rewritten"));
        }

        if after.history().len() < before.history().len() {
            violations.push(InvariantViolation::new("Move history shrank"));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Position};

    #[test]
    fn test_precondition_passes_on_empty_board() {
        let board = UltimateBoard::new(Mark::X);
        let action = Move::new(Mark::X, Position::Center, Position::Center);
        assert!(MoveContract::pre(&board, &action).is_ok());
    }

    #[test]
    fn test_wrong_turn_checked_before_occupancy() {
        let mut board = UltimateBoard::new(Mark::X);
        board
            .apply_move(Mark::X, Position::Center, Position::Center)
            .unwrap();
        // X again at the same cell: both checks fail, turn is reported.
        let action = Move::new(Mark::X, Position::Center, Position::Center);
        assert_eq!(
            MoveContract::pre(&board, &action),
            Err(RejectionKind::NotYourTurn)
        );
    }

    #[test]
    fn test_wrong_sub_board_checked_before_occupancy() {
        let mut board = UltimateBoard::new(Mark::X);
        board
            .apply_move(Mark::X, Position::Center, Position::TopLeft)
            .unwrap();
        let action = Move::new(Mark::O, Position::Center, Position::Center);
        assert_eq!(
            MoveContract::pre(&board, &action),
            Err(RejectionKind::WrongSubBoard)
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = UltimateBoard::new(Mark::X);
        let mut after = before.clone();
        after
            .apply_move(Mark::X, Position::TopLeft, Position::BottomRight)
            .unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_rewrite() {
        let mut before = UltimateBoard::new(Mark::X);
        before
            .apply_move(Mark::X, Position::TopLeft, Position::BottomRight)
            .unwrap();
        let mut after = before.clone();
        after.meta = crate::MetaBoard::new();
        after
            .meta
            .place(Position::TopLeft, Position::BottomRight, Mark::O);
        assert!(MoveContract::post(&before, &after).is_err());
    }
}
