//! First-class invariants for ultimate tic-tac-toe.
//!
//! Invariants are logical properties that must hold after every mutation.
//! They are checked in debug builds by the move contract and are testable
//! on their own.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_new::new)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    #[new(into)]
    pub description: String,
}

/// A set of invariants checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

pub mod active_sub_board;
pub mod alternating_turn;
pub mod cached_outcome;
pub mod monotonic_board;

pub use active_sub_board::ActiveSubBoardInvariant;
pub use alternating_turn::AlternatingTurnInvariant;
pub use cached_outcome::CachedOutcomeInvariant;
pub use monotonic_board::MonotonicBoardInvariant;

/// All board invariants as a composable set.
pub type UltimateInvariants = (
    MonotonicBoardInvariant,
    AlternatingTurnInvariant,
    ActiveSubBoardInvariant,
    CachedOutcomeInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mark, Position, UltimateBoard};

    #[test]
    fn test_invariant_set_holds_for_new_board() {
        let board = UltimateBoard::new(Mark::X);
        assert!(UltimateInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut board = UltimateBoard::new(Mark::O);
        board
            .apply_move(Mark::O, Position::Center, Position::TopLeft)
            .unwrap();
        board
            .apply_move(Mark::X, Position::TopLeft, Position::Center)
            .unwrap();
        assert!(UltimateInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut board = UltimateBoard::new(Mark::X);
        board
            .apply_move(Mark::X, Position::Center, Position::Center)
            .unwrap();
        // Wrong turn and an unrecorded mark at once.
        board.current_turn = Mark::X;
        board.meta.place(Position::Center, Position::TopLeft, Mark::O);
        let violations = UltimateInvariants::check_all(&board).unwrap_err();
        assert!(violations.len() >= 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        let board = UltimateBoard::new(Mark::X);
        type TwoInvariants = (MonotonicBoardInvariant, AlternatingTurnInvariant);
        assert!(TwoInvariants::check_all(&board).is_ok());
    }
}
