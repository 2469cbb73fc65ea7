//! The ultimate tic-tac-toe game-state machine.

use crate::contracts::{Contract, MoveContract};
use crate::{
    BoardSnapshot, GameOutcome, Mark, MetaBoard, Move, MoveResult, Outcome, Position,
    RejectionKind, ResignRejection, RestoreError,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// A complete ultimate tic-tac-toe game.
///
/// Owns all state and changes only through [`apply_move`](Self::apply_move)
/// and [`resign`](Self::resign). A rejected call leaves the value unchanged.
///
/// Deserializing replays the stored history, so a stored board whose
/// fields disagree with its moves is refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord")]
pub struct UltimateBoard {
    pub(crate) meta: MetaBoard,
    pub(crate) current_turn: Mark,
    pub(crate) active_sub_board: Option<Position>,
    pub(crate) outcome: GameOutcome,
    first_mover: Mark,
    history: Vec<Move>,
}

impl UltimateBoard {
    /// Creates an empty board with `first_mover` to play anywhere.
    #[instrument]
    pub fn new(first_mover: Mark) -> Self {
        Self {
            meta: MetaBoard::new(),
            current_turn: first_mover,
            active_sub_board: None,
            outcome: GameOutcome::Undecided,
            first_mover,
            history: Vec::new(),
        }
    }

    /// Returns the meta-board.
    pub fn meta(&self) -> &MetaBoard {
        &self.meta
    }

    /// Returns the mark to move.
    pub fn current_turn(&self) -> Mark {
        self.current_turn
    }

    /// Returns the sub-board the mover is confined to, if any.
    pub fn active_sub_board(&self) -> Option<Position> {
        self.active_sub_board
    }

    /// Returns the game outcome.
    pub fn outcome(&self) -> GameOutcome {
        self.outcome
    }

    /// Returns the mark that moved first.
    pub fn first_mover(&self) -> Mark {
        self.first_mover
    }

    /// Returns accepted moves in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Places `mark` at `cell` of `sub_board`.
    ///
    /// Legality is checked in order: game over, turn, active sub-board,
    /// closed sub-board, occupied cell. After placement the sub-board and
    /// meta outcomes are rescanned; if the game continues, the opponent is
    /// sent to the sub-board named by `cell` (or gets free choice when that
    /// sub-board is closed) and the turn passes.
    ///
    /// # Errors
    ///
    /// Returns the first failing [`RejectionKind`]; nothing is mutated.
    #[instrument(skip(self), fields(turn = %self.current_turn, active = ?self.active_sub_board))]
    pub fn apply_move(
        &mut self,
        mark: Mark,
        sub_board: Position,
        cell: Position,
    ) -> Result<MoveResult, RejectionKind> {
        let action = Move::new(mark, sub_board, cell);

        if let Err(rejection) = MoveContract::pre(self, &action) {
            warn!(%action, %rejection, "Move rejected");
            return Err(rejection);
        }

        #[cfg(debug_assertions)]
        let before = self.clone();

        let sub_board_outcome = self.meta.place(sub_board, cell, mark);
        self.history.push(action);
        if sub_board_outcome.is_decided() {
            info!(%sub_board, outcome = %sub_board_outcome, "Sub-board decided");
        }

        match self.meta.outcome() {
            Outcome::WonBy(winner) => {
                self.outcome = GameOutcome::WonBy(winner);
                self.active_sub_board = None;
                info!(%winner, moves = self.history.len(), "Game won");
            }
            Outcome::Drawn => {
                self.outcome = GameOutcome::Drawn;
                self.active_sub_board = None;
                info!(moves = self.history.len(), "Game drawn");
            }
            Outcome::Undecided => {
                self.active_sub_board = self.meta.sub_board(cell).is_open().then_some(cell);
                self.current_turn = mark.opponent();
                debug!(next = %self.current_turn, active = ?self.active_sub_board, "Turn passed");
            }
        }

        #[cfg(debug_assertions)]
        {
            let post = MoveContract::post(&before, self);
            debug_assert!(post.is_ok(), "Move postcondition failed: {post:?}");
        }

        Ok(MoveResult {
            placed: action,
            sub_board_outcome,
            active_sub_board: self.active_sub_board,
            current_turn: self.current_turn,
            game_outcome: self.outcome,
        })
    }

    /// Concedes the game for `mark`.
    ///
    /// # Errors
    ///
    /// Returns [`ResignRejection::GameAlreadyOver`] once the game has ended.
    #[instrument(skip(self))]
    pub fn resign(&mut self, mark: Mark) -> Result<GameOutcome, ResignRejection> {
        if self.outcome.is_over() {
            warn!(outcome = %self.outcome, "Resignation after game end");
            return Err(ResignRejection::GameAlreadyOver);
        }

        self.outcome = GameOutcome::Forfeited(mark);
        self.active_sub_board = None;
        info!(%mark, "Player resigned");
        Ok(self.outcome)
    }

    /// Every `(sub_board, cell)` the current mover may play.
    ///
    /// Empty once the game is over.
    pub fn legal_moves(&self) -> Vec<(Position, Position)> {
        if self.outcome.is_over() {
            return Vec::new();
        }

        let targets = match self.active_sub_board {
            Some(active) => vec![active],
            None => Position::ALL
                .into_iter()
                .filter(|pos| self.meta.sub_board(*pos).is_open())
                .collect(),
        };

        targets
            .into_iter()
            .flat_map(|sub| {
                self.meta
                    .sub_board(sub)
                    .empty_cells()
                    .map(move |cell| (sub, cell))
            })
            .collect()
    }

    /// Read-only view of the whole game.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from(self)
    }

    /// Rebuilds a board by applying `moves` in order.
    ///
    /// # Errors
    ///
    /// Returns the rejection of the first illegal move.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(first_mover: Mark, moves: &[Move]) -> Result<Self, RejectionKind> {
        let mut board = Self::new(first_mover);
        for mov in moves {
            board.apply_move(mov.mark, mov.sub_board, mov.cell)?;
        }
        debug!(outcome = %board.outcome, "Replay complete");
        Ok(board)
    }
}

/// Serialized form of [`UltimateBoard`], checked before use.
#[derive(Deserialize)]
struct BoardRecord {
    meta: MetaBoard,
    current_turn: Mark,
    active_sub_board: Option<Position>,
    outcome: GameOutcome,
    first_mover: Mark,
    history: Vec<Move>,
}

impl TryFrom<BoardRecord> for UltimateBoard {
    type Error = RestoreError;

    #[instrument(skip(record), fields(count = record.history.len()))]
    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        let mut board = Self::new(record.first_mover);
        for (index, mov) in record.history.iter().enumerate() {
            board
                .apply_move(mov.mark, mov.sub_board, mov.cell)
                .map_err(|kind| RestoreError::IllegalMove { index, kind })?;
        }
        if let GameOutcome::Forfeited(mark) = record.outcome {
            board
                .resign(mark)
                .map_err(|_| RestoreError::IllegalResignation)?;
        }

        let stored = Self {
            meta: record.meta,
            current_turn: record.current_turn,
            active_sub_board: record.active_sub_board,
            outcome: record.outcome,
            first_mover: record.first_mover,
            history: record.history,
        };
        if stored != board {
            warn!("Stored board disagrees with its history");
            return Err(RestoreError::StateMismatch);
        }
        Ok(board)
    }
}
