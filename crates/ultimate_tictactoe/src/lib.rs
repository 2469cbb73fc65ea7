//! Ultimate tic-tac-toe game logic.
//!
//! A 3x3 grid of 3x3 sub-boards: the cell played inside a sub-board decides
//! which sub-board the opponent must play in next. This crate holds the
//! game-state machine and a registry of live games keyed by player pair.
//! It performs no I/O; presentation layers call in and render what comes
//! back.
//!
//! # Architecture
//!
//! - **Board**: [`UltimateBoard`] owns a [`MetaBoard`] of nine [`SubBoard`]s
//! - **Rules**: one line evaluator shared by both levels
//! - **Contracts**: ordered legality checks and debug-build postconditions
//! - **Session**: [`SessionRegistry`] and per-game [`GameHandle`]s
//!
//! # Example
//!
//! ```
//! use ultimate_tictactoe::{Position, RejectionKind, SessionRegistry};
//!
//! let registry = SessionRegistry::new();
//! let game = registry.start_game("ann", "bob").unwrap();
//!
//! let result = game
//!     .apply_move(&"ann", Position::Center, Position::TopLeft)
//!     .unwrap();
//! assert_eq!(result.active_sub_board, Some(Position::TopLeft));
//!
//! // Bob is sent to the top-left sub-board.
//! assert_eq!(
//!     game.apply_move(&"bob", Position::Center, Position::Center),
//!     Err(RejectionKind::WrongSubBoard)
//! );
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod config;
pub mod contracts;
mod game;
pub mod invariants;
mod position;
pub mod rules;
mod session;
mod snapshot;
mod types;

pub use action::{Move, MoveResult, RejectionKind, ResignRejection, RestoreError, StartError};
pub use board::{MetaBoard, SubBoard};
pub use config::{ConfigError, EngineConfig, FirstMoverPolicy};
pub use game::UltimateBoard;
pub use position::{ParsePositionError, Position};
pub use session::{GameHandle, PairKey, PlayerId, ResignResult, SessionRegistry};
pub use snapshot::BoardSnapshot;
pub use types::{Cell, GameOutcome, Mark, Outcome};
