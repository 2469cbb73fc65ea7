//! Game rules for ultimate tic-tac-toe.
//!
//! Pure functions over nine slots, shared by the sub-board and meta-board
//! checks so both levels evaluate lines identically.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, evaluate_lines};
