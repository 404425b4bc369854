//! Domain layer: the Ultimate Tic-Tac-Toe board engine and board types.

pub mod board;
pub mod engine;
pub mod rules;
pub mod symbol;

#[cfg(test)]
pub(crate) mod test_prelude;

// Re-exports for ergonomics
pub use board::{BoardEntry, FinishedField, Placement, UltimateBoard};
pub use engine::{
    big_board_outcome, next_forced_cell, small_board_outcome, Completions, Line, Outcome,
    SmallBoard,
};
pub use symbol::{BigCellState, Symbol};
