//! Ultimate board engine: pure outcome evaluation for the nested
//! 3×3-of-3×3 board. No state, no I/O.

use crate::domain::rules::{CELLS, LINES};
use crate::domain::symbol::{BigCellState, Symbol};

/// Three indices (0..=8) forming a winning line.
pub type Line = [u8; 3];

/// One small board: cell index → mark.
pub type SmallBoard = [Option<Symbol>; CELLS];

/// Big-cell completion record: big index → outcome of that small board.
pub type Completions = [Option<BigCellState>; CELLS];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win { symbol: Symbol, line: Line },
    Draw,
    Ongoing,
}

impl Outcome {
    pub fn is_decided(self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// The completion record this outcome produces for its big cell.
    pub fn as_completion(self) -> Option<BigCellState> {
        match self {
            Outcome::Win { symbol, .. } => Some(BigCellState::Won(symbol)),
            Outcome::Draw => Some(BigCellState::Draw),
            Outcome::Ongoing => None,
        }
    }
}

/// Evaluate a 3×3 grid: first line whose three cells hold the same winner
/// wins; otherwise a full grid is a draw.
fn grid_outcome<T: Copy>(
    grid: &[Option<T>; CELLS],
    owner: impl Fn(T) -> Option<Symbol>,
) -> Outcome {
    for line in LINES {
        let [a, b, c] = line.map(|i| grid[i as usize].and_then(&owner));
        if let (Some(a), Some(b), Some(c)) = (a, b, c) {
            if a == b && b == c {
                return Outcome::Win { symbol: a, line };
            }
        }
    }

    if grid.iter().all(Option::is_some) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

pub fn small_board_outcome(cells: &SmallBoard) -> Outcome {
    grid_outcome(cells, Some)
}

/// Same line patterns as a small board, but a drawn big cell never
/// extends a line. All nine cells completed with no line is a global draw.
pub fn big_board_outcome(completions: &Completions) -> Outcome {
    grid_outcome(completions, BigCellState::winner)
}

/// The big cell the next mover is forced into, or `None` for a free choice.
///
/// `target_big_state` is the completion record of the big cell whose index
/// equals `played_small`.
pub fn next_forced_cell(played_small: u8, target_big_state: Option<BigCellState>) -> Option<u8> {
    match target_big_state {
        Some(_) => None,
        None => Some(played_small),
    }
}
