use serde::Serialize;

use crate::domain::engine::{
    big_board_outcome, small_board_outcome, Completions, Outcome, SmallBoard,
};
use crate::domain::rules::CELLS;
use crate::domain::symbol::{BigCellState, Symbol};

/// Wire form of one written cell: `[big, small, symbol]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardEntry(pub u8, pub u8, pub Symbol);

/// Wire form of one completed big cell: `{big, winner}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinishedField {
    pub big: u8,
    pub winner: BigCellState,
}

/// What writing one mark changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Outcome of the small board that received the mark.
    pub small_outcome: Outcome,
    /// Whether that outcome was recorded as a new big-cell completion.
    pub newly_completed: bool,
    /// Outcome of the big board after the write.
    pub big_outcome: Outcome,
}

/// Nine small boards plus the big-cell completion record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UltimateBoard {
    cells: [SmallBoard; CELLS],
    completions: Completions,
}

impl Default for UltimateBoard {
    fn default() -> Self {
        Self::empty()
    }
}

impl UltimateBoard {
    pub fn empty() -> Self {
        Self {
            cells: [[None; CELLS]; CELLS],
            completions: [None; CELLS],
        }
    }

    pub fn cell(&self, big: u8, small: u8) -> Option<Symbol> {
        self.cells[big as usize][small as usize]
    }

    pub fn small_board(&self, big: u8) -> &SmallBoard {
        &self.cells[big as usize]
    }

    pub fn completion(&self, big: u8) -> Option<BigCellState> {
        self.completions[big as usize]
    }

    pub fn completions(&self) -> &Completions {
        &self.completions
    }

    pub fn is_closed(&self, big: u8) -> bool {
        self.completions[big as usize].is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }

    /// Write `symbol` into an empty cell of an open big cell and re-evaluate.
    ///
    /// Callers validate the target first; a closed big cell or a taken cell
    /// here is a coordinator bug.
    pub fn place(&mut self, big: u8, small: u8, symbol: Symbol) -> Placement {
        debug_assert!(!self.is_closed(big), "big cell {big} already complete");
        debug_assert!(self.cell(big, small).is_none(), "cell {big}/{small} taken");

        self.cells[big as usize][small as usize] = Some(symbol);

        let small_outcome = small_board_outcome(&self.cells[big as usize]);
        let mut newly_completed = false;
        if self.completions[big as usize].is_none() {
            if let Some(state) = small_outcome.as_completion() {
                self.completions[big as usize] = Some(state);
                newly_completed = true;
            }
        }

        Placement {
            small_outcome,
            newly_completed,
            big_outcome: big_board_outcome(&self.completions),
        }
    }

    /// Sparse `[big, small, symbol]` triples in board order.
    pub fn entries(&self) -> Vec<BoardEntry> {
        let mut out = Vec::new();
        for (big, board) in self.cells.iter().enumerate() {
            for (small, mark) in board.iter().enumerate() {
                if let Some(symbol) = mark {
                    out.push(BoardEntry(big as u8, small as u8, *symbol));
                }
            }
        }
        out
    }

    pub fn finished_fields(&self) -> Vec<FinishedField> {
        self.completions
            .iter()
            .enumerate()
            .filter_map(|(big, state)| {
                state.map(|winner| FinishedField {
                    big: big as u8,
                    winner,
                })
            })
            .collect()
    }
}
