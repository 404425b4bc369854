use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Serialize, Serializer};

/// A player's mark. "X" always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// Assignment order for fresh joins.
    pub const ALL: [Symbol; 2] = [Symbol::X, Symbol::O];

    pub fn other(self) -> Symbol {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::X => "X",
            Symbol::O => "O",
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Completion record of one big cell. Once set it never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BigCellState {
    Won(Symbol),
    Draw,
}

impl BigCellState {
    /// The symbol that may extend a big-board line through this cell.
    /// A drawn cell belongs to nobody.
    pub fn winner(self) -> Option<Symbol> {
        match self {
            BigCellState::Won(symbol) => Some(symbol),
            BigCellState::Draw => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BigCellState::Won(symbol) => symbol.as_str(),
            BigCellState::Draw => "draw",
        }
    }
}

// Wire form: "X" | "O" | "draw"
impl Serialize for BigCellState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
