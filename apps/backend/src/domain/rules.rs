use crate::domain::engine::Line;

/// Players per room; one per symbol.
pub const PLAYERS: usize = 2;

/// Cells per small board, and small boards per big board.
pub const CELLS: usize = 9;

/// The 8 standard 3-in-a-row lines over a 3×3 grid indexed 0..=8 row-major.
pub const LINES: [Line; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Validate a client-supplied board index (big or small) and narrow it.
pub fn board_index(raw: i64) -> Option<u8> {
    if (0..CELLS as i64).contains(&raw) {
        Some(raw as u8)
    } else {
        None
    }
}
