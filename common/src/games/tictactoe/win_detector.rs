use super::board::Board;
use super::types::{Mark, WinningLine};

/// Rows top to bottom, then columns left to right, then both diagonals.
/// The first complete line in this order is the one reported.
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn check_win_with_line(board: &Board) -> Option<WinningLine> {
    for line in LINES {
        let [a, b, c] = line;
        if let Some(mark) = board.get(a)
            && board.get(b) == Some(mark)
            && board.get(c) == Some(mark)
        {
            return Some(WinningLine::new(mark, line));
        }
    }
    None
}

pub fn check_win(board: &Board) -> Option<Mark> {
    check_win_with_line(board).map(|line| line.mark)
}

/// True when no empty cell remains. Does not look for a winner, so check
/// [`check_win_with_line`] first.
pub fn check_draw(board: &Board) -> bool {
    board.is_full()
}
