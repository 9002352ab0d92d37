use std::fmt;
use std::str::FromStr;

use super::types::Mark;

pub const BOARD_SIZE: usize = 9;
pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    OutOfBounds { index: usize },
    CellOccupied { index: usize, mark: Mark },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfBounds { index } => {
                write!(f, "Cell {} is out of bounds (0..{})", index, BOARD_SIZE)
            }
            MoveError::CellOccupied { index, mark } => {
                write!(f, "Cell {} is already marked with {}", index, mark)
            }
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    WrongCellCount { found: usize },
    UnknownSymbol { symbol: char },
}

impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardParseError::WrongCellCount { found } => {
                write!(f, "Expected {} cells, found {}", BOARD_SIZE, found)
            }
            BoardParseError::UnknownSymbol { symbol } => {
                write!(f, "Unknown cell symbol '{}'", symbol)
            }
        }
    }
}

impl std::error::Error for BoardParseError {}

/// A 3x3 board stored row-major:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
///
/// `Board` is `Copy`, so speculative moves are made on a copy via [`Board::with_mark`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Option<Mark>; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Option<Mark>; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<Mark>; BOARD_SIZE] {
        &self.cells
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_empty(&self, index: usize) -> bool {
        index < BOARD_SIZE && self.cells[index].is_none()
    }

    /// Marks an empty cell. Occupied cells are never overwritten.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), MoveError> {
        if index >= BOARD_SIZE {
            return Err(MoveError::OutOfBounds { index });
        }
        if let Some(existing) = self.cells[index] {
            return Err(MoveError::CellOccupied { index, mark: existing });
        }
        self.cells[index] = Some(mark);
        Ok(())
    }

    /// Returns a copy with `mark` at `index`, leaving `self` untouched.
    /// Same checks as [`Board::place`].
    pub fn with_mark(&self, index: usize, mark: Mark) -> Result<Board, MoveError> {
        let mut next = *self;
        next.place(index, mark)?;
        Ok(next)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

pub fn get_available_moves(board: &Board) -> Vec<usize> {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_none())
        .map(|(index, _)| index)
        .collect()
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if symbols.len() != BOARD_SIZE {
            return Err(BoardParseError::WrongCellCount {
                found: symbols.len(),
            });
        }

        let mut cells = [None; BOARD_SIZE];
        for (cell, symbol) in cells.iter_mut().zip(symbols) {
            *cell = match symbol {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '_' | '-' => None,
                other => return Err(BoardParseError::UnknownSymbol { symbol: other }),
            };
        }
        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in chunk {
                let symbol = cell.map(|mark| mark.symbol()).unwrap_or('.');
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}
