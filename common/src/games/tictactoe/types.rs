use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Mark,
    pub cells: [usize; 3],
}

impl WinningLine {
    pub fn new(mark: Mark, cells: [usize; 3]) -> Self {
        Self { mark, cells }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.cells.contains(&index)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    PlayerVsPlayer,
    PlayerVsComputer,
}

impl GameMode {
    pub fn toggled(&self) -> GameMode {
        match self {
            GameMode::PlayerVsPlayer => GameMode::PlayerVsComputer,
            GameMode::PlayerVsComputer => GameMode::PlayerVsPlayer,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won(WinningLine),
    Draw,
}

impl GameStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::Playing)
    }
}

/// Which rule of the move selector produced a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveTier {
    Win,
    Block,
    Center,
    Corner,
    Any,
}

impl fmt::Display for MoveTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveTier::Win => "win",
            MoveTier::Block => "block",
            MoveTier::Center => "center",
            MoveTier::Corner => "corner",
            MoveTier::Any => "any",
        };
        write!(f, "{}", name)
    }
}
