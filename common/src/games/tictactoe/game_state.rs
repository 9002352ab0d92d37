use std::fmt;

use crate::games::SessionRng;
use crate::log;
use super::board::{Board, MoveError};
use super::bot_controller::{BotInput, calculate_move};
use super::types::{GameMode, GameStatus, Mark, MoveTier, WinningLine};
use super::win_detector::{check_draw, check_win_with_line};

pub const COMPUTER_MARK: Mark = Mark::O;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    GameOver,
    NotYourTurn { current: Mark },
    NotComputerTurn,
    InvalidMove(MoveError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::GameOver => write!(f, "Game is already over"),
            GameError::NotYourTurn { current } => {
                write!(f, "Not your turn: waiting for computer ({})", current)
            }
            GameError::NotComputerTurn => write!(f, "It is not the computer's turn"),
            GameError::InvalidMove(e) => write!(f, "Invalid move: {}", e),
        }
    }
}

impl std::error::Error for GameError {}

impl From<MoveError> for GameError {
    fn from(e: MoveError) -> Self {
        GameError::InvalidMove(e)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    pub x: u32,
    pub o: u32,
}

impl Scores {
    pub fn get(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x,
            Mark::O => self.o,
        }
    }

    fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x += 1,
            Mark::O => self.o += 1,
        }
    }
}

/// Mutable state of one match: the board, whose turn it is, the mode and
/// the running score. X always opens a round. In player-vs-computer mode
/// the computer plays [`COMPUTER_MARK`].
#[derive(Debug)]
pub struct TicTacToeGameState {
    pub board: Board,
    pub mode: GameMode,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub scores: Scores,
}

impl TicTacToeGameState {
    pub fn new(mode: GameMode) -> Self {
        Self {
            board: Board::new(),
            mode,
            current_mark: Mark::X,
            status: GameStatus::Playing,
            scores: Scores::default(),
        }
    }

    pub fn is_computer_turn(&self) -> bool {
        self.mode == GameMode::PlayerVsComputer
            && self.current_mark == COMPUTER_MARK
            && self.status == GameStatus::Playing
    }

    /// Human input. Rejected once the round is over and, against the
    /// computer, while the computer is to move.
    pub fn place_mark(&mut self, index: usize) -> Result<GameStatus, GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }

        if self.mode == GameMode::PlayerVsComputer && self.current_mark == COMPUTER_MARK {
            return Err(GameError::NotYourTurn {
                current: self.current_mark,
            });
        }

        self.apply_move(index)
    }

    pub fn play_computer_turn(
        &mut self,
        rng: &mut SessionRng,
    ) -> Result<Option<(usize, MoveTier)>, GameError> {
        if !self.is_computer_turn() {
            return Err(GameError::NotComputerTurn);
        }

        let input = BotInput::from_game_state(self);
        let Some((index, tier)) = calculate_move(&input, rng) else {
            return Ok(None);
        };

        log!("Computer ({}) plays {} via {} rule", self.current_mark, index, tier);
        self.apply_move(index)?;
        Ok(Some((index, tier)))
    }

    /// Starts a new round with the same mode. Scores are kept.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_mark = Mark::X;
        self.status = GameStatus::Playing;
    }

    /// Switches mode, starting a fresh round and clearing the scores.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.scores = Scores::default();
        self.reset();
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        match self.status {
            GameStatus::Won(line) => Some(line),
            _ => None,
        }
    }

    fn apply_move(&mut self, index: usize) -> Result<GameStatus, GameError> {
        self.board.place(index, self.current_mark)?;

        self.check_game_over();

        if self.status == GameStatus::Playing {
            self.switch_turn();
        }

        Ok(self.status)
    }

    fn switch_turn(&mut self) {
        self.current_mark = self.current_mark.opponent();
    }

    fn check_game_over(&mut self) {
        if let Some(line) = check_win_with_line(&self.board) {
            self.status = GameStatus::Won(line);
            self.scores.record_win(line.mark);
            log!("{} wins on {:?}", line.mark, line.cells);
            return;
        }

        if check_draw(&self.board) {
            self.status = GameStatus::Draw;
            log!("Round ended in a draw");
        }
    }
}
