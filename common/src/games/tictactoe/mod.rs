mod board;
mod bot_controller;
mod game_state;
mod types;
mod win_detector;

pub use board::{
    BOARD_SIZE, Board, BoardParseError, CENTER, CORNERS, MoveError, get_available_moves,
};
pub use bot_controller::{
    BotInput, calculate_move, get_best_move, get_best_move_with_tier, move_to_index,
};
pub use game_state::{COMPUTER_MARK, GameError, Scores, TicTacToeGameState};
pub use types::{GameMode, GameStatus, Mark, MoveTier, WinningLine};
pub use win_detector::{LINES, check_draw, check_win, check_win_with_line};
