use crate::games::SessionRng;
use super::board::{Board, CENTER, CORNERS, get_available_moves};
use super::game_state::TicTacToeGameState;
use super::types::{Mark, MoveTier};
use super::win_detector::check_win;

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
}

impl BotInput {
    pub fn from_game_state(state: &TicTacToeGameState) -> Self {
        Self {
            board: state.board,
            current_mark: state.current_mark,
        }
    }
}

pub fn calculate_move(input: &BotInput, rng: &mut SessionRng) -> Option<(usize, MoveTier)> {
    get_best_move_with_tier(&input.board, input.current_mark, rng)
}

/// Picks the computer's next cell, or `None` when the board is full.
///
/// Rules are tried in order and the first one that yields a cell wins:
/// complete own line, block the opponent's line, take the center, take a
/// random free corner, take any random free cell. This is a heuristic and
/// does not look further ahead than one move.
pub fn get_best_move(board: &Board, computer_mark: Mark, rng: &mut SessionRng) -> Option<usize> {
    get_best_move_with_tier(board, computer_mark, rng).map(|(index, _)| index)
}

pub fn get_best_move_with_tier(
    board: &Board,
    computer_mark: Mark,
    rng: &mut SessionRng,
) -> Option<(usize, MoveTier)> {
    let human_mark = computer_mark.opponent();
    let available_moves = get_available_moves(board);

    if available_moves.is_empty() {
        return None;
    }

    if let Some(index) = find_winning_move(board, computer_mark, &available_moves) {
        return Some((index, MoveTier::Win));
    }

    if let Some(index) = find_winning_move(board, human_mark, &available_moves) {
        return Some((index, MoveTier::Block));
    }

    if board.is_empty(CENTER) {
        return Some((CENTER, MoveTier::Center));
    }

    let free_corners: Vec<usize> = CORNERS
        .iter()
        .copied()
        .filter(|&index| board.is_empty(index))
        .collect();
    if let Some(index) = rng.choose(&free_corners) {
        return Some((index, MoveTier::Corner));
    }

    rng.choose(&available_moves).map(|index| (index, MoveTier::Any))
}

/// Integer form of a move for callers that expect `-1` as no-move.
pub fn move_to_index(mv: Option<usize>) -> i32 {
    mv.map(|index| index as i32).unwrap_or(-1)
}

fn find_winning_move(board: &Board, mark: Mark, moves: &[usize]) -> Option<usize> {
    moves
        .iter()
        .copied()
        .find(|&index| {
            board
                .with_mark(index, mark)
                .is_ok_and(|next| check_win(&next) == Some(mark))
        })
}
