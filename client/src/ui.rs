use pixeltoe_common::games::tictactoe::{GameMode, GameStatus, Mark, TicTacToeGameState};

pub const HELP_TEXT: &str = "Commands: 0-8 place a mark, r new round, m switch mode, q quit";

pub fn render_board(state: &TicTacToeGameState) -> String {
    let winning_line = state.winning_line();
    let mut rows = Vec::with_capacity(3);

    for row in 0..3 {
        let cells: Vec<String> = (0..3)
            .map(|col| {
                let index = row * 3 + col;
                let symbol = match state.board.get(index) {
                    Some(mark) => mark.symbol(),
                    None => char::from_digit(index as u32, 10).unwrap_or(' '),
                };
                if winning_line.is_some_and(|line| line.contains(index)) {
                    format!("[{}]", symbol)
                } else {
                    format!(" {} ", symbol)
                }
            })
            .collect();
        rows.push(cells.join("|"));
    }

    rows.join("\n---+---+---\n")
}

pub fn status_message(state: &TicTacToeGameState) -> String {
    match state.status {
        GameStatus::Won(line) => format!("{} WINS!", line.mark),
        GameStatus::Draw => "IT'S A DRAW!".to_string(),
        GameStatus::Playing => format!("{}'S TURN", state.current_mark),
    }
}

pub fn score_line(state: &TicTacToeGameState) -> String {
    let opponent = match state.mode {
        GameMode::PlayerVsComputer => "CPU",
        GameMode::PlayerVsPlayer => "P2",
    };
    format!(
        "P1 (X): {}   {} (O): {}",
        state.scores.get(Mark::X),
        opponent,
        state.scores.get(Mark::O)
    )
}

pub fn mode_name(mode: GameMode) -> &'static str {
    match mode {
        GameMode::PlayerVsComputer => "player vs computer",
        GameMode::PlayerVsPlayer => "player vs player",
    }
}

pub fn render_screen(state: &TicTacToeGameState) -> String {
    let mut screen = format!("{}\n\n{}\n\n{}", score_line(state), render_board(state), status_message(state));
    if state.status.is_terminal() {
        screen.push_str("\nType r to play again.");
    }
    screen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_shows_indices() {
        let state = TicTacToeGameState::new(GameMode::PlayerVsComputer);

        assert_eq!(
            render_board(&state),
            " 0 | 1 | 2 \n---+---+---\n 3 | 4 | 5 \n---+---+---\n 6 | 7 | 8 "
        );
    }

    #[test]
    fn test_winning_cells_are_highlighted() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsPlayer);
        for index in [0, 3, 1, 4, 2] {
            state.place_mark(index).unwrap();
        }

        let board = render_board(&state);

        assert!(board.starts_with("[X]|[X]|[X]"));
        assert_eq!(status_message(&state), "X WINS!");
        assert_eq!(score_line(&state), "P1 (X): 1   P2 (O): 0");
        assert!(render_screen(&state).ends_with("Type r to play again."));
    }

    #[test]
    fn test_turn_message() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsComputer);
        state.place_mark(4).unwrap();

        assert_eq!(status_message(&state), "O'S TURN");
        assert_eq!(score_line(&state), "P1 (X): 0   CPU (O): 0");
    }

    #[test]
    fn test_draw_message() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsPlayer);
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            state.place_mark(index).unwrap();
        }

        assert_eq!(status_message(&state), "IT'S A DRAW!");
    }
}
