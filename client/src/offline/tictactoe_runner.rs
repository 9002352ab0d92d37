use std::io::Write;
use std::time::Duration;

use pixeltoe_common::games::SessionRng;
use pixeltoe_common::games::tictactoe::TicTacToeGameState;
use pixeltoe_common::log;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::Instant;

use crate::config::TicTacToeConfig;
use crate::state::ClientCommand;
use crate::ui::{HELP_TEXT, mode_name, render_screen};

enum Flow {
    Continue,
    Quit,
}

/// Drives one interactive session until the player quits or input ends.
/// The computer's reply is delayed by a random pause from the config window;
/// commands typed during that pause (reset, mode switch, quit) still apply.
/// The pause is drawn once per computer turn, so input that arrives while
/// the computer is thinking does not push its move back.
pub async fn run_tictactoe_game<R, W>(
    state: &mut TicTacToeGameState,
    cfg: &TicTacToeConfig,
    rng: &mut SessionRng,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut computer_deadline: Option<Instant> = None;

    writeln!(out, "{} ({})", HELP_TEXT, mode_name(state.mode))?;

    loop {
        writeln!(out, "\n{}", render_screen(state))?;
        out.flush()?;

        let flow = if state.is_computer_turn() {
            let deadline = *computer_deadline.get_or_insert_with(|| {
                let delay_ms = rng.random_range(cfg.bot_delay_min_ms..=cfg.bot_delay_max_ms);
                Instant::now() + Duration::from_millis(delay_ms)
            });

            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => {
                    computer_deadline = None;
                    if let Err(e) = state.play_computer_turn(rng) {
                        log!("Computer turn skipped: {}", e);
                    }
                    Flow::Continue
                }
                line = lines.next_line() => handle_line(line?, state, out)?,
            }
        } else {
            let line = lines.next_line().await?;
            handle_line(line, state, out)?
        };

        // Reset and mode switches hand the turn back to X; a later computer
        // turn draws a fresh pause.
        if !state.is_computer_turn() {
            computer_deadline = None;
        }

        if let Flow::Quit = flow {
            return Ok(());
        }
    }
}

fn handle_line<W: Write>(
    line: Option<String>,
    state: &mut TicTacToeGameState,
    out: &mut W,
) -> std::io::Result<Flow> {
    let Some(line) = line else {
        log!("Input closed");
        return Ok(Flow::Quit);
    };

    let command = match ClientCommand::parse(&line) {
        Ok(command) => command,
        Err(message) => {
            writeln!(out, "{}", message)?;
            return Ok(Flow::Continue);
        }
    };

    match command {
        ClientCommand::PlaceMark { index } => {
            if let Err(e) = state.place_mark(index) {
                writeln!(out, "{}", e)?;
            }
        }
        ClientCommand::Reset => {
            state.reset();
            log!("New round");
        }
        ClientCommand::ToggleMode => {
            let mode = state.mode.toggled();
            state.set_mode(mode);
            log!("Mode switched to {:?}", mode);
            writeln!(out, "Now playing {}", mode_name(mode))?;
        }
        ClientCommand::Help => writeln!(out, "{}", HELP_TEXT)?,
        ClientCommand::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixeltoe_common::games::tictactoe::{Board, GameMode, GameStatus, Mark, WinningLine};

    fn instant_config(mode: GameMode) -> TicTacToeConfig {
        TicTacToeConfig {
            mode,
            bot_delay_min_ms: 0,
            bot_delay_max_ms: 0,
        }
    }

    async fn run_script(state: &mut TicTacToeGameState, script: &str) -> String {
        let cfg = instant_config(state.mode);
        let mut rng = SessionRng::new(11);
        let mut out = Vec::new();

        run_tictactoe_game(state, &cfg, &mut rng, script.as_bytes(), &mut out)
            .await
            .unwrap();

        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_pvp_game_to_win() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsPlayer);

        let output = run_script(&mut state, "0\n3\n1\n4\n2\n5\nq\n").await;

        assert_eq!(state.status, GameStatus::Won(WinningLine::new(Mark::X, [0, 1, 2])));
        assert!(output.contains("X WINS!"));
        assert!(output.contains("Game is already over"));
    }

    #[tokio::test]
    async fn test_reset_keeps_scores() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsPlayer);

        run_script(&mut state, "0\n3\n1\n4\n2\nr\n").await;

        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.scores.get(Mark::X), 1);
    }

    #[tokio::test]
    async fn test_mode_toggle_resets_scores() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsPlayer);

        let output = run_script(&mut state, "0\n3\n1\n4\n2\nm\n").await;

        assert_eq!(state.mode, GameMode::PlayerVsComputer);
        assert_eq!(state.scores.get(Mark::X), 0);
        assert!(output.contains("Now playing player vs computer"));
    }

    #[tokio::test]
    async fn test_bad_input_is_reported() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsPlayer);

        let output = run_script(&mut state, "banana\n12\n").await;

        assert!(output.contains("Unknown command 'banana'"));
        assert!(output.contains("Cell 12 does not exist"));
        assert_eq!(state.board.mark_count(), 0);
    }

    fn delayed_config(mode: GameMode, delay_ms: u64) -> TicTacToeConfig {
        TicTacToeConfig {
            mode,
            bot_delay_min_ms: delay_ms,
            bot_delay_max_ms: delay_ms,
        }
    }

    /// Feeds each line after waiting its pause, then closes the input.
    async fn run_timed(
        state: &mut TicTacToeGameState,
        cfg: &TicTacToeConfig,
        steps: &[(u64, &str)],
    ) -> String {
        use tokio::io::AsyncWriteExt;

        let mut rng = SessionRng::new(11);
        let mut out = Vec::new();
        let (client, mut server) = tokio::io::duplex(64);

        let game = run_tictactoe_game(
            state,
            cfg,
            &mut rng,
            tokio::io::BufReader::new(client),
            &mut out,
        );
        let script = async move {
            for &(pause_ms, line) in steps {
                tokio::time::sleep(Duration::from_millis(pause_ms)).await;
                server.write_all(line.as_bytes()).await.unwrap();
            }
        };
        let (result, _) = tokio::join!(game, script);
        result.unwrap();

        String::from_utf8(out).unwrap()
    }

    fn computer_marks(state: &TicTacToeGameState) -> usize {
        (0..9).filter(|&i| state.board.get(i) == Some(Mark::O)).count()
    }

    #[tokio::test]
    async fn test_computer_answers_human_move() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsComputer);
        let cfg = instant_config(GameMode::PlayerVsComputer);

        run_timed(&mut state, &cfg, &[(0, "0\n"), (50, "q\n")]).await;

        assert_eq!(state.board.get(0), Some(Mark::X));
        assert_eq!(state.board.get(4), Some(Mark::O));
        assert_eq!(state.current_mark, Mark::X);
    }

    #[tokio::test]
    async fn test_typing_during_pause_does_not_delay_computer() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsComputer);
        let cfg = delayed_config(GameMode::PlayerVsComputer, 200);
        let mut steps = vec![(0, "0\n")];
        steps.extend(std::iter::repeat_n((60, "h\n"), 12));
        steps.push((0, "q\n"));

        run_timed(&mut state, &cfg, &steps).await;

        assert_eq!(computer_marks(&state), 1);
        assert_eq!(state.board.get(4), Some(Mark::O));
        assert_eq!(state.board.mark_count(), 2);
        assert_eq!(state.current_mark, Mark::X);
    }

    #[tokio::test]
    async fn test_rejected_move_during_pause_does_not_delay_computer() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsComputer);
        let cfg = delayed_config(GameMode::PlayerVsComputer, 300);

        let output = run_timed(
            &mut state,
            &cfg,
            &[(0, "0\n"), (80, "5\n"), (80, "5\n"), (400, "q\n")],
        )
        .await;

        assert!(output.contains("Not your turn"));
        assert_eq!(state.board.get(4), Some(Mark::O));
        assert_eq!(computer_marks(&state), 1);
    }

    #[tokio::test]
    async fn test_reset_during_pause_cancels_computer_move() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsComputer);
        let cfg = delayed_config(GameMode::PlayerVsComputer, 400);

        run_timed(&mut state, &cfg, &[(0, "0\n"), (100, "r\n"), (600, "q\n")]).await;

        assert_eq!(state.board, Board::new());
        assert_eq!(state.current_mark, Mark::X);
        assert_eq!(state.status, GameStatus::Playing);
        assert_eq!(state.mode, GameMode::PlayerVsComputer);
    }

    #[tokio::test]
    async fn test_mode_switch_during_pause_cancels_computer_move() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsComputer);
        let cfg = delayed_config(GameMode::PlayerVsComputer, 400);

        let output =
            run_timed(&mut state, &cfg, &[(0, "0\n"), (100, "m\n"), (600, "q\n")]).await;

        assert_eq!(state.mode, GameMode::PlayerVsPlayer);
        assert_eq!(state.board, Board::new());
        assert_eq!(state.current_mark, Mark::X);
        assert!(output.contains("Now playing player vs player"));
    }

    #[tokio::test]
    async fn test_quit_during_pause_stops_without_computer_move() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsComputer);
        let cfg = delayed_config(GameMode::PlayerVsComputer, 5_000);

        run_timed(&mut state, &cfg, &[(0, "0\n"), (50, "q\n")]).await;

        assert_eq!(state.board.get(0), Some(Mark::X));
        assert_eq!(computer_marks(&state), 0);
        assert!(state.is_computer_turn());
    }

    #[tokio::test]
    async fn test_new_round_after_reset_gets_fresh_pause() {
        let mut state = TicTacToeGameState::new(GameMode::PlayerVsComputer);
        let cfg = delayed_config(GameMode::PlayerVsComputer, 1_000);

        // The first pause would end at 1000ms; the second one, started by
        // the move on 8, runs until about 1750ms.
        run_timed(
            &mut state,
            &cfg,
            &[(0, "0\n"), (700, "r\n"), (50, "8\n"), (550, "q\n")],
        )
        .await;

        assert_eq!(state.board.get(8), Some(Mark::X));
        assert_eq!(state.board.mark_count(), 1);
        assert_eq!(computer_marks(&state), 0);
    }
}
