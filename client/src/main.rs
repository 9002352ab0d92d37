mod config;
mod offline;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use pixeltoe_common::games::SessionRng;
use pixeltoe_common::games::tictactoe::{GameMode, TicTacToeGameState};
use pixeltoe_common::log;
use pixeltoe_common::logger::{self, LogSink};

use config::{Config, get_config_manager, get_config_path};
use offline::run_tictactoe_game;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    /// Human (X) against the computer (O)
    Pvc,
    /// Two humans sharing the terminal
    Pvp,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pvc => GameMode::PlayerVsComputer,
            ModeArg::Pvp => GameMode::PlayerVsPlayer,
        }
    }
}

#[derive(Parser)]
#[command(name = "pixeltoe", about = "Tic-tac-toe in the terminal")]
struct Args {
    /// Overrides the mode stored in the config file
    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    use_log_prefix: bool,

    /// Write log lines to this file instead of the default `pixeltoe.log`
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print log lines to stdout, interleaved with the board
    #[arg(long, conflicts_with = "log_file")]
    log_stdout: bool,
}

/// Where log lines go; `None` means stdout.
fn log_destination(args: &Args, config: &Config, config_path: &Path) -> Option<PathBuf> {
    if args.log_stdout {
        return None;
    }
    Some(
        args.log_file
            .clone()
            .unwrap_or_else(|| config.log_path(config_path)),
    )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_path = get_config_path(args.config.clone());
    let config_manager = get_config_manager(Some(config_path.clone()));
    let mut config = config_manager.get_config()?;

    let sink = match log_destination(&args, &config, &config_path) {
        Some(path) => LogSink::file(&path)?,
        None => LogSink::Stdout,
    };
    let prefix = args.use_log_prefix.then(|| "Client".to_string());
    logger::init_logger(prefix, sink);

    let mode = args.mode.map(GameMode::from).unwrap_or(config.tictactoe.mode);
    let mut rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!("Starting {:?} game, seed {}", mode, rng.seed());

    let mut state = TicTacToeGameState::new(mode);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    run_tictactoe_game(&mut state, &config.tictactoe, &mut rng, stdin, &mut stdout).await?;

    if config.tictactoe.mode != state.mode {
        config.tictactoe.mode = state.mode;
        if let Err(e) = config_manager.set_config(&config) {
            log!("Failed to save config: {}", e);
        }
    }

    log!(
        "Session over, X {} : O {}",
        state.scores.x,
        state.scores.o
    );

    Ok(())
}
