mod main_config;
mod tictactoe_config;

pub use main_config::{Config, get_config_manager, get_config_path};
pub use tictactoe_config::TicTacToeConfig;
