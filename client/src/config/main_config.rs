use std::path::{Path, PathBuf};

use pixeltoe_common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use serde::{Deserialize, Serialize};

use super::TicTacToeConfig;

const CONFIG_FILE_NAME: &str = "pixeltoe_config.yaml";
const LOG_FILE_NAME: &str = "pixeltoe.log";

fn default_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// `path` when given, otherwise the config file next to the executable.
pub fn get_config_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(default_config_path)
}

pub fn get_config_manager(
    path: Option<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(get_config_path(path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub tictactoe: TicTacToeConfig,
    pub log_file: Option<String>,
}

impl Config {
    /// The configured log file, or `pixeltoe.log` beside the config file.
    pub fn log_path(&self, config_path: &Path) -> PathBuf {
        match &self.log_file {
            Some(log_file) => PathBuf::from(log_file),
            None => config_path.with_file_name(LOG_FILE_NAME),
        }
    }
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.tictactoe.validate()?;
        if let Some(log_file) = &self.log_file
            && log_file.trim().is_empty()
        {
            return Err("log_file must not be blank".to_string());
        }
        Ok(())
    }
}
