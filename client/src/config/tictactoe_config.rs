use pixeltoe_common::config::Validate;
use pixeltoe_common::games::tictactoe::GameMode;
use serde::{Deserialize, Serialize};

pub const MAX_BOT_DELAY_MS: u64 = 10_000;

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TicTacToeConfig {
    pub mode: GameMode,
    /// Lower bound of the pause before the computer moves.
    pub bot_delay_min_ms: u64,
    pub bot_delay_max_ms: u64,
}

impl Validate for TicTacToeConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bot_delay_min_ms > self.bot_delay_max_ms {
            return Err(format!(
                "bot_delay_min_ms ({}) must not exceed bot_delay_max_ms ({})",
                self.bot_delay_min_ms, self.bot_delay_max_ms
            ));
        }
        if self.bot_delay_max_ms > MAX_BOT_DELAY_MS {
            return Err(format!(
                "bot_delay_max_ms must not exceed {}",
                MAX_BOT_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::PlayerVsComputer,
            bot_delay_min_ms: 500,
            bot_delay_max_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixeltoe_common::config::{ConfigSerializer, YamlConfigSerializer};

    #[test]
    fn test_default_is_valid() {
        assert!(TicTacToeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_inverted_delay_window_is_invalid() {
        let config = TicTacToeConfig {
            bot_delay_min_ms: 900,
            bot_delay_max_ms: 100,
            ..TicTacToeConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_delay_is_valid() {
        let config = TicTacToeConfig {
            bot_delay_min_ms: 0,
            bot_delay_max_ms: 0,
            ..TicTacToeConfig::default()
        };

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_delay_cap() {
        let config = TicTacToeConfig {
            bot_delay_max_ms: MAX_BOT_DELAY_MS + 1,
            ..TicTacToeConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_delay_keys_use_defaults() {
        let serializer = YamlConfigSerializer::new();

        let config: TicTacToeConfig = serializer.deserialize("bot_delay_max_ms: 2000\n").unwrap();

        assert_eq!(config.mode, GameMode::PlayerVsComputer);
        assert_eq!(config.bot_delay_min_ms, 500);
        assert_eq!(config.bot_delay_max_ms, 2000);
    }
}
