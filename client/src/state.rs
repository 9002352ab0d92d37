use pixeltoe_common::games::tictactoe::BOARD_SIZE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCommand {
    PlaceMark { index: usize },
    Reset,
    ToggleMode,
    Help,
    Quit,
}

impl ClientCommand {
    pub fn parse(input: &str) -> Result<Self, String> {
        let input = input.trim();
        match input.to_ascii_lowercase().as_str() {
            "r" | "reset" | "again" => return Ok(ClientCommand::Reset),
            "m" | "mode" => return Ok(ClientCommand::ToggleMode),
            "h" | "help" | "?" => return Ok(ClientCommand::Help),
            "q" | "quit" | "exit" => return Ok(ClientCommand::Quit),
            _ => {}
        }

        match input.parse::<usize>() {
            Ok(index) if index < BOARD_SIZE => Ok(ClientCommand::PlaceMark { index }),
            Ok(index) => Err(format!("Cell {} does not exist, use 0-{}", index, BOARD_SIZE - 1)),
            Err(_) => Err(format!("Unknown command '{}', type h for help", input)),
        }
    }
}
