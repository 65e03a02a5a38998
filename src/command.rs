//! Player input tokens

use std::str::FromStr;

use derive_more::{Display, Error};

use crate::grid::Direction;

/// One instruction typed by the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    /// Draw the maze again
    ShowMap,
    Quit,
}

/// Input that is not one of the known commands
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid input `{token}`: please use W, A, S, D, M, or Q.")]
pub struct ParseCommandError {
    pub token: String,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Read `W`, `A`, `S`, `D`, `M` or `Q`, ignoring case and surrounding
    /// whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token.to_ascii_uppercase().as_str() {
            "W" => Ok(Command::Move(Direction::Up)),
            "A" => Ok(Command::Move(Direction::Left)),
            "S" => Ok(Command::Move(Direction::Down)),
            "D" => Ok(Command::Move(Direction::Right)),
            "M" => Ok(Command::ShowMap),
            "Q" => Ok(Command::Quit),
            _ => Err(ParseCommandError {
                token: token.to_owned(),
            }),
        }
    }
}
