use std::collections::VecDeque;
use std::io::BufRead;
use std::str::FromStr;

use sapper_core as game;
use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum InputError {
    #[error("Input ended before the game did")]
    UnexpectedEof,
    #[error("Expected a number, got {token:?}")]
    InvalidNumber { token: String },
    #[error("Unknown command {0:?}, expected \"free\" or \"mine\"")]
    UnknownCommand(String),
    #[error(transparent)]
    Game(#[from] game::GameError),
    #[error("Could not read input")]
    Io(#[from] std::io::Error),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// Claim the cell as free and reveal it.
    Free,
    /// Set or clear a mine mark.
    Mine,
}

impl Action {
    pub(crate) const fn code(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Mine => "mine",
        }
    }
}

impl FromStr for Action {
    type Err = InputError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        [Self::Free, Self::Mine]
            .into_iter()
            .find(|action| action.code() == code)
            .ok_or_else(|| InputError::UnknownCommand(code.to_string()))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Command {
    pub coords: game::Coord2,
    pub action: Action,
}

/// Whitespace separated tokens read lazily from `R`, a token may sit on any line.
#[derive(Debug)]
pub(crate) struct Tokens<R> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    pub(crate) fn next_token(&mut self) -> Result<String, InputError> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }

            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(InputError::UnexpectedEof);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }

    pub(crate) fn next_number<T: FromStr>(&mut self) -> Result<T, InputError> {
        let token = self.next_token()?;
        token
            .parse()
            .map_err(|_| InputError::InvalidNumber { token })
    }

    pub(crate) fn next_mine_count(&mut self) -> Result<game::GameConfig, InputError> {
        let mines = self.next_number()?;
        Ok(game::GameConfig::new(mines)?)
    }

    /// Reads `column row action`, with one-based coordinates.
    pub(crate) fn next_command(&mut self) -> Result<Command, InputError> {
        let column = self.next_number()?;
        let row = self.next_number()?;
        let action = self.next_token()?.parse()?;
        let coords = game::coords_from_input(column, row)?;
        Ok(Command { coords, action })
    }
}
