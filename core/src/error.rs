use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board dimensions must be positive, got {rows}x{cols}")]
    EmptyBoard { rows: usize, cols: usize },
    #[error("board dimensions {rows}x{cols} exceed the supported maximum of {max}")]
    BoardTooLarge { rows: usize, cols: usize, max: usize },
    #[error("too many mines, requested {requested} but only {available} cells fit")]
    TooManyMines {
        requested: usize,
        available: CellCount,
    },
}

pub type Result<T> = core::result::Result<T, GameError>;
