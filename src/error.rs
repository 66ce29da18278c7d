use thiserror::Error;

/// Errors raised while validating puzzle input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    #[error("State has {found} tiles, expected {expected}")]
    WrongLength { expected: usize, found: usize },
    #[error("Tile {0} is outside the board")]
    TileOutOfRange(u8),
    #[error("Tile {0} appears more than once")]
    DuplicateTile(u8),
    #[error("Action {action} is not legal with the blank at {blank}")]
    IllegalAction { action: usize, blank: usize },
    #[error("Unsupported grid width {0}")]
    UnsupportedWidth(usize),
    #[error("Invalid tile list: {0}")]
    Parse(String),
}
