use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one tile")]
    EmptyBoard,
    #[error("Too many mines, at least one tile must be safe")]
    TooManyMines,
    #[error("Mine percentage must be between 0 and 100")]
    InvalidPercentage,
    #[error("Mine placed twice on the same tile")]
    DuplicateMine,
    #[error("Mine layout does not match the board config")]
    LayoutMismatch,
    #[error("Expected a difficulty name or <size>_<mines>")]
    InvalidFormat,
}

pub type Result<T> = core::result::Result<T, GameError>;
