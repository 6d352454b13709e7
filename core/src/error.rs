use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid direction, expected one of up, down, left, right")]
    InvalidDirection,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Tile value {0} is not a power of two")]
    InvalidTile(u32),
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure reported by a [`KeyValueStore`](crate::KeyValueStore) backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
