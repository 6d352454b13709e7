use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;
pub use scripted::*;

mod random;
mod scripted;

/// Source of the tiles that appear after every applied move.
pub trait TileSpawner {
    /// Places one tile on an empty cell of `grid`, or returns `None` when the grid is full.
    fn spawn(&mut self, grid: &mut Grid) -> Option<SpawnedTile>;
}

/// Tile placed by a [`TileSpawner`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnedTile {
    pub row: Coord,
    pub col: Coord,
    pub value: Tile,
}

impl SpawnedTile {
    pub const fn new((row, col): Coord2, value: Tile) -> Self {
        Self { row, col, value }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }
}
