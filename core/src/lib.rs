//! Sliding-tile engine for the 2048 puzzle.
//!
//! [`GridEngine`] owns a single game and is driven with [`GridEngine::slide`] and
//! [`GridEngine::restart`]; front-ends draw from the [`GameState`] snapshots it hands out.

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use input::*;
pub use milestone::*;
pub use state::*;
pub use storage::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod grid;
mod input;
mod milestone;
mod state;
mod storage;
mod types;

/// Side length of the square grid.
pub const GRID_SIZE: usize = 4;

pub const GRID_CELLS: usize = GRID_SIZE * GRID_SIZE;

/// Tile that wins the game once merged.
pub const WIN_TILE: Tile = 2048;

/// Chance that a spawned tile is a `4` instead of a `2`.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Tiles placed on an empty grid when a game starts.
pub const INITIAL_TILES: usize = 2;

pub const BEST_SCORE_KEY: &str = "best2048Score";

/// How long a merge stays highlighted.
pub const MERGE_HIGHLIGHT_MS: u64 = 300;

/// Minimum spacing between two moves fed from input.
pub const MOVE_DEBOUNCE_MS: u64 = 100;
