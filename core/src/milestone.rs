use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::*;

/// Remembers which celebration-worthy tiles (powers of two from [`WIN_TILE`] up)
/// have already appeared in the current game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneTracker {
    reached: BTreeSet<Tile>,
}

impl MilestoneTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn is_milestone(value: Tile) -> bool {
        value >= WIN_TILE && is_tile_value(value)
    }

    pub fn has_reached(&self, value: Tile) -> bool {
        self.reached.contains(&value)
    }

    /// Records every milestone on `grid` and returns the largest one not seen before.
    pub fn observe(&mut self, grid: &Grid) -> Option<Tile> {
        let mut newest = None;
        for (_, value) in grid.iter_cells() {
            if Self::is_milestone(value) && self.reached.insert(value) {
                newest = newest.max(Some(value));
            }
        }
        if let Some(value) = newest {
            log::info!("milestone {} reached", value);
        }
        newest
    }

    pub fn reset(&mut self) {
        self.reached.clear();
    }
}
