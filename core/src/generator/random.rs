use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use super::*;

/// Spawn strategy picking an empty cell uniformly, then a `4` with probability
/// [`FOUR_PROBABILITY`] and a `2` otherwise.
#[derive(Clone, Debug)]
pub struct RandomTileSpawner<R = SmallRng> {
    rng: R,
}

impl RandomTileSpawner<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomTileSpawner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn pick_value(&mut self) -> Tile {
        if self.rng.random_bool(FOUR_PROBABILITY) {
            4
        } else {
            2
        }
    }
}

impl<R: Rng> TileSpawner for RandomTileSpawner<R> {
    fn spawn(&mut self, grid: &mut Grid) -> Option<SpawnedTile> {
        let empty: SmallVec<[Coord2; GRID_CELLS]> = grid.empty_cells().collect();
        if empty.is_empty() {
            log::trace!("no empty cell left, nothing spawned");
            return None;
        }

        let coords = empty[self.rng.random_range(0..empty.len())];
        let value = self.pick_value();
        grid.set(coords, value);
        log::trace!("spawned {} at {:?}", value, coords);

        Some(SpawnedTile::new(coords, value))
    }
}
