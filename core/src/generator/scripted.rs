use std::collections::VecDeque;

use super::*;

/// Spawn strategy replaying a fixed list of tiles, for replays and tests.
///
/// Entries whose cell is taken or out of bounds are skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedTileSpawner {
    queue: VecDeque<SpawnedTile>,
}

impl ScriptedTileSpawner {
    pub fn new(tiles: &[(Coord2, Tile)]) -> Self {
        Self {
            queue: tiles
                .iter()
                .map(|&(coords, value)| SpawnedTile::new(coords, value))
                .collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl TileSpawner for ScriptedTileSpawner {
    fn spawn(&mut self, grid: &mut Grid) -> Option<SpawnedTile> {
        while let Some(tile) = self.queue.pop_front() {
            if grid.get(tile.coords()) == Ok(0) {
                grid.set(tile.coords(), tile.value);
                return Some(tile);
            }
            log::trace!("scripted tile at {:?} skipped", tile.coords());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_and_invalid_cells_are_skipped() {
        let rows: [[Tile; 4]; 4] = [[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]];
        let mut grid = Grid::from_rows(&rows).unwrap();
        let mut spawner = ScriptedTileSpawner::new(&[((0, 0), 4), ((9, 9), 4), ((1, 2), 4)]);

        assert_eq!(spawner.spawn(&mut grid), Some(SpawnedTile::new((1, 2), 4)));
        assert_eq!(grid[(0, 0)], 2);
        assert_eq!(spawner.remaining(), 0);
        assert_eq!(spawner.spawn(&mut grid), None);
    }
}
