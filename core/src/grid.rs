use core::fmt;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Result of collapsing a single lane towards its front.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineCollapse {
    /// Collapsed lane, zero padded to the input length.
    pub tiles: SmallVec<[Tile; GRID_SIZE]>,
    /// Value produced by each merge, in lane order.
    pub merges: SmallVec<[Tile; GRID_SIZE]>,
    pub changed: bool,
}

impl LineCollapse {
    pub fn score(&self) -> Score {
        self.merges.iter().sum()
    }
}

/// Slides every tile of `line` towards index 0, merging equal neighbours.
///
/// A tile takes part in at most one merge, so `[2, 2, 2, 2]` becomes
/// `[4, 4, 0, 0]` rather than `[8, 0, 0, 0]`.
pub fn collapse_line(line: &[Tile]) -> LineCollapse {
    let filtered: SmallVec<[Tile; GRID_SIZE]> =
        line.iter().copied().filter(|&tile| tile != 0).collect();

    let mut tiles = SmallVec::with_capacity(line.len());
    let mut merges = SmallVec::new();
    let mut i = 0;
    while i < filtered.len() {
        let value = filtered[i];
        if filtered.get(i + 1) == Some(&value) {
            let merged = value.saturating_mul(2);
            tiles.push(merged);
            merges.push(merged);
            i += 2;
        } else {
            tiles.push(value);
            i += 1;
        }
    }
    tiles.resize(line.len(), 0);

    let changed = tiles.as_slice() != line;
    LineCollapse {
        tiles,
        merges,
        changed,
    }
}

/// Merges produced by sliding a whole grid.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SlideOutcome {
    pub merges: SmallVec<[Tile; 8]>,
    pub changed: bool,
}

impl SlideOutcome {
    pub fn score(&self) -> Score {
        self.merges.iter().sum()
    }
}

/// Square board of tiles, stored row-major as `(row, col)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")]
pub struct Grid {
    cells: Array2<Tile>,
}

impl Grid {
    pub fn new() -> Self {
        Self {
            cells: Array2::zeros([GRID_SIZE, GRID_SIZE]),
        }
    }

    /// Builds a grid from row literals, validating shape and tile values.
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self> {
        if rows.len() != GRID_SIZE || rows.iter().any(|row| row.as_ref().len() != GRID_SIZE) {
            return Err(GameError::InvalidBoardShape);
        }

        let mut grid = Self::new();
        for (cell, &value) in grid
            .cells
            .iter_mut()
            .zip(rows.iter().flat_map(|row| row.as_ref()))
        {
            if value != 0 && !is_tile_value(value) {
                return Err(GameError::InvalidTile(value));
            }
            *cell = value;
        }
        Ok(grid)
    }

    pub const fn size(&self) -> Coord {
        GRID_SIZE as Coord
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size && coords.1 < size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Result<Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub(crate) fn set(&mut self, coords: Coord2, value: Tile) {
        self.cells[coords.to_nd_index()] = value;
    }

    pub fn rows(&self) -> Vec<Vec<Tile>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Tile)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &value)| ((row as Coord, col as Coord), value))
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.iter_cells()
            .filter(|&(_, value)| value == 0)
            .map(|(coords, _)| coords)
    }

    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(|&value| value == 0)
    }

    /// Whether two orthogonally adjacent cells hold the same non-zero value.
    pub fn has_adjacent_pair(&self) -> bool {
        self.iter_cells().filter(|&(_, value)| value != 0).any(|(coords, value)| {
            self.cells
                .iter_neighbors(coords)
                .any(|pos| self[pos] == value)
        })
    }

    /// Whether at least one direction would change the grid.
    pub fn can_move(&self) -> bool {
        self.has_empty_cell() || self.has_adjacent_pair()
    }

    pub fn sum(&self) -> Tile {
        self.cells.iter().sum()
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Collapses every lane towards `direction`.
    pub fn slide(&mut self, direction: Direction) -> SlideOutcome {
        let mut outcome = SlideOutcome::default();
        let lanes = if direction.is_horizontal() {
            self.cells.rows_mut()
        } else {
            self.cells.columns_mut()
        };

        for mut lane in lanes {
            if direction.is_reversed() {
                lane.invert_axis(ndarray::Axis(0));
            }
            let line: SmallVec<[Tile; GRID_SIZE]> = lane.iter().copied().collect();
            let collapsed = collapse_line(&line);
            if collapsed.changed {
                for (cell, &tile) in lane.iter_mut().zip(&collapsed.tiles) {
                    *cell = tile;
                }
                outcome.changed = true;
            }
            outcome.merges.extend(collapsed.merges);
        }

        outcome
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Coord2> for Grid {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl TryFrom<Vec<Vec<Tile>>> for Grid {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self> {
        Self::from_rows(rows.as_slice())
    }
}

impl From<Grid> for Vec<Vec<Tile>> {
    fn from(grid: Grid) -> Self {
        grid.rows()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for (col, &value) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match value {
                    0 => write!(f, "{:>5}", ".")?,
                    value => write!(f, "{:>5}", value)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: [[Tile; 4]; 4]) -> Grid {
        Grid::from_rows(&rows).unwrap()
    }

    #[test]
    fn collapse_does_not_cascade() {
        let collapsed = collapse_line(&[2, 2, 2, 2]);
        assert_eq!(collapsed.tiles.as_slice(), &[4, 4, 0, 0]);
        assert_eq!(collapsed.merges.as_slice(), &[4, 4]);
        assert_eq!(collapsed.score(), 8);
        assert!(collapsed.changed);
    }

    #[test]
    fn collapse_merges_front_pair_first() {
        assert_eq!(collapse_line(&[2, 2, 2, 0]).tiles.as_slice(), &[4, 2, 0, 0]);
        assert_eq!(collapse_line(&[4, 0, 4, 8]).tiles.as_slice(), &[8, 8, 0, 0]);
        assert_eq!(collapse_line(&[2, 4, 2, 4]).tiles.as_slice(), &[2, 4, 2, 4]);
        assert_eq!(collapse_line(&[0, 0, 0, 2]).tiles.as_slice(), &[2, 0, 0, 0]);
    }

    #[test]
    fn collapse_reports_unchanged_lines() {
        let collapsed = collapse_line(&[2, 4, 8, 0]);
        assert!(!collapsed.changed);
        assert!(collapsed.merges.is_empty());

        assert!(!collapse_line(&[0, 0, 0, 0]).changed);
    }

    #[test]
    fn right_mirrors_left() {
        let rows: [[Tile; 4]; 6] = [
            [2, 2, 0, 0],
            [2, 2, 2, 2],
            [0, 4, 4, 8],
            [8, 0, 8, 8],
            [2, 4, 8, 16],
            [0, 0, 0, 2],
        ];
        for row in rows {
            let mut right = grid([row, [0; 4], [0; 4], [0; 4]]);
            right.slide(Direction::Right);

            let mut mirrored = row;
            mirrored.reverse();
            let mut expected = collapse_line(&mirrored).tiles;
            expected.reverse();

            assert_eq!(right.rows()[0], expected.to_vec(), "row {:?}", row);
        }
    }

    #[test]
    fn slide_left_merges_and_compresses_rows() {
        let mut board = grid([[2, 2, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let outcome = board.slide(Direction::Left);

        assert!(outcome.changed);
        assert_eq!(outcome.merges.as_slice(), &[4]);
        assert_eq!(board.rows()[0], vec![4, 0, 0, 0]);
    }

    #[test]
    fn slide_vertical_uses_columns_top_to_bottom() {
        let mut up = grid([[2, 0, 0, 0], [2, 0, 0, 4], [4, 0, 0, 0], [4, 0, 0, 4]]);
        let mut down = up.clone();

        up.slide(Direction::Up);
        assert_eq!(
            up,
            grid([[4, 0, 0, 8], [8, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]])
        );

        down.slide(Direction::Down);
        assert_eq!(
            down,
            grid([[0, 0, 0, 0], [0, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 8]])
        );
    }

    #[test]
    fn slide_without_room_is_unchanged() {
        let mut board = grid([[2, 4, 0, 0], [8, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]);
        let before = board.clone();

        let outcome = board.slide(Direction::Left);

        assert!(!outcome.changed);
        assert_eq!(board, before);
        assert!(board.slide(Direction::Up).merges.is_empty());
    }

    #[test]
    fn full_board_without_pairs_cannot_move() {
        let board = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        assert!(!board.has_empty_cell());
        assert!(!board.has_adjacent_pair());
        assert!(!board.can_move());

        let with_hole = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 0, 4], [4, 2, 4, 2]]);
        assert!(with_hole.can_move());

        let with_pair = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 4]]);
        assert!(with_pair.can_move());

        let with_vertical_pair = grid([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [2, 8, 16, 32]]);
        assert!(with_vertical_pair.can_move());
    }

    #[test]
    fn from_rows_rejects_bad_input() {
        let narrow: [[Tile; 3]; 4] = [[2, 4, 0]; 4];
        assert_eq!(Grid::from_rows(&narrow), Err(GameError::InvalidBoardShape));

        let short: [[Tile; 4]; 3] = [[0; 4]; 3];
        assert_eq!(Grid::from_rows(&short), Err(GameError::InvalidBoardShape));

        let ragged: Vec<Vec<Tile>> = vec![vec![0; 4], vec![0; 5], vec![0; 4], vec![0; 4]];
        assert_eq!(Grid::from_rows(ragged.as_slice()), Err(GameError::InvalidBoardShape));

        let three: [[Tile; 4]; 4] = [[0, 3, 0, 0], [0; 4], [0; 4], [0; 4]];
        assert_eq!(Grid::from_rows(&three), Err(GameError::InvalidTile(3)));

        let one: [[Tile; 4]; 4] = [[1, 0, 0, 0], [0; 4], [0; 4], [0; 4]];
        assert_eq!(Grid::from_rows(&one), Err(GameError::InvalidTile(1)));
    }

    #[test]
    fn empty_cells_are_row_major() {
        let board = grid([[2, 0, 2, 2], [2, 2, 2, 0], [2; 4], [0, 2, 2, 2]]);
        let empty: Vec<_> = board.empty_cells().collect();
        assert_eq!(empty, vec![(0, 1), (1, 3), (3, 0)]);
    }

    #[test]
    fn serializes_as_nested_rows() {
        let board = grid([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 4]]);
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "[[2,0,0,0],[0,0,0,0],[0,0,0,0],[0,0,0,4]]");

        let parsed: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, board);
        assert!(serde_json::from_str::<Grid>("[[3]]").is_err());
    }

    #[test]
    fn get_validates_coords() {
        let board = grid([[0, 0, 0, 0], [0, 0, 8, 0], [0; 4], [0; 4]]);
        assert_eq!(board.get((1, 2)), Ok(8));
        assert_eq!(board.get((4, 0)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn display_renders_rows() {
        let board = grid([[2, 0, 0, 0], [0; 4], [0; 4], [0, 0, 0, 2048]]);
        let text = board.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "    2     .     .     .");
        assert_eq!(lines[3], "    .     .     .  2048");
    }
}
