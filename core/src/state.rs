use serde::{Deserialize, Serialize};

use crate::*;

/// Merge produced by the latest move, stamped with wall-clock milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedTile {
    pub value: Tile,
    pub timestamp: u64,
}

/// Immutable copy of everything a front-end needs to draw the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub grid: Grid,
    pub score: Score,
    pub best_score: Score,
    pub has_won: bool,
    pub game_over: bool,
    pub new_tiles: Vec<SpawnedTile>,
    pub merged_tiles: Vec<MergedTile>,
    /// Last direction tried while the game was running, even if nothing moved.
    pub last_move: Option<Direction>,
}

impl GameState {
    pub fn is_new_tile(&self, coords: Coord2) -> bool {
        self.new_tiles.iter().any(|tile| tile.coords() == coords)
    }

    /// Whether a merge into `value` happened less than [`MERGE_HIGHLIGHT_MS`] before `now_ms`.
    pub fn is_recently_merged(&self, value: Tile, now_ms: u64) -> bool {
        self.merged_tiles
            .iter()
            .any(|merge| merge.value == value && now_ms.saturating_sub(merge.timestamp) < MERGE_HIGHLIGHT_MS)
    }

    pub fn max_tile(&self) -> Tile {
        self.grid.max_tile()
    }
}

/// Milliseconds since the unix epoch, `0` if the clock is before it.
pub fn now_millis() -> u64 {
    use web_time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as u64)
}

/// Groups digits in threes with `,`, e.g. `12,345`.
pub fn format_score(score: Score) -> String {
    let digits = score.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}
