use serde::{Deserialize, Serialize};

use crate::*;

/// Result of a single [`GridEngine::slide`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The game is over, nothing was evaluated.
    Rejected,
    /// No lane changed, no tile was spawned.
    NoChange,
    /// The grid changed and a tile was spawned.
    Moved,
    /// The grid changed and no further move is possible.
    Finished,
}

impl MoveOutcome {
    /// Whether the move was applied to the grid.
    pub const fn is_applied(self) -> bool {
        use MoveOutcome::*;
        match self {
            Rejected => false,
            NoChange => false,
            Moved => true,
            Finished => true,
        }
    }
}

/// Owns one game at a time: grid, score, win/terminal flags and the best score.
#[derive(Debug)]
pub struct GridEngine<S = RandomTileSpawner> {
    grid: Grid,
    score: Score,
    best: BestScore,
    has_won: bool,
    game_over: bool,
    last_move: Option<Direction>,
    new_tiles: Vec<SpawnedTile>,
    merged_tiles: Vec<MergedTile>,
    spawner: S,
}

impl GridEngine<RandomTileSpawner> {
    pub fn new(seed: u64, store: impl KeyValueStore + 'static) -> Self {
        Self::with_spawner(RandomTileSpawner::from_seed(seed), store)
    }
}

impl<S: TileSpawner> GridEngine<S> {
    pub fn with_spawner(spawner: S, store: impl KeyValueStore + 'static) -> Self {
        let mut engine = Self {
            grid: Grid::new(),
            score: 0,
            best: BestScore::load(store),
            has_won: false,
            game_over: false,
            last_move: None,
            new_tiles: Vec::new(),
            merged_tiles: Vec::new(),
            spawner,
        };
        engine.initialize();
        engine
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn best_score(&self) -> Score {
        self.best.value()
    }

    pub fn has_won(&self) -> bool {
        self.has_won
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// Whether any direction could still change the grid.
    pub fn can_move(&self) -> bool {
        self.grid.can_move()
    }

    pub fn game_state(&self) -> GameState {
        GameState {
            grid: self.grid.clone(),
            score: self.score,
            best_score: self.best.value(),
            has_won: self.has_won,
            game_over: self.game_over,
            new_tiles: self.new_tiles.clone(),
            merged_tiles: self.merged_tiles.clone(),
            last_move: self.last_move,
        }
    }

    /// Slides every lane towards `direction`, spawning a tile if anything moved.
    pub fn slide(&mut self, direction: Direction) -> MoveOutcome {
        if self.game_over {
            log::debug!("move {} rejected, game is over", direction);
            return MoveOutcome::Rejected;
        }

        self.new_tiles.clear();
        self.merged_tiles.clear();
        self.last_move = Some(direction);

        let slide = self.grid.slide(direction);
        if !slide.changed {
            log::trace!("move {} changed nothing", direction);
            return MoveOutcome::NoChange;
        }

        let timestamp = now_millis();
        for &value in &slide.merges {
            self.record_merge(value, timestamp);
        }

        self.add_random_tile();
        if self.best.record(self.score) {
            log::debug!("new best score {}", self.score);
        }
        log::debug!("move {} applied, score {}", direction, self.score);

        if !self.grid.can_move() {
            self.game_over = true;
            log::info!("game over with score {}", self.score);
            return MoveOutcome::Finished;
        }

        MoveOutcome::Moved
    }

    /// Parses `symbol` as a direction and slides; unknown symbols leave the game untouched.
    pub fn slide_symbol(&mut self, symbol: &str) -> Result<MoveOutcome> {
        let direction = symbol.parse()?;
        Ok(self.slide(direction))
    }

    /// Starts a fresh game, keeping the best score.
    pub fn restart(&mut self) {
        self.initialize();
        log::debug!("game restarted");
    }

    fn initialize(&mut self) {
        self.grid = Grid::new();
        self.score = 0;
        self.has_won = false;
        self.game_over = false;
        self.last_move = None;
        self.new_tiles.clear();
        self.merged_tiles.clear();
        for _ in 0..INITIAL_TILES {
            self.add_random_tile();
        }
    }

    fn add_random_tile(&mut self) -> bool {
        match self.spawner.spawn(&mut self.grid) {
            Some(tile) => {
                self.new_tiles.push(tile);
                true
            }
            None => false,
        }
    }

    fn record_merge(&mut self, value: Tile, timestamp: u64) {
        self.score = self.score.saturating_add(value);
        self.merged_tiles.push(MergedTile { value, timestamp });
        log::trace!("merged into {}", value);

        if value == WIN_TILE && !self.has_won {
            self.has_won = true;
            log::info!("reached {}", WIN_TILE);
        }
    }
}
