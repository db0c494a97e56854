//! Snake engine.
//!
//! A fixed-tick simulation. The shell owns the timer and calls `tick` every
//! `tick_interval`; each call is one atomic step. Key presses between ticks
//! only change the pending heading.
//!
//! ## States
//!
//! ```text
//! NotStarted --start--> Running <--toggle_pause--> Paused
//!                          |
//!                        tick (wall / self / board full)
//!                          v
//!                       GameOver
//! ```
//!
//! `reset` returns to `NotStarted` from anywhere, keeping the high score.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::SnakeConfig;
use super::grid::{Cell, Direction};
use crate::core::error::{ConfigError, MoveError};
use crate::core::storage::{KeyValueStore, MemoryStore};
use crate::core::GameRng;
use crate::rules::GameEngine;

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Head left the grid.
    Wall,
    /// Head ran into the body.
    SelfCollision,
    /// No free cell left for food.
    BoardFull,
}

/// Engine lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnakeStatus {
    NotStarted,
    Running,
    Paused,
    GameOver(GameOverReason),
}

/// Result of one `tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing happened.
    Idle,
    /// Moved one cell at constant length.
    Moved,
    /// Moved onto food and grew by one.
    Ate,
    /// The move was refused and the game ended.
    Collided(GameOverReason),
}

/// Terminal summary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnakeOver {
    pub reason: GameOverReason,
    pub score: u32,
}

/// Snake game session.
///
/// The body runs head (index 0) to tail. `occupied` mirrors it for O(1)
/// collision checks.
#[derive(Clone, Debug)]
pub struct SnakeGame<S: KeyValueStore = MemoryStore> {
    config: SnakeConfig,
    store: S,
    rng: GameRng,
    body: Vector<Cell>,
    occupied: FxHashSet<Cell>,
    food: Option<Cell>,
    heading: Direction,
    pending: Direction,
    score: u32,
    high_score: u32,
    status: SnakeStatus,
}

impl SnakeGame<MemoryStore> {
    /// Game with an in-memory high score.
    pub fn in_memory(config: SnakeConfig) -> Result<Self, ConfigError> {
        Self::new(config, MemoryStore::new())
    }
}

impl<S: KeyValueStore> SnakeGame<S> {
    /// New game in `NotStarted`, high score read from `store`.
    ///
    /// Rejects configs whose grid or start cell fails validation, so the
    /// head is in bounds from the first frame.
    pub fn new(config: SnakeConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = GameRng::from_seed_or_entropy(config.seed);
        let high_score = load_high_score(&store, &config.high_score_key);
        let mut game = Self {
            heading: config.heading,
            pending: config.heading,
            body: Vector::unit(config.start),
            config,
            store,
            rng,
            occupied: FxHashSet::default(),
            food: None,
            score: 0,
            high_score,
            status: SnakeStatus::NotStarted,
        };
        game.initialize();
        Ok(game)
    }

    /// Length-1 snake at the start cell, fresh food, score 0.
    fn initialize(&mut self) {
        let start = self.config.start;
        self.body = Vector::unit(start);
        self.occupied.clear();
        self.occupied.insert(start);
        self.heading = self.config.heading;
        self.pending = self.config.heading;
        self.score = 0;
        self.status = SnakeStatus::NotStarted;
        self.food = self.place_food();
        if self.food.is_none() {
            self.status = SnakeStatus::GameOver(GameOverReason::BoardFull);
        }
    }

    // === Controls ===

    /// `NotStarted` -> `Running`. Returns whether the state changed.
    pub fn start(&mut self) -> bool {
        if self.status != SnakeStatus::NotStarted {
            return false;
        }
        self.status = SnakeStatus::Running;
        true
    }

    /// `Running` <-> `Paused`. No-op otherwise.
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            SnakeStatus::Running => SnakeStatus::Paused,
            SnakeStatus::Paused => SnakeStatus::Running,
            _ => return false,
        };
        true
    }

    /// Space bar: start a fresh game, otherwise pause/resume.
    pub fn press_space(&mut self) -> bool {
        match self.status {
            SnakeStatus::NotStarted => self.start(),
            SnakeStatus::Running | SnakeStatus::Paused => self.toggle_pause(),
            SnakeStatus::GameOver(_) => false,
        }
    }

    /// Queue a heading for the next tick.
    ///
    /// Ignored unless running, and ignored when it reverses the heading of
    /// the last committed move (not the queued one).
    pub fn set_heading(&mut self, dir: Direction) -> bool {
        if self.status != SnakeStatus::Running {
            return false;
        }
        if dir == self.heading.opposite() {
            debug!(?dir, heading = ?self.heading, "reverse heading ignored");
            return false;
        }
        self.pending = dir;
        true
    }

    /// Back to `NotStarted` with a fresh snake. Keeps the high score.
    pub fn reset(&mut self) {
        self.initialize();
    }

    // === Simulation ===

    /// Advance one step.
    ///
    /// A wall or body hit ends the game without committing the move.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != SnakeStatus::Running {
            return TickOutcome::Idle;
        }

        let heading = self.pending;
        let new_head = self.head().step(heading);

        let collision = if !new_head.in_bounds(self.config.width, self.config.height) {
            Some(GameOverReason::Wall)
        } else if self.occupied.contains(&new_head) {
            // The tail cell counts even though it would move away this tick.
            Some(GameOverReason::SelfCollision)
        } else {
            None
        };
        if let Some(reason) = collision {
            self.end(reason);
            return TickOutcome::Collided(reason);
        }

        self.heading = heading;
        self.body.push_front(new_head);
        self.occupied.insert(new_head);

        if self.food == Some(new_head) {
            self.score += self.config.food_score;
            self.record_high_score();
            self.food = self.place_food();
            if self.food.is_none() {
                self.end(GameOverReason::BoardFull);
            }
            return TickOutcome::Ate;
        }

        if let Some(tail) = self.body.pop_back() {
            self.occupied.remove(&tail);
        }
        TickOutcome::Moved
    }

    fn end(&mut self, reason: GameOverReason) {
        self.status = SnakeStatus::GameOver(reason);
        info!(?reason, score = self.score, length = self.body.len(), "snake game over");
    }

    /// Uniform random free cell, or `None` when the snake fills the grid.
    ///
    /// Draws at random up to `max_food_attempts` times, then picks among
    /// the enumerated free cells so placement always terminates.
    fn place_food(&mut self) -> Option<Cell> {
        let (width, height) = (self.config.width, self.config.height);
        if self.occupied.len() >= self.config.cell_count() {
            return None;
        }

        for _ in 0..self.config.max_food_attempts {
            let cell = Cell::new(
                self.rng.gen_range_usize(0..width as usize) as i16,
                self.rng.gen_range_usize(0..height as usize) as i16,
            );
            if !self.occupied.contains(&cell) {
                return Some(cell);
            }
        }

        let free: Vec<Cell> = (0..height as i16)
            .flat_map(|y| (0..width as i16).map(move |x| Cell::new(x, y)))
            .filter(|c| !self.occupied.contains(c))
            .collect();
        self.rng.choose(&free).copied()
    }

    fn record_high_score(&mut self) {
        if self.score <= self.high_score {
            return;
        }
        self.high_score = self.score;
        let key = &self.config.high_score_key;
        if let Err(e) = self.store.set(key, &self.high_score.to_string()) {
            warn!(error = %e, key = %key, "failed to persist high score");
        }
    }

    // === Queries ===

    /// Body cells, head first.
    #[must_use]
    pub fn segments(&self) -> &Vector<Cell> {
        &self.body
    }

    #[must_use]
    pub fn head(&self) -> Cell {
        // The body is never empty.
        self.body.front().copied().unwrap_or(self.config.start)
    }

    /// Body length. Never zero: the head is always present.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn status(&self) -> SnakeStatus {
        self.status
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, SnakeStatus::GameOver(_))
    }

    /// Heading of the last committed move.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Heading the next tick will use.
    #[must_use]
    pub fn pending_heading(&self) -> Direction {
        self.pending
    }

    #[must_use]
    pub fn tick_interval(&self) -> std::time::Duration {
        self.config.tick_interval()
    }

    #[must_use]
    pub fn config(&self) -> &SnakeConfig {
        &self.config
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Body cells distinct and in bounds, index in sync, food off the body.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let distinct: FxHashSet<Cell> = self.body.iter().copied().collect();
        distinct.len() == self.body.len()
            && distinct == self.occupied
            && self.body.iter().all(|c| c.in_bounds(self.config.width, self.config.height))
            && self.food.map_or(true, |f| !self.occupied.contains(&f))
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, cell: Cell) {
        self.food = Some(cell);
    }
}

fn load_high_score<S: KeyValueStore>(store: &S, key: &str) -> u32 {
    match store.get(key) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "ignoring malformed high score");
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            warn!(error = %e, key, "failed to read high score");
            0
        }
    }
}

/// Shell-level snake input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnakeInput {
    Start,
    TogglePause,
    Space,
    Turn(Direction),
    Tick,
}

impl<S: KeyValueStore> GameEngine for SnakeGame<S> {
    type Input = SnakeInput;
    type Outcome = SnakeOver;

    fn reset(&mut self) {
        self.initialize();
    }

    fn handle(&mut self, input: SnakeInput) -> Result<(), MoveError> {
        let accepted = match input {
            SnakeInput::Start => self.start(),
            SnakeInput::TogglePause => self.toggle_pause(),
            SnakeInput::Space => self.press_space(),
            SnakeInput::Turn(dir) => self.set_heading(dir),
            SnakeInput::Tick => self.tick() != TickOutcome::Idle,
        };
        if accepted {
            Ok(())
        } else if self.is_game_over() {
            Err(MoveError::GameOver)
        } else {
            Err(MoveError::NotAccepted)
        }
    }

    fn outcome(&self) -> Option<SnakeOver> {
        match self.status {
            SnakeStatus::GameOver(reason) => Some(SnakeOver { reason, score: self.score }),
            _ => None,
        }
    }
}
