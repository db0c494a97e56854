//! Snake configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::grid::{Cell, Direction};
use crate::core::error::ConfigError;

/// Snake configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    /// Grid columns.
    pub width: u16,

    /// Grid rows.
    pub height: u16,

    /// Cell of the length-1 snake at the start of each game.
    pub start: Cell,

    /// Heading at the start of each game.
    pub heading: Direction,

    /// Suggested tick period for the shell's timer (milliseconds).
    pub tick_interval_ms: u64,

    /// Score added per food eaten.
    pub food_score: u32,

    /// Random draws before food placement falls back to scanning free cells.
    pub max_food_attempts: u32,

    /// Storage key for the high score.
    pub high_score_key: String,

    /// Seed for food placement. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            start: Cell::new(8, 8),
            heading: Direction::Right,
            tick_interval_ms: 150,
            food_score: 10,
            max_food_attempts: 1000,
            high_score_key: "snakeHighScore".to_string(),
            seed: None,
        }
    }
}

impl SnakeConfig {
    #[must_use]
    pub fn with_grid(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_start(mut self, start: Cell, heading: Direction) -> Self {
        self.start = start;
        self.heading = heading;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_food_score(mut self, score: u32) -> Self {
        self.food_score = score;
        self
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Total cells on the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < 2 || self.height < 2 {
            return Err(ConfigError::Invalid(format!(
                "snake grid must be at least 2x2, got {}x{}",
                self.width, self.height
            )));
        }
        if self.width > i16::MAX as u16 || self.height > i16::MAX as u16 {
            return Err(ConfigError::Invalid("snake grid is too large".into()));
        }
        if !self.start.in_bounds(self.width, self.height) {
            return Err(ConfigError::Invalid(format!(
                "snake start {} is outside the {}x{} grid",
                self.start, self.width, self.height
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid("snake.tick_interval_ms must be positive".into()));
        }
        Ok(())
    }
}
