//! Combined configuration for all games.
//!
//! Each game owns its own config type (`PuzzleConfig`, `TicTacToeConfig`,
//! `SnakeConfig`). `GamesConfig` bundles them so a shell can load one JSON
//! document at startup. Missing sections fall back to their defaults.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::puzzle::PuzzleConfig;
use crate::snake::SnakeConfig;
use crate::tictactoe::TicTacToeConfig;

/// Configuration for every engine in the crate.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamesConfig {
    pub puzzle: PuzzleConfig,
    pub tictactoe: TicTacToeConfig,
    pub snake: SnakeConfig,
}

impl GamesConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check cross-field invariants of every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.puzzle.validate()?;
        self.snake.validate()?;
        Ok(())
    }

    /// Pin every game's RNG, deriving one seed per game from `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        let mut rng = super::GameRng::new(seed);
        self.puzzle.seed = Some(rng.fork().seed());
        self.snake.seed = Some(rng.fork().seed());
        self
    }
}
