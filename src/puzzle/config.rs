//! Sliding puzzle configuration.

use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;

/// Sliding puzzle configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    /// Fewest random legal swaps performed by a shuffle.
    pub shuffle_min: u32,

    /// Most random legal swaps performed by a shuffle (inclusive).
    pub shuffle_max: u32,

    /// Seed for the shuffle RNG. `None` draws from the OS.
    pub seed: Option<u64>,

    /// How many entries to request from the leaderboard.
    pub leaderboard_size: usize,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            shuffle_min: 150,
            shuffle_max: 200,
            seed: None,
            leaderboard_size: 10,
        }
    }
}

impl PuzzleConfig {
    /// Use a fixed shuffle length.
    #[must_use]
    pub fn with_shuffle_moves(mut self, moves: u32) -> Self {
        self.shuffle_min = moves;
        self.shuffle_max = moves;
        self
    }

    /// Use a custom shuffle length range.
    #[must_use]
    pub fn with_shuffle_range(mut self, min: u32, max: u32) -> Self {
        self.shuffle_min = min;
        self.shuffle_max = max;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shuffle_min == 0 {
            return Err(ConfigError::Invalid("puzzle.shuffle_min must be at least 1".into()));
        }
        if self.shuffle_min > self.shuffle_max {
            return Err(ConfigError::Invalid(format!(
                "puzzle.shuffle_min ({}) exceeds puzzle.shuffle_max ({})",
                self.shuffle_min, self.shuffle_max
            )));
        }
        Ok(())
    }
}
