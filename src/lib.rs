//! # portfolio-games
//!
//! Game engines behind the portfolio site's games tab.
//!
//! ## Design Principles
//!
//! 1. **Engines, not views**: No rendering, no timers. Each engine owns its
//!    state and exposes input handlers plus read access; the shell draws and
//!    schedules.
//!
//! 2. **Invalid input is a no-op**: Clicks on the wrong tile, occupied cells,
//!    and reversing key presses are ignored. `try_*` variants say why.
//!
//! 3. **Deterministic when seeded**: Shuffles and food placement draw from a
//!    seeded `GameRng`, so tests and replays are reproducible.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, errors, storage, clocks
//! - `rules`: The `GameEngine` trait shared by all games
//! - `puzzle`: 15-puzzle with shuffle, hint, timer, leaderboard hook
//! - `tictactoe`: Tic-tac-toe with a minimax AI and scoreboard
//! - `snake`: Tick-driven snake with persisted high score

pub mod core;
pub mod puzzle;
pub mod rules;
pub mod snake;
pub mod tictactoe;

// Re-export commonly used types
pub use crate::core::{
    Clock, ConfigError, FileStore, GameRng, GameRngState, GamesConfig, KeyValueStore,
    LeaderboardError, ManualClock, MemoryStore, MoveError, StorageError, SystemClock,
};

pub use crate::rules::GameEngine;

pub use crate::puzzle::{
    InMemoryScoreService, LeaderboardView, PuzzleBoard, PuzzleConfig, ScoreRecord, ScoreService,
    SlidingPuzzle,
};

pub use crate::tictactoe::{Board, Evaluation, GameMode, Mark, Scoreboard, TicTacToe, TicTacToeConfig};

pub use crate::snake::{Cell, Direction, SnakeConfig, SnakeGame, SnakeStatus, TickOutcome};
