//! 15-puzzle: slide numbered tiles into the empty cell until they read
//! 1..15 in row-major order.
//!
//! - `PuzzleBoard`: the 4x4 permutation and its move rules
//! - `SlidingPuzzle`: a game session with move counter, timer, shuffle
//! - `leaderboard`: optional score service behind `ScoreService`

pub mod board;
pub mod config;
mod game;
pub mod leaderboard;

pub use board::{neighbors, LegalMoves, PuzzleBoard, Tile, CELLS, SIDE};
pub use config::PuzzleConfig;
pub use game::{MoveReport, PuzzleInput, PuzzleSnapshot, PuzzleSolved, SlidingPuzzle};
pub use leaderboard::{InMemoryScoreService, LeaderboardView, ScoreRecord, ScoreService};
