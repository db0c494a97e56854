//! Error types shared by the engines.
//!
//! Invalid input is never fatal: click-facing engine methods turn a
//! `MoveError` into a silent no-op. The strict `try_*` methods return it so
//! callers and tests can see why an input was refused.

use thiserror::Error;

/// Why an input was rejected by an engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Sliding puzzle: the tile is not next to the empty cell.
    #[error("tile {index} is not adjacent to the empty cell at {empty}")]
    NotAdjacent { index: usize, empty: usize },

    /// Index past the end of the board.
    #[error("index {index} is out of range")]
    OutOfRange { index: usize },

    /// Tic-tac-toe: the cell already holds a mark.
    #[error("cell {index} is already occupied")]
    CellOccupied { index: usize },

    /// Tic-tac-toe: the mark played is not the side to move.
    #[error("out of turn: {expected} to move, got {got}")]
    OutOfTurn { expected: char, got: char },

    /// The game has already reached a terminal state.
    #[error("game is over")]
    GameOver,

    /// The input is not accepted in the engine's current phase
    /// (e.g. a human click while the AI is to move).
    #[error("input not accepted right now")]
    NotAccepted,
}

/// Failure of the local key/value store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is malformed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failure of the optional leaderboard collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    #[error("leaderboard unavailable: {0}")]
    Unavailable(String),

    #[error("score rejected: {0}")]
    Rejected(String),
}

/// Configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
