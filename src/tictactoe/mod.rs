//! Tic-tac-toe with an exhaustive minimax opponent.
//!
//! - `Board`: 3x3 cells, win/draw evaluation
//! - `minimax`: optimal move search over board snapshots
//! - `TicTacToe`: a session with modes, turn order, and a scoreboard

pub mod board;
pub mod config;
mod game;
pub mod minimax;

pub use board::{Board, EmptyCells, Evaluation, Mark, ParseBoardError, CELLS, WIN_LINES};
pub use config::{GameMode, TicTacToeConfig};
pub use game::{PlayReport, Scoreboard, TicTacToe};
pub use minimax::{best_move, SearchOptions, SearchResult, SearchStats};
