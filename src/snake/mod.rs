//! Snake on a fixed grid, advanced one cell per timer tick.
//!
//! - `grid`: cells and headings
//! - `SnakeGame`: the tick loop, collisions, food placement, high score

pub mod config;
mod game;
pub mod grid;

pub use config::SnakeConfig;
pub use game::{GameOverReason, SnakeGame, SnakeInput, SnakeOver, SnakeStatus, TickOutcome};
pub use grid::{Cell, Direction};
