//! Engine contract shared by the three games.
//!
//! Games implement `GameEngine` so a shell can reset, feed input to, and
//! query any of them the same way.

pub mod engine;

pub use engine::GameEngine;
