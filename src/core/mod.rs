//! Core building blocks shared by every game: RNG, configuration, errors,
//! key/value storage, and time sources.
//!
//! Nothing here knows the rules of a particular game.

pub mod clock;
pub mod config;
pub mod error;
pub mod rng;
pub mod storage;

pub use clock::{format_mm_ss, Clock, ManualClock, SystemClock};
pub use config::GamesConfig;
pub use error::{ConfigError, LeaderboardError, MoveError, StorageError};
pub use rng::{GameRng, GameRngState};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
