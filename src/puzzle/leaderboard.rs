//! Optional score persistence for solved puzzles.
//!
//! The leaderboard is an external collaborator. The engine only needs to
//! submit a record and fetch a ranked list; when the service fails the shell
//! hides the leaderboard and play continues.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::clock::format_mm_ss;
use crate::core::error::LeaderboardError;

/// One solved-puzzle result.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Player identifier (username).
    pub player: String,
    /// Moves used to solve.
    pub moves: u32,
    /// Whole seconds from first move to solve.
    pub elapsed_secs: u64,
}

impl ScoreRecord {
    #[must_use]
    pub fn new(player: impl Into<String>, moves: u32, elapsed_secs: u64) -> Self {
        Self {
            player: player.into(),
            moves,
            elapsed_secs,
        }
    }

    /// Elapsed time as `MM:SS`.
    #[must_use]
    pub fn time_display(&self) -> String {
        format_mm_ss(std::time::Duration::from_secs(self.elapsed_secs))
    }

    /// Leaderboard order: fewer moves first, then faster.
    #[must_use]
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.moves
            .cmp(&other.moves)
            .then(self.elapsed_secs.cmp(&other.elapsed_secs))
    }
}

/// Remote or local score service.
pub trait ScoreService {
    /// Record a result.
    fn submit_score(&mut self, record: &ScoreRecord) -> Result<(), LeaderboardError>;

    /// Best `limit` results, best first.
    fn fetch_top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, LeaderboardError>;
}

/// What the shell should show after a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LeaderboardView {
    /// Ranked records, best first.
    Available(Vec<ScoreRecord>),
    /// Service failed or nothing was submitted; hide the leaderboard.
    Unavailable,
}

impl LeaderboardView {
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Convert a fetch result, logging the failure.
    #[must_use]
    pub fn from_fetch(result: Result<Vec<ScoreRecord>, LeaderboardError>) -> Self {
        match result {
            Ok(records) => Self::Available(records),
            Err(e) => {
                tracing::warn!(error = %e, "leaderboard fetch failed");
                Self::Unavailable
            }
        }
    }
}

/// In-process leaderboard. Ties keep submission order.
#[derive(Clone, Debug, Default)]
pub struct InMemoryScoreService {
    records: Vec<ScoreRecord>,
}

impl InMemoryScoreService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ScoreService for InMemoryScoreService {
    fn submit_score(&mut self, record: &ScoreRecord) -> Result<(), LeaderboardError> {
        if record.player.trim().is_empty() {
            return Err(LeaderboardError::Rejected("player name is empty".into()));
        }
        self.records.push(record.clone());
        Ok(())
    }

    fn fetch_top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, LeaderboardError> {
        let mut ranked = self.records.clone();
        // Stable sort keeps submission order among ties.
        ranked.sort_by(ScoreRecord::rank_cmp);
        ranked.truncate(limit);
        Ok(ranked)
    }
}
