//! Exhaustive minimax search.
//!
//! Works on `Copy` board snapshots: each ply builds a child board with
//! `Board::with_move`, so nothing is mutated and undone. The board has at
//! most nine plies, so the search always runs to the end.
//!
//! ## Scoring
//!
//! - AI win: `10 - depth`
//! - Opponent win: `depth - 10`
//! - Draw: `0`
//!
//! `depth` counts plies below the root's candidate move, so quicker wins
//! and slower losses score better. The AI maximizes, the opponent minimizes.
//! Ties go to the lowest cell index.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::board::{Board, Evaluation, Mark};

const WIN_SCORE: i32 = 10;

/// Search knobs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Prune with alpha-beta. Same move, fewer nodes.
    pub alpha_beta: bool,
}

impl SearchOptions {
    #[must_use]
    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.alpha_beta = enabled;
        self
    }
}

/// Counters from one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Boards evaluated, root children included.
    pub nodes: u64,
    /// Subtrees skipped by alpha-beta.
    pub cutoffs: u64,
}

/// Chosen move and its minimax value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub index: usize,
    pub score: i32,
    pub stats: SearchStats,
}

/// Optimal move for `ai`, or `None` if the board is terminal.
#[must_use]
pub fn best_move(board: &Board, ai: Mark) -> Option<usize> {
    search(board, ai, SearchOptions::default()).map(|r| r.index)
}

/// Full search from `board` with `ai` to move.
#[instrument(level = "debug", skip(board))]
pub fn search(board: &Board, ai: Mark, options: SearchOptions) -> Option<SearchResult> {
    if board.evaluate().is_terminal() {
        return None;
    }

    let mut stats = SearchStats::default();
    let mut best: Option<(usize, i32)> = None;

    for index in board.empty_cells() {
        let child = board.with_move(index, ai);
        let alpha = best.map_or(i32::MIN, |(_, s)| s);
        let score = minimax(&child, ai, 0, false, alpha, i32::MAX, options, &mut stats);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((index, score));
        }
    }

    let (index, score) = best?;
    debug!(index, score, nodes = stats.nodes, "minimax chose move");
    Some(SearchResult { index, score, stats })
}

/// Minimax value of `board` for `ai`, with `ai` to move.
#[must_use]
pub fn score(board: &Board, ai: Mark) -> Option<i32> {
    search(board, ai, SearchOptions::default()).map(|r| r.score)
}

/// Terminal score, or `None` if play continues.
fn terminal_score(board: &Board, ai: Mark, depth: i32) -> Option<i32> {
    match board.evaluate() {
        Evaluation::InProgress => None,
        Evaluation::Draw => Some(0),
        Evaluation::Win { mark, .. } if mark == ai => Some(WIN_SCORE - depth),
        Evaluation::Win { .. } => Some(depth - WIN_SCORE),
    }
}

#[allow(clippy::too_many_arguments)]
fn minimax(
    board: &Board,
    ai: Mark,
    depth: i32,
    maximizing: bool,
    mut alpha: i32,
    mut beta: i32,
    options: SearchOptions,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;
    if let Some(score) = terminal_score(board, ai, depth) {
        return score;
    }

    let mover = if maximizing { ai } else { ai.opponent() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for index in board.empty_cells() {
        let child = board.with_move(index, mover);
        let score = minimax(&child, ai, depth + 1, !maximizing, alpha, beta, options, stats);

        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }

        if options.alpha_beta && alpha >= beta {
            stats.cutoffs += 1;
            break;
        }
    }
    best
}
