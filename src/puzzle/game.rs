//! Sliding puzzle engine.
//!
//! Owns one board plus the per-run stats (move counter, timer). The timer
//! starts on the first accepted move; shuffle and reset clear the stats
//! without starting it. On solve the timer freezes.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::board::{LegalMoves, PuzzleBoard, Tile, CELLS};
use super::config::PuzzleConfig;
use super::leaderboard::{LeaderboardView, ScoreRecord, ScoreService};
use crate::core::clock::{format_mm_ss, Clock, SystemClock};
use crate::core::error::{ConfigError, MoveError};
use crate::core::{GameRng, GameRngState};
use crate::rules::GameEngine;

/// Result of an accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveReport {
    /// Tile index that slid.
    pub index: usize,
    /// Move count after this move.
    pub moves: u32,
    /// True the first time the board becomes solved in this run.
    pub solved_now: bool,
}

/// Terminal summary once the board is solved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PuzzleSolved {
    pub moves: u32,
    pub elapsed: Duration,
}

/// Saved in-progress run: board, stats, player, and RNG position.
///
/// Restoring resumes the timer from the saved elapsed time, and later
/// shuffles continue the same random stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    pub board: PuzzleBoard,
    pub moves: u32,
    pub elapsed_ms: u64,
    pub solved_moves: Option<u32>,
    pub player: Option<String>,
    pub rng: GameRngState,
}

/// Sliding puzzle game session.
#[derive(Clone, Debug)]
pub struct SlidingPuzzle<C: Clock = SystemClock> {
    config: PuzzleConfig,
    board: PuzzleBoard,
    moves: u32,
    started_at: Option<Duration>,
    stopped_at: Option<Duration>,
    /// Move count at the solving move; frozen with the timer.
    solved_moves: Option<u32>,
    /// Elapsed time carried in from a restored snapshot.
    banked: Duration,
    player: Option<String>,
    rng: GameRng,
    clock: C,
}

impl SlidingPuzzle<SystemClock> {
    /// Solved board, wall-clock timer. Rejects an invalid config.
    pub fn new(config: PuzzleConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> SlidingPuzzle<C> {
    /// Solved board with a caller-supplied time source.
    ///
    /// The config is validated here, so `shuffle` always has a non-empty
    /// step range.
    pub fn with_clock(config: PuzzleConfig, clock: C) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = GameRng::from_seed_or_entropy(config.seed);
        Ok(Self {
            config,
            board: PuzzleBoard::solved(),
            moves: 0,
            started_at: None,
            stopped_at: None,
            solved_moves: None,
            banked: Duration::ZERO,
            player: None,
            rng,
            clock,
        })
    }

    // === Lifecycle ===

    /// Back to the solved board with cleared stats.
    pub fn initialize(&mut self) {
        self.board = PuzzleBoard::solved();
        self.reset_stats();
    }

    /// Same as `initialize`; the shell's reset button.
    pub fn reset(&mut self) {
        self.initialize();
    }

    /// Scramble with a random walk of legal swaps from the current board.
    ///
    /// Every step is a legal move, so the result is always solvable.
    /// Clears the move counter and stops the timer.
    pub fn shuffle(&mut self) {
        self.reset_stats();
        let steps = self
            .rng
            .gen_range_inclusive(self.config.shuffle_min..=self.config.shuffle_max);

        for _ in 0..steps {
            let legal = self.board.legal_moves();
            if let Some(&target) = self.rng.choose(&legal) {
                self.board.swap_with_empty(target);
            }
        }
        debug!(steps, misplaced = self.board.misplaced(), "puzzle shuffled");
    }

    fn reset_stats(&mut self) {
        self.moves = 0;
        self.started_at = None;
        self.stopped_at = None;
        self.solved_moves = None;
        self.banked = Duration::ZERO;
    }

    // === Snapshots ===

    /// Capture the run so a shell can persist it.
    #[must_use]
    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            board: self.board,
            moves: self.moves,
            elapsed_ms: u64::try_from(self.elapsed().as_millis()).unwrap_or(u64::MAX),
            solved_moves: self.solved_moves,
            player: self.player.clone(),
            rng: self.rng.state(),
        }
    }

    /// Resume a saved run. A snapshot whose board is not a permutation of
    /// the tiles is rejected and leaves the session untouched.
    pub fn restore(&mut self, snapshot: &PuzzleSnapshot) -> Result<(), ConfigError> {
        if !snapshot.board.is_permutation() {
            return Err(ConfigError::Invalid("snapshot board is not a tile permutation".into()));
        }
        let now = self.clock.now();
        self.board = snapshot.board;
        self.moves = snapshot.moves;
        self.solved_moves = snapshot.solved_moves.filter(|_| snapshot.board.is_solved());
        self.banked = Duration::from_millis(snapshot.elapsed_ms);
        self.started_at = (snapshot.moves > 0).then_some(now);
        self.stopped_at = self.solved_moves.map(|_| now);
        self.set_player(snapshot.player.clone());
        self.rng = GameRng::from_state(&snapshot.rng);
        debug!(moves = self.moves, elapsed_ms = snapshot.elapsed_ms, "puzzle restored");
        Ok(())
    }

    // === Moves ===

    /// Slide the tile at `index` into the empty cell.
    ///
    /// Non-adjacent or out-of-range indices are rejected without touching
    /// the board or the stats.
    pub fn try_apply_move(&mut self, index: usize) -> Result<MoveReport, MoveError> {
        if index >= CELLS {
            return Err(MoveError::OutOfRange { index });
        }
        let empty = self.board.empty_index();
        if !self.board.is_legal(index) {
            return Err(MoveError::NotAdjacent { index, empty });
        }

        let was_frozen = self.stopped_at.is_some();
        self.board.swap_with_empty(index);
        self.moves += 1;

        let now = self.clock.now();
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }

        let solved_now = !was_frozen && self.board.is_solved();
        if solved_now {
            self.stopped_at = Some(now);
            self.solved_moves = Some(self.moves);
            info!(moves = self.moves, elapsed = %self.elapsed_display(), "puzzle solved");
        }

        Ok(MoveReport {
            index,
            moves: self.moves,
            solved_now,
        })
    }

    /// Click-facing move: returns whether the move was accepted.
    pub fn apply_move(&mut self, index: usize) -> bool {
        match self.try_apply_move(index) {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "puzzle move ignored");
                false
            }
        }
    }

    /// First legal move in up, down, left, right order. Advisory only.
    #[must_use]
    pub fn hint(&self) -> usize {
        self.board.legal_moves()[0]
    }

    // === Queries ===

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    #[must_use]
    pub fn legal_moves(&self) -> LegalMoves {
        self.board.legal_moves()
    }

    #[must_use]
    pub fn board(&self) -> &PuzzleBoard {
        &self.board
    }

    #[must_use]
    pub fn cells(&self) -> &[Tile; CELLS] {
        self.board.cells()
    }

    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn is_timer_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    /// Time since the first move; frozen once solved.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        let running = match (self.started_at, self.stopped_at) {
            (None, _) => Duration::ZERO,
            (Some(start), Some(stop)) => stop.saturating_sub(start),
            (Some(start), None) => self.clock.now().saturating_sub(start),
        };
        self.banked + running
    }

    /// Elapsed time as `MM:SS`.
    #[must_use]
    pub fn elapsed_display(&self) -> String {
        format_mm_ss(self.elapsed())
    }

    #[must_use]
    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    // === Leaderboard ===

    /// Identify the player whose wins get submitted. `None` signs out.
    pub fn set_player(&mut self, player: Option<String>) {
        self.player = player.filter(|p| !p.trim().is_empty());
    }

    #[must_use]
    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    /// Stats frozen at the first solve of this run, while the board is
    /// still solved.
    #[must_use]
    pub fn solved_stats(&self) -> Option<PuzzleSolved> {
        let moves = self.solved_moves.filter(|_| self.is_solved())?;
        Some(PuzzleSolved { moves, elapsed: self.elapsed() })
    }

    /// Record for the current solve, if there is one and a player is set.
    ///
    /// Moves and time both come from the first solve of the run.
    #[must_use]
    pub fn score_record(&self) -> Option<ScoreRecord> {
        let player = self.player.as_ref()?;
        let solved = self.solved_stats()?;
        Some(ScoreRecord::new(player.clone(), solved.moves, solved.elapsed.as_secs()))
    }

    /// Submit the current solve and fetch the ranked list.
    ///
    /// Service failures are logged and reported as `Unavailable`; the
    /// puzzle state is never affected.
    pub fn submit_win<S: ScoreService + ?Sized>(&self, service: &mut S) -> LeaderboardView {
        let Some(record) = self.score_record() else {
            return LeaderboardView::Unavailable;
        };
        if let Err(e) = service.submit_score(&record) {
            tracing::warn!(error = %e, player = %record.player, "score submission failed");
            return LeaderboardView::Unavailable;
        }
        LeaderboardView::from_fetch(service.fetch_top_scores(self.config.leaderboard_size))
    }
}

/// Shell-level puzzle input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleInput {
    /// Click on the tile at this index.
    Slide(usize),
    Shuffle,
}

impl<C: Clock> GameEngine for SlidingPuzzle<C> {
    type Input = PuzzleInput;
    type Outcome = PuzzleSolved;

    fn reset(&mut self) {
        self.initialize();
    }

    fn handle(&mut self, input: PuzzleInput) -> Result<(), MoveError> {
        match input {
            PuzzleInput::Slide(index) => self.try_apply_move(index).map(|_| ()),
            PuzzleInput::Shuffle => {
                self.shuffle();
                Ok(())
            }
        }
    }

    /// Solved by a move in this run.
    fn outcome(&self) -> Option<PuzzleSolved> {
        self.solved_stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;
    use crate::puzzle::InMemoryScoreService;

    fn puzzle() -> (SlidingPuzzle<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let game =
            SlidingPuzzle::with_clock(PuzzleConfig::default().with_seed(42), clock.clone()).unwrap();
        (game, clock)
    }

    #[test]
    fn test_initial_state() {
        let (game, _) = puzzle();
        assert!(game.is_solved());
        assert_eq!(game.move_count(), 0);
        assert_eq!(game.elapsed(), Duration::ZERO);
        assert!(!game.is_timer_running());
        assert_eq!(game.outcome(), None);
    }

    #[test]
    fn test_move_and_back() {
        let (mut game, _) = puzzle();

        let mut legal = game.legal_moves().to_vec();
        legal.sort_unstable();
        assert_eq!(legal, vec![11, 14]);

        assert!(game.apply_move(11));
        // Index 11 held 12; it slides down into index 15.
        let mut expected: Vec<Tile> = (1..=11).map(Some).collect();
        expected.extend([None, Some(13), Some(14), Some(15), Some(12)]);
        assert_eq!(game.cells().as_slice(), expected.as_slice());
        assert!(!game.is_solved());
        assert_eq!(game.move_count(), 1);

        let report = game.try_apply_move(15).unwrap();
        assert!(report.solved_now);
        assert_eq!(report.moves, 2);
        assert!(game.is_solved());
    }

    #[test]
    fn test_non_adjacent_is_noop() {
        let (mut game, _) = puzzle();
        let before = *game.board();

        assert!(!game.apply_move(0));
        assert_eq!(
            game.try_apply_move(0),
            Err(MoveError::NotAdjacent { index: 0, empty: 15 })
        );
        assert_eq!(game.try_apply_move(16), Err(MoveError::OutOfRange { index: 16 }));
        assert_eq!(*game.board(), before);
        assert_eq!(game.move_count(), 0);
        assert!(!game.is_timer_running());
    }

    #[test]
    fn test_timer_starts_on_first_move() {
        let (mut game, clock) = puzzle();

        game.shuffle();
        clock.advance(Duration::from_secs(30));
        assert!(!game.is_timer_running());
        assert_eq!(game.elapsed(), Duration::ZERO);

        let first = game.hint();
        assert!(game.apply_move(first));
        assert!(game.is_timer_running());

        clock.advance(Duration::from_secs(65));
        assert_eq!(game.elapsed_display(), "01:05");
    }

    #[test]
    fn test_timer_freezes_on_solve() {
        let (mut game, clock) = puzzle();

        game.apply_move(14);
        clock.advance(Duration::from_secs(7));
        game.apply_move(15);
        assert!(game.is_solved());
        assert!(!game.is_timer_running());

        clock.advance(Duration::from_secs(100));
        assert_eq!(game.elapsed(), Duration::from_secs(7));
        assert_eq!(
            game.outcome(),
            Some(PuzzleSolved { moves: 2, elapsed: Duration::from_secs(7) })
        );
    }

    #[test]
    fn test_solve_reported_once_per_run() {
        let (mut game, _) = puzzle();
        game.apply_move(14);
        assert!(game.try_apply_move(15).unwrap().solved_now);

        game.apply_move(14);
        assert!(!game.try_apply_move(15).unwrap().solved_now);
        assert_eq!(game.move_count(), 4);
    }

    #[test]
    fn test_shuffle_clears_stats() {
        let (mut game, _) = puzzle();
        game.apply_move(14);
        game.shuffle();

        assert_eq!(game.move_count(), 0);
        assert!(!game.is_timer_running());
        assert!(game.board().is_permutation());
        assert!(game.board().is_solvable());
    }

    #[test]
    fn test_shuffle_deterministic_with_seed() {
        let (mut a, _) = puzzle();
        let (mut b, _) = puzzle();
        a.shuffle();
        b.shuffle();
        assert_eq!(a.board(), b.board());
    }

    #[test]
    fn test_hint_does_not_mutate() {
        let (game, _) = puzzle();
        let before = *game.board();
        assert_eq!(game.hint(), 11);
        assert_eq!(*game.board(), before);
    }

    #[test]
    fn test_initialize_restores_solved() {
        let (mut game, _) = puzzle();
        game.shuffle();
        game.apply_move(game.hint());
        game.initialize();

        assert!(game.is_solved());
        assert_eq!(game.move_count(), 0);
    }

    #[test]
    fn test_submit_win_requires_player_and_solve() {
        let (mut game, _) = puzzle();
        let mut service = InMemoryScoreService::new();

        game.apply_move(14);
        game.apply_move(15);
        assert_eq!(game.submit_win(&mut service), LeaderboardView::Unavailable);

        game.set_player(Some("ada".into()));
        let view = game.submit_win(&mut service);
        assert_eq!(
            view,
            LeaderboardView::Available(vec![ScoreRecord::new("ada", 2, 0)])
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let reversed = PuzzleConfig::default().with_shuffle_range(10, 5).with_seed(1);
        assert!(matches!(
            SlidingPuzzle::with_clock(reversed, ManualClock::new()),
            Err(ConfigError::Invalid(_))
        ));

        let zero = PuzzleConfig::default().with_shuffle_moves(0);
        assert!(SlidingPuzzle::new(zero).is_err());

        let single = PuzzleConfig::default().with_shuffle_moves(1).with_seed(1);
        let mut game = SlidingPuzzle::new(single).unwrap();
        game.shuffle();
        assert!(!game.is_solved());
    }

    #[test]
    fn test_resolve_keeps_first_solve_record() {
        let (mut game, clock) = puzzle();
        game.set_player(Some("ada".into()));

        game.apply_move(14);
        clock.advance(Duration::from_secs(5));
        game.apply_move(15);
        assert_eq!(game.score_record(), Some(ScoreRecord::new("ada", 2, 5)));

        // Leaving the solved state hides the record until it is solved again.
        game.apply_move(14);
        clock.advance(Duration::from_secs(40));
        assert_eq!(game.score_record(), None);
        assert_eq!(game.outcome(), None);

        game.apply_move(15);
        assert_eq!(game.move_count(), 4);
        assert_eq!(game.score_record(), Some(ScoreRecord::new("ada", 2, 5)));
        assert_eq!(
            game.outcome(),
            Some(PuzzleSolved { moves: 2, elapsed: Duration::from_secs(5) })
        );
    }

    #[test]
    fn test_snapshot_restore() {
        let (mut game, clock) = puzzle();
        game.set_player(Some("ada".into()));
        game.shuffle();
        game.apply_move(game.hint());
        game.apply_move(game.hint());
        clock.advance(Duration::from_secs(30));
        let saved = game.snapshot();
        assert_eq!(saved.moves, 2);
        assert_eq!(saved.elapsed_ms, 30_000);

        let json = serde_json::to_string(&saved).unwrap();
        let saved: PuzzleSnapshot = serde_json::from_str(&json).unwrap();

        let (mut resumed, later) = puzzle();
        later.advance(Duration::from_secs(100));
        resumed.restore(&saved).unwrap();
        assert_eq!(resumed.board(), game.board());
        assert_eq!(resumed.move_count(), 2);
        assert_eq!(resumed.player(), Some("ada"));
        assert!(resumed.is_timer_running());

        later.advance(Duration::from_secs(15));
        assert_eq!(resumed.elapsed(), Duration::from_secs(45));

        // Both sessions continue the same random stream.
        game.shuffle();
        resumed.shuffle();
        assert_eq!(game.board(), resumed.board());
    }

    #[test]
    fn test_restore_rejects_bad_board() {
        let (mut game, _) = puzzle();
        let mut saved = game.snapshot();
        saved.board =
            serde_json::from_str(r#"{"cells":[1,1,2,3,4,5,6,7,8,9,10,11,12,13,14,null]}"#).unwrap();

        assert!(game.restore(&saved).is_err());
        assert!(game.is_solved());
    }

    #[test]
    fn test_blank_player_signs_out() {
        let (mut game, _) = puzzle();
        game.set_player(Some("   ".into()));
        assert_eq!(game.player(), None);
    }

    #[test]
    fn test_engine_trait() {
        let (mut game, _) = puzzle();
        let accepted = game.drive([
            PuzzleInput::Slide(0),
            PuzzleInput::Slide(11),
            PuzzleInput::Slide(15),
            PuzzleInput::Slide(11),
        ]);

        assert_eq!(accepted, 2);
        assert!(game.is_over());

        GameEngine::reset(&mut game);
        assert!(!game.is_over());
    }
}
