//! Tic-tac-toe session: board, turn order, mode, and scoreboard.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::board::{Board, Evaluation, Mark, CELLS};
use super::config::{GameMode, TicTacToeConfig};
use super::minimax::{self, SearchOptions};
use crate::core::error::MoveError;
use crate::rules::GameEngine;

/// Wins per side and draws. Cleared when the mode changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    /// Tally a terminal evaluation. `InProgress` is ignored.
    pub fn record(&mut self, result: Evaluation) {
        match result {
            Evaluation::Win { mark: Mark::X, .. } => self.x_wins += 1,
            Evaluation::Win { mark: Mark::O, .. } => self.o_wins += 1,
            Evaluation::Draw => self.draws += 1,
            Evaluation::InProgress => {}
        }
    }

    #[must_use]
    pub fn wins(&self, mark: Mark) -> u32 {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    #[must_use]
    pub fn games(&self) -> u32 {
        self.x_wins + self.o_wins + self.draws
    }
}

/// What happened during one `play` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayReport {
    /// Cell the clicking player marked.
    pub index: usize,
    /// AI reply, if one was injected.
    pub ai_reply: Option<usize>,
    /// Board state after both moves.
    pub result: Evaluation,
}

/// Tic-tac-toe game session.
#[derive(Clone, Debug)]
pub struct TicTacToe {
    config: TicTacToeConfig,
    board: Board,
    to_move: Mark,
    mode: GameMode,
    result: Evaluation,
    scores: Scoreboard,
}

impl Default for TicTacToe {
    fn default() -> Self {
        Self::new(TicTacToeConfig::default())
    }
}

impl TicTacToe {
    /// Empty board, X to move, in the configured mode.
    ///
    /// If the AI plays X it opens immediately (when `auto_reply` is on).
    #[must_use]
    pub fn new(config: TicTacToeConfig) -> Self {
        let mut game = Self {
            mode: config.mode,
            config,
            board: Board::new(),
            to_move: Mark::X,
            result: Evaluation::InProgress,
            scores: Scoreboard::default(),
        };
        game.reset_game();
        game
    }

    // === Moves ===

    /// Mark `index` for `side`.
    ///
    /// Strict: checks bounds, occupancy, and turn. Records the result on the
    /// scoreboard when the move ends the game.
    pub fn apply_move(&mut self, index: usize, side: Mark) -> Result<Evaluation, MoveError> {
        if self.result.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if index >= CELLS {
            return Err(MoveError::OutOfRange { index });
        }
        if !self.board.is_empty_at(index) {
            return Err(MoveError::CellOccupied { index });
        }
        if side != self.to_move {
            return Err(MoveError::OutOfTurn {
                expected: self.to_move.as_char(),
                got: side.as_char(),
            });
        }

        self.board.place(index, side);
        self.result = self.board.evaluate();

        if self.result.is_terminal() {
            self.scores.record(self.result);
            info!(result = ?self.result, mode = ?self.mode, "tic-tac-toe game over");
        } else {
            self.to_move = side.opponent();
        }
        Ok(self.result)
    }

    /// Click on a cell.
    ///
    /// Two-player: marks for the side to move. Vs-AI: accepted only on the
    /// human's turn; when the game continues and `auto_reply` is on, the AI
    /// replies before this returns.
    pub fn try_play(&mut self, index: usize) -> Result<PlayReport, MoveError> {
        if self.mode == GameMode::VsAi && self.to_move != self.config.human_mark() {
            return Err(MoveError::NotAccepted);
        }

        let mut result = self.apply_move(index, self.to_move)?;
        let mut ai_reply = None;

        if self.mode == GameMode::VsAi && !result.is_terminal() && self.config.auto_reply {
            match self.ai_move() {
                Ok(reply) => ai_reply = Some(reply),
                Err(e) => debug!(error = %e, "AI reply skipped"),
            }
            result = self.result;
        }

        Ok(PlayReport { index, ai_reply, result })
    }

    /// Click-facing `try_play`: invalid clicks are ignored.
    pub fn play(&mut self, index: usize) -> bool {
        match self.try_play(index) {
            Ok(_) => true,
            Err(e) => {
                debug!(index, error = %e, "tic-tac-toe click ignored");
                false
            }
        }
    }

    /// Compute and apply the AI's move. Returns the chosen cell.
    pub fn ai_move(&mut self) -> Result<usize, MoveError> {
        if self.result.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if !self.ai_to_move() {
            return Err(MoveError::NotAccepted);
        }

        let options = SearchOptions::default().with_alpha_beta(self.config.alpha_beta);
        let ai = self.config.ai_mark;
        let index = minimax::search(&self.board, ai, options)
            .map(|r| r.index)
            .ok_or(MoveError::GameOver)?;

        self.apply_move(index, ai)?;
        Ok(index)
    }

    /// Whether the shell should schedule `ai_move`.
    #[must_use]
    pub fn ai_to_move(&self) -> bool {
        self.mode == GameMode::VsAi
            && !self.result.is_terminal()
            && self.to_move == self.config.ai_mark
    }

    // === Lifecycle ===

    /// Clear the board, keep the scores.
    pub fn reset_game(&mut self) {
        self.board = Board::new();
        self.to_move = Mark::X;
        self.result = Evaluation::InProgress;

        if self.ai_to_move() && self.config.auto_reply {
            if let Err(e) = self.ai_move() {
                debug!(error = %e, "AI opening skipped");
            }
        }
    }

    /// Clear the scores and start a new game.
    pub fn reset_scores(&mut self) {
        self.scores = Scoreboard::default();
        self.reset_game();
    }

    /// Switch modes. Clears the scores and starts a new game.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset_scores();
    }

    // === Queries ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    #[must_use]
    pub fn result(&self) -> Evaluation {
        self.result
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_terminal()
    }

    /// Winning triple, if someone has won.
    #[must_use]
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        match self.result {
            Evaluation::Win { line, .. } => Some(line),
            _ => None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &TicTacToeConfig {
        &self.config
    }
}

impl GameEngine for TicTacToe {
    type Input = usize;
    type Outcome = Evaluation;

    fn reset(&mut self) {
        self.reset_game();
    }

    fn handle(&mut self, index: usize) -> Result<(), MoveError> {
        self.try_play(index).map(|_| ())
    }

    fn outcome(&self) -> Option<Evaluation> {
        self.result.is_terminal().then_some(self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_player() -> TicTacToe {
        TicTacToe::new(TicTacToeConfig::default().with_mode(GameMode::TwoPlayer))
    }

    #[test]
    fn test_initial_state() {
        let game = TicTacToe::default();
        assert_eq!(*game.board(), Board::new());
        assert_eq!(game.to_move(), Mark::X);
        assert_eq!(game.mode(), GameMode::VsAi);
        assert_eq!(game.result(), Evaluation::InProgress);
        assert_eq!(game.scores().games(), 0);
    }

    #[test]
    fn test_apply_move_errors_leave_state() {
        let mut game = two_player();
        game.apply_move(4, Mark::X).unwrap();
        let before = *game.board();

        assert_eq!(game.apply_move(4, Mark::O), Err(MoveError::CellOccupied { index: 4 }));
        assert_eq!(
            game.apply_move(0, Mark::X),
            Err(MoveError::OutOfTurn { expected: 'O', got: 'X' })
        );
        assert_eq!(game.apply_move(9, Mark::O), Err(MoveError::OutOfRange { index: 9 }));
        assert_eq!(*game.board(), before);
        assert_eq!(game.to_move(), Mark::O);
    }

    #[test]
    fn test_two_player_win_and_score() {
        let mut game = two_player();
        for index in [0, 3, 1, 4] {
            assert!(game.play(index));
            assert!(game.board().is_consistent());
        }
        assert!(game.play(2));

        assert_eq!(game.result(), Evaluation::Win { mark: Mark::X, line: [0, 1, 2] });
        assert_eq!(game.winning_line(), Some([0, 1, 2]));
        assert_eq!(game.scores().x_wins, 1);

        // Further clicks are ignored and the tally does not move.
        assert!(!game.play(8));
        assert_eq!(game.scores().games(), 1);
    }

    #[test]
    fn test_two_player_draw() {
        let mut game = two_player();
        // X O X / X O O / O X X
        for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            assert!(game.play(index), "index {index}");
        }
        assert_eq!(game.result(), Evaluation::Draw);
        assert_eq!(game.scores().draws, 1);
    }

    #[test]
    fn test_vs_ai_replies_with_corner_to_center() {
        let mut game = TicTacToe::default();
        let report = game.try_play(4).unwrap();

        let reply = report.ai_reply.unwrap();
        assert!([0, 2, 6, 8].contains(&reply), "got {reply}");
        assert_eq!(game.board().get(reply), Some(Some(Mark::O)));
        assert_eq!(game.to_move(), Mark::X);
    }

    #[test]
    fn test_vs_ai_without_auto_reply() {
        let mut game = TicTacToe::new(TicTacToeConfig::default().with_auto_reply(false));
        let report = game.try_play(0).unwrap();
        assert_eq!(report.ai_reply, None);
        assert!(game.ai_to_move());

        // Human cannot move for the AI.
        assert_eq!(game.try_play(1), Err(MoveError::NotAccepted));

        let reply = game.ai_move().unwrap();
        assert_eq!(reply, 4);
        assert!(!game.ai_to_move());
    }

    #[test]
    fn test_ai_opens_when_playing_x() {
        let game = TicTacToe::new(TicTacToeConfig::default().with_ai_mark(Mark::X).with_alpha_beta(true));
        assert_eq!(game.board().count(Mark::X), 1);
        assert_eq!(game.to_move(), Mark::O);
    }

    #[test]
    fn test_ai_move_rejected_in_two_player() {
        let mut game = two_player();
        assert_eq!(game.ai_move(), Err(MoveError::NotAccepted));
    }

    #[test]
    fn test_reset_scores_and_mode_change() {
        let mut game = two_player();
        for index in [0, 3, 1, 4, 2] {
            game.play(index);
        }
        assert_eq!(game.scores().x_wins, 1);

        game.reset_game();
        assert_eq!(game.scores().x_wins, 1);
        assert!(!game.is_over());

        game.reset_scores();
        assert_eq!(game.scores().games(), 0);

        game.play(0);
        game.set_mode(GameMode::VsAi);
        assert_eq!(game.mode(), GameMode::VsAi);
        assert_eq!(*game.board(), Board::new());
        assert_eq!(game.scores().games(), 0);
    }

    #[test]
    fn test_scoreboard_record() {
        let mut scores = Scoreboard::default();
        scores.record(Evaluation::Win { mark: Mark::O, line: [0, 4, 8] });
        scores.record(Evaluation::Draw);
        scores.record(Evaluation::InProgress);

        assert_eq!(scores.wins(Mark::O), 1);
        assert_eq!(scores.wins(Mark::X), 0);
        assert_eq!(scores.draws, 1);
        assert_eq!(scores.games(), 2);
    }
}
