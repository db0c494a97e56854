//! Tic-tac-toe configuration.

use serde::{Deserialize, Serialize};

use super::board::Mark;

/// Who plays the second seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Human against the minimax AI.
    #[default]
    VsAi,
    /// Two humans sharing one board.
    TwoPlayer,
}

/// Tic-tac-toe configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicTacToeConfig {
    /// Starting mode.
    pub mode: GameMode,

    /// Symbol the AI plays in `VsAi` mode (default: O, so the human opens).
    pub ai_mark: Mark,

    /// Use alpha-beta pruning in the AI search.
    pub alpha_beta: bool,

    /// Reply to a human move immediately inside `play`. Shells that want a
    /// visible "thinking" pause turn this off and call `ai_move` later.
    pub auto_reply: bool,

    /// Suggested pause before showing the AI reply (milliseconds).
    pub ai_delay_ms: u64,
}

impl Default for TicTacToeConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::VsAi,
            ai_mark: Mark::O,
            alpha_beta: false,
            auto_reply: true,
            ai_delay_ms: 600,
        }
    }
}

impl TicTacToeConfig {
    #[must_use]
    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_ai_mark(mut self, mark: Mark) -> Self {
        self.ai_mark = mark;
        self
    }

    #[must_use]
    pub fn with_alpha_beta(mut self, enabled: bool) -> Self {
        self.alpha_beta = enabled;
        self
    }

    #[must_use]
    pub fn with_auto_reply(mut self, enabled: bool) -> Self {
        self.auto_reply = enabled;
        self
    }

    /// The human's symbol in `VsAi` mode.
    #[must_use]
    pub fn human_mark(&self) -> Mark {
        self.ai_mark.opponent()
    }
}
