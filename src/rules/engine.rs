//! Common engine contract.
//!
//! Every game exposes the same shape to its shell:
//! - Reset to the initial state
//! - Handle one discrete input
//! - Report the terminal outcome, if any

use crate::core::error::MoveError;

/// A single-owner game engine driven by discrete inputs.
///
/// ## Implementation Notes
///
/// - `handle` must leave the state untouched when it returns `Err`
/// - `outcome` returns `None` while the game continues
/// - Timer-driven engines (snake) expose their tick as an input variant;
///   the shell owns the timer and decides when to deliver it
pub trait GameEngine {
    /// One input event (tile click, cell click, key press, tick).
    type Input;

    /// Terminal result reported once the game ends.
    type Outcome;

    /// Return to the initial state. Persistent tallies (scores, high
    /// score) follow the engine's own reset rules.
    fn reset(&mut self);

    /// Apply one input.
    fn handle(&mut self, input: Self::Input) -> Result<(), MoveError>;

    /// Terminal result, or `None` if the game continues.
    fn outcome(&self) -> Option<Self::Outcome>;

    // === Convenience Methods ===

    /// Whether the game has ended.
    fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Feed inputs until one ends the game or the inputs run out.
    ///
    /// Rejected inputs are skipped, like ignored clicks. Returns the number
    /// of inputs that were accepted.
    fn drive<I>(&mut self, inputs: I) -> usize
    where
        I: IntoIterator<Item = Self::Input>,
    {
        let mut accepted = 0;
        for input in inputs {
            if self.is_over() {
                break;
            }
            if self.handle(input).is_ok() {
                accepted += 1;
            }
        }
        accepted
    }
}
