//! Two-tier retry state machine.
//!
//! # State Transitions
//! ```text
//! (pass p, strategy s) --failure, s+1 < len--> (p, s+1)          [no pause]
//! (pass p, strategy s) --failure, s+1 = len--> (p+1, 0)          [pause first]
//! (last pass, last strategy) --failure-------> Exhausted
//! ```
//!
//! The machine only tracks position; the caller decides what counts as a
//! failure that should advance it.

/// Where in the ladder the next attempt goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LadderPosition {
    /// Zero-based pass number.
    pub pass: u32,
    /// Zero-based index into the strategy list.
    pub strategy: usize,
}

/// Outcome of advancing after a recoverable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Try the next strategy in the same pass.
    Next(LadderPosition),
    /// The ladder was exhausted; pause, then restart from strategy 0.
    NextPass(LadderPosition),
    /// No passes left.
    Exhausted,
}

#[derive(Debug, Clone)]
pub struct LadderState {
    ladder_len: usize,
    max_passes: u32,
    position: LadderPosition,
}

impl LadderState {
    pub fn new(ladder_len: usize, max_passes: u32) -> Self {
        Self {
            ladder_len,
            max_passes,
            position: LadderPosition { pass: 0, strategy: 0 },
        }
    }

    /// First position, or `None` if there is nothing to try.
    pub fn first(&self) -> Option<LadderPosition> {
        (self.ladder_len > 0 && self.max_passes > 0).then_some(LadderPosition {
            pass: 0,
            strategy: 0,
        })
    }

    /// Advance past the current position.
    pub fn advance(&mut self) -> Step {
        let LadderPosition { pass, strategy } = self.position;
        if strategy + 1 < self.ladder_len {
            self.position = LadderPosition {
                pass,
                strategy: strategy + 1,
            };
            Step::Next(self.position)
        } else if pass + 1 < self.max_passes {
            self.position = LadderPosition {
                pass: pass + 1,
                strategy: 0,
            };
            Step::NextPass(self.position)
        } else {
            Step::Exhausted
        }
    }

    /// Attempts a fully failed run makes.
    pub fn total_attempts(&self) -> u32 {
        self.ladder_len as u32 * self.max_passes
    }
}
