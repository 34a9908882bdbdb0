//! Phase scheduler.
//!
//! An 8-slot cyclic tick counter; every other component keys its state
//! transitions off the current phase value. No inputs, no failure modes.

use crate::common::constants::NUM_PHASES;

/// Cyclic phase counter, 0..8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PhaseScheduler {
    phase: u8,
}

impl PhaseScheduler {
    /// Creates a scheduler at phase 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase value.
    #[inline]
    pub fn current(self) -> u8 {
        self.phase
    }

    /// Advances by one phase, wrapping from the last phase back to 0.
    #[inline]
    pub fn tick(&mut self) {
        self.phase = (self.phase + 1) % NUM_PHASES;
    }
}
