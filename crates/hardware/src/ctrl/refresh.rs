//! Refresh policy timer.
//!
//! A free-running count of ticks since the last refresh command. Insertion is
//! opportunistic: slot 2 consults [`RefreshTimer::due`] only when it has no
//! video work and the other two slots are drained, so meeting the device's
//! maximum interval is ultimately a traffic obligation on the surrounding
//! system, not something the controller can force.

use crate::common::constants::REFRESH_DUE_THRESHOLD;

/// Ticks-since-refresh counter.
#[derive(Clone, Copy, Debug, Default)]
pub struct RefreshTimer {
    elapsed: u32,
}

impl RefreshTimer {
    /// Creates a timer at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the timer; called on external reset.
    pub fn reset(&mut self) {
        self.elapsed = 0;
    }

    /// Pre-loads the timer, accounting for ticks already elapsed since the
    /// last refresh (the bring-up tail).
    pub fn arm(&mut self, elapsed: u32) {
        self.elapsed = elapsed;
    }

    /// Advances by one tick.
    #[inline]
    pub fn tick(&mut self) {
        self.elapsed = self.elapsed.saturating_add(1);
    }

    /// Whether a refresh should be inserted at the next opportunity.
    ///
    /// The threshold sits one full cycle below the device's hard interval
    /// because the opportunity window opens only once per cycle.
    #[inline]
    pub fn due(self) -> bool {
        self.elapsed >= REFRESH_DUE_THRESHOLD
    }

    /// Ticks since the last refresh command.
    #[inline]
    pub fn elapsed(self) -> u32 {
        self.elapsed
    }

    /// Records that a refresh command was issued this tick.
    pub fn issued(&mut self) {
        self.elapsed = 0;
    }
}
