//! Simulation statistics collection and reporting.
//!
//! This module tracks activity counters for the controller model. It provides:
//! 1. **Command counts:** Row activates per slot, reads, writes, merged video
//!    transactions, and refreshes.
//! 2. **Refresh health:** The largest observed gap between refresh commands.
//! 3. **Bring-up:** The tick at which initialization handed over to normal
//!    operation.

/// Activity counters for one simulation run.
#[derive(Clone, Debug, Default)]
pub struct SimStats {
    /// Row-activate commands issued per arbiter slot.
    pub activates: [u64; 3],
    /// Completed read transactions (a merged video read counts once).
    pub reads: u64,
    /// Completed write transactions (a merged video write counts once).
    pub writes: u64,
    /// Merged 16-bit video transactions.
    pub merged: u64,
    /// Auto-refresh commands issued during normal operation.
    pub refreshes: u64,
    /// Largest observed tick gap between consecutive refresh commands.
    pub max_refresh_gap: u32,
    /// Tick at which bring-up completed (0 if it has not).
    pub bringup_done_tick: u64,
}

impl SimStats {
    /// Creates zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders a human-readable summary for the given run length.
    pub fn report(&self, ticks: u64) -> String {
        let mut out = String::new();
        out.push_str(&format!("ticks:            {ticks}\n"));
        out.push_str(&format!(
            "bring-up done at: {}\n",
            self.bringup_done_tick
        ));
        out.push_str(&format!(
            "activates:        slot0={} slot1={} slot2={}\n",
            self.activates[0], self.activates[1], self.activates[2]
        ));
        out.push_str(&format!("reads:            {}\n", self.reads));
        out.push_str(&format!("writes:           {}\n", self.writes));
        out.push_str(&format!("merged video:     {}\n", self.merged));
        out.push_str(&format!("refreshes:        {}\n", self.refreshes));
        out.push_str(&format!(
            "max refresh gap:  {} ticks\n",
            self.max_refresh_gap
        ));
        out
    }
}
