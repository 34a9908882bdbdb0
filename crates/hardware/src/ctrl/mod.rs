//! The memory controller core.
//!
//! This module assembles the scheduler, bring-up sequencer, the three arbiter
//! slots, and the refresh policy into one state object with a single
//! [`Controller::tick`] transition per discrete time step. It provides:
//! 1. **Phase dispatch:** Each tick, the slots whose activate/column/capture
//!    phase matches the current phase run their stage.
//! 2. **Arbitration:** Slot 0 fixed priority (program > work > battery),
//!    slot 1 single-requester, slot 2 video with opportunistic merging.
//! 3. **Refresh insertion:** Evaluated in slot 2's idle window; a granted
//!    refresh suppresses slot-0 activation for the following cycle.
//! 4. **Reset:** Asynchronous re-arm of bring-up, discarding in-flight state.

/// Shared command/address/data bus with explicit ownership.
pub mod bus;
/// Command codes and the port address encoder.
pub mod encode;
/// Bring-up sequencer.
pub mod init;
/// Phase scheduler.
pub mod phase;
/// Requester ports and the toggle handshake.
pub mod port;
/// Refresh policy timer.
pub mod refresh;
/// Per-slot pipeline.
pub mod slot;

use crate::common::constants::INIT_REFRESH_TAIL_TICKS;
use crate::ctrl::bus::{BusOwner, CommandBus};
use crate::ctrl::encode::CommandCode;
use crate::ctrl::init::BringUpSequencer;
use crate::ctrl::phase::PhaseScheduler;
use crate::ctrl::port::Ports;
use crate::ctrl::refresh::RefreshTimer;
use crate::ctrl::slot::{PendingAccess, SlotPipeline};
use crate::stats::SimStats;

/// The time-division-multiplexed memory controller.
///
/// All per-tick register updates of the hardware collapse into one
/// [`Controller::tick`] call; execution is single-threaded and fully
/// synchronous, with the requester channels as the only external surface.
#[derive(Debug)]
pub struct Controller {
    phase: PhaseScheduler,
    init: BringUpSequencer,
    slots: [SlotPipeline; 3],
    refresh: RefreshTimer,
    /// Set when slot 2 inserted a refresh; suppresses the next slot-0
    /// arbitration so the refresh has an idle slot to complete in.
    refresh_blackout: bool,
    /// The six requester channels.
    pub ports: Ports,
    /// Activity counters.
    pub stats: SimStats,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    /// Creates a controller in the reset state, bring-up armed.
    pub fn new() -> Self {
        Self {
            phase: PhaseScheduler::new(),
            init: BringUpSequencer::new(),
            slots: [
                SlotPipeline::new(0),
                SlotPipeline::new(1),
                SlotPipeline::new(2),
            ],
            refresh: RefreshTimer::new(),
            refresh_blackout: false,
            ports: Ports::default(),
            stats: SimStats::new(),
        }
    }

    /// Current scheduler phase (the phase the next `tick` will execute).
    #[inline]
    pub fn phase(&self) -> u8 {
        self.phase.current()
    }

    /// Whether bring-up has completed and the main pipeline is running.
    #[inline]
    pub fn init_done(&self) -> bool {
        !self.init.active()
    }

    /// Asynchronous external reset: re-arms bring-up and discards all
    /// in-flight pipeline state. Posted requests on the ports survive and
    /// are serviced once bring-up completes again.
    pub fn reset(&mut self) {
        self.phase = PhaseScheduler::new();
        self.init.reset();
        for slot in &mut self.slots {
            slot.clear();
        }
        self.refresh.reset();
        self.refresh_blackout = false;
    }

    /// Advances the controller by one tick, driving `bus` for this tick.
    pub fn tick(&mut self, bus: &mut CommandBus) {
        bus.begin_tick();
        let phase = self.phase.current();

        if self.init.active() {
            self.init.tick(phase, bus);
            if !self.init.active() {
                // Hand-off: account for the ticks since the last bring-up
                // refresh so the device-side interval is honored.
                self.refresh.arm(INIT_REFRESH_TAIL_TICKS);
            }
        } else {
            self.refresh.tick();

            // Captures first: they consume data registered from the previous
            // tick and must not observe this tick's bus activity.
            for slot in &mut self.slots {
                if phase == slot.capture_phase {
                    slot.capture(bus, &mut self.ports, &mut self.stats);
                }
            }

            if phase == self.slots[0].activate_phase {
                self.slot0_evaluate(bus);
            }
            if phase == self.slots[1].activate_phase {
                if let Some(port) = self.slots[1].arbitrate(&self.ports) {
                    let access = PendingAccess::single(port, self.ports.channel(port));
                    self.slots[1].activate(access, bus, &mut self.stats);
                }
            }
            if phase == self.slots[2].activate_phase {
                self.slot2_evaluate(bus);
            }

            for slot in &mut self.slots {
                if phase == slot.column_phase {
                    slot.column(bus);
                }
            }
        }

        self.phase.tick();
    }

    /// Slot-0 evaluation: refresh blackout, else fixed-priority arbitration.
    fn slot0_evaluate(&mut self, bus: &mut CommandBus) {
        if self.refresh_blackout {
            self.refresh_blackout = false;
            return;
        }
        if let Some(port) = self.slots[0].arbitrate(&self.ports) {
            let access = PendingAccess::single(port, self.ports.channel(port));
            self.slots[0].activate(access, bus, &mut self.stats);
        }
    }

    /// Slot-2 evaluation, three mutually exclusive outcomes in order:
    /// merge, single video port, refresh opportunity.
    fn slot2_evaluate(&mut self, bus: &mut CommandBus) {
        let a = &self.ports.video_a;
        let b = &self.ports.video_b;
        let mergeable = a.pending() && b.pending() && a.addr == b.addr && a.we == b.we;

        if mergeable {
            let access = PendingAccess::merged(a, b);
            self.slots[2].activate(access, bus, &mut self.stats);
            self.stats.merged += 1;
        } else if let Some(port) = self.slots[2].arbitrate(&self.ports) {
            let access = PendingAccess::single(port, self.ports.channel(port));
            self.slots[2].activate(access, bus, &mut self.stats);
        } else if !self.slots[0].busy() && !self.slots[1].busy() && self.refresh.due() {
            tracing::debug!(
                elapsed = u64::from(self.refresh.elapsed()),
                "inserting auto-refresh"
            );
            bus.drive(BusOwner::Slot(2), CommandCode::AutoRefresh, 0, 0);
            self.stats.refreshes += 1;
            self.stats.max_refresh_gap = self.stats.max_refresh_gap.max(self.refresh.elapsed());
            self.refresh.issued();
            self.refresh_blackout = true;
        }
    }
}
