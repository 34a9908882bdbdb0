//! Bring-up sequencer.
//!
//! After reset the device requires a fixed initialization sequence before any
//! access: precharge all banks, two auto-refresh pulses, then a mode-register
//! load. The sequencer counts a cycle countdown from 31 and emits each
//! command at a designated countdown value; while it is active the main
//! pipeline is gated off entirely.

use crate::common::constants::{
    A10, INIT_COUNTDOWN, INIT_LOAD_MODE_AT, INIT_PRECHARGE_AT, INIT_REFRESH_HIGH_AT,
    INIT_REFRESH_LOW_AT, MODE_REGISTER,
};
use crate::ctrl::bus::{BusOwner, CommandBus};
use crate::ctrl::encode::CommandCode;

/// One-shot countdown state machine driving device initialization.
#[derive(Clone, Copy, Debug)]
pub struct BringUpSequencer {
    counter: u8,
}

impl Default for BringUpSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl BringUpSequencer {
    /// Creates a sequencer armed at the full countdown.
    pub fn new() -> Self {
        Self {
            counter: INIT_COUNTDOWN,
        }
    }

    /// Re-arms the countdown; called on external reset assertion.
    pub fn reset(&mut self) {
        self.counter = INIT_COUNTDOWN;
    }

    /// Whether bring-up is still in progress (main pipeline gated).
    #[inline]
    pub fn active(self) -> bool {
        self.counter > 0
    }

    /// Current countdown value.
    #[inline]
    pub fn countdown(self) -> u8 {
        self.counter
    }

    /// Advances the sequence at the given phase.
    ///
    /// The countdown decrements once per full cycle, at phase 0; the command
    /// for the new countdown value, if any, is driven the same tick.
    pub fn tick(&mut self, phase: u8, bus: &mut CommandBus) {
        if !self.active() || phase != 0 {
            return;
        }
        self.counter -= 1;
        match self.counter {
            INIT_PRECHARGE_AT => {
                tracing::debug!("bring-up: precharge all banks");
                bus.drive(BusOwner::Init, CommandCode::Precharge, 0, A10);
            }
            INIT_REFRESH_HIGH_AT | INIT_REFRESH_LOW_AT => {
                tracing::debug!(countdown = u64::from(self.counter), "bring-up: auto-refresh");
                bus.drive(BusOwner::Init, CommandCode::AutoRefresh, 0, 0);
            }
            INIT_LOAD_MODE_AT => {
                tracing::debug!("bring-up: load mode register");
                bus.drive(BusOwner::Init, CommandCode::LoadMode, 0, MODE_REGISTER);
            }
            _ => {}
        }
    }
}
