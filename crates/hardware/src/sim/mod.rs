//! Simulation loop: controller and device side by side.
//!
//! The simulator owns the controller, the device model, and the bus between
//! them, and advances all three exactly once per discrete tick. The
//! controller drives first (commands and write data), then the device
//! consumes the command and drives any read data for the following tick —
//! the single-writer-per-tick bus model.

/// Deterministic per-port traffic generation.
pub mod traffic;

use crate::common::constants::{INIT_COUNTDOWN, NUM_PHASES};
use crate::ctrl::Controller;
use crate::ctrl::bus::CommandBus;
use crate::device::Sdram;

/// Top-level simulation state.
#[derive(Debug)]
pub struct Simulator {
    /// The controller under simulation.
    pub ctrl: Controller,
    /// The behavioral device model.
    pub sdram: Sdram,
    /// The shared command/address/data bus.
    pub bus: CommandBus,
    /// Ticks elapsed since construction or the last reset.
    pub ticks: u64,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Creates a simulator at reset, bring-up pending.
    pub fn new() -> Self {
        Self {
            ctrl: Controller::new(),
            sdram: Sdram::new(),
            bus: CommandBus::new(),
            ticks: 0,
        }
    }

    /// Advances the whole system by one tick.
    pub fn tick(&mut self) {
        let was_init = !self.ctrl.init_done();
        self.ctrl.tick(&mut self.bus);
        self.sdram.clk(&mut self.bus);
        self.ticks += 1;
        if was_init && self.ctrl.init_done() {
            self.ctrl.stats.bringup_done_tick = self.ticks;
        }
    }

    /// Runs for `n` ticks.
    pub fn run(&mut self, n: u64) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Runs until bring-up completes (bounded by the fixed sequence length).
    pub fn run_bringup(&mut self) {
        let bound = (u64::from(INIT_COUNTDOWN) + 1) * u64::from(NUM_PHASES);
        for _ in 0..bound {
            if self.ctrl.init_done() {
                break;
            }
            self.tick();
        }
    }

    /// Asynchronous external reset of controller and device interface.
    /// Device cell contents survive; all in-flight state is discarded.
    pub fn reset(&mut self) {
        self.ctrl.reset();
        self.sdram.reset_interface();
        self.bus = CommandBus::new();
        self.ticks = 0;
    }
}
