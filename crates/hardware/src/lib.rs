//! Time-division-multiplexed SDRAM controller simulator library.
//!
//! This crate implements a cycle-accurate model of a memory controller that
//! arbitrates six logical requesters over one physical SDRAM device:
//! 1. **Controller:** 8-phase scheduler, bring-up sequencer, three phase-offset
//!    arbiter slots (with opportunistic video merging), and the refresh policy.
//! 2. **Encoding:** 4-bit command codes and the fixed bank/row/column address
//!    partition of the device among the stores.
//! 3. **Device:** A behavioral SDRAM model that closes the loop and polices
//!    the command protocol.
//! 4. **Simulation:** Tick loop, deterministic traffic generation,
//!    configuration, and statistics.

/// Common types and constants (decoded addresses, the numeric contract).
pub mod common;
/// Simulation configuration (defaults, hierarchical config structures).
pub mod config;
/// The controller core (scheduler, bring-up, slots, refresh, bus, ports).
pub mod ctrl;
/// Behavioral SDRAM device model.
pub mod device;
/// Simulation loop and traffic generation.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// The memory controller model; advance with `Controller::tick`.
pub use crate::ctrl::Controller;
/// Behavioral device model driven by command-bus semantics.
pub use crate::device::Sdram;
/// Top-level simulation state; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Activity counters for a run.
pub use crate::stats::SimStats;
