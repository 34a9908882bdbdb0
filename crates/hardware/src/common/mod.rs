//! Common types and constants shared across the controller model.
//!
//! This module provides the fundamental building blocks used by every other
//! component. It includes:
//! 1. **Address Types:** The decoded (bank, row, column) device address.
//! 2. **Constants:** Device geometry, the phase table, bring-up countdown
//!    values, and the refresh budget.

/// Decoded device address type.
pub mod addr;

/// Fixed numeric contract of the controller.
pub mod constants;

pub use addr::DramAddr;
