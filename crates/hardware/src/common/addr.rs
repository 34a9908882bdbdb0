//! Decoded device address type.
//!
//! A linear requester address is split by the encoder into the (bank, row,
//! column) triple the device actually sees. The strong type prevents a raw
//! linear address from being driven onto the multiplexed address bus by
//! mistake.

use crate::common::constants::{COL_MASK, NUM_BANKS, ROW_MASK};

/// A fully decoded device address: bank select plus row and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DramAddr {
    /// Bank select (0..4).
    pub bank: u8,
    /// Row address within the bank (13 bits).
    pub row: u16,
    /// Column address within the row (9 bits).
    pub col: u16,
}

impl DramAddr {
    /// Creates a decoded address, masking each field to its hardware width.
    #[inline]
    pub fn new(bank: u8, row: u16, col: u16) -> Self {
        Self {
            bank: bank % NUM_BANKS as u8,
            row: row & ROW_MASK,
            col: col & COL_MASK,
        }
    }
}
