//! Command codes and the port address encoder.
//!
//! This module is the stateless mapping layer between a logical requester
//! access and what the device pins see. It provides:
//! 1. **Command Codes:** The 4-bit {chip-select, row-select, column-select,
//!    write-enable} encodings.
//! 2. **Address Slicing:** Per-port constants that partition the device's
//!    four banks among the six stores.
//!
//! The partition: the program store spans banks 0 and 1 selected by its top
//! address bit; the work and battery stores share bank 2 under distinct
//! high-order row prefixes; the audio store and the video stores split bank 3
//! the same way. These mappings are fixed, not configuration.

use crate::common::DramAddr;
use crate::common::constants::{
    AUDIO_ADDR_BITS, AUDIO_ROW_BASE, AUDIO_VIDEO_BANK, BATTERY_ADDR_BITS, BATTERY_ROW_BASE,
    COL_MASK, PROGRAM_ADDR_BITS, VIDEO_ADDR_BITS, VIDEO_ROW_BASE, WORK_ADDR_BITS,
    WORK_BATTERY_BANK, WORK_ROW_BASE,
};
use crate::ctrl::port::Port;

/// 4-bit device command, bit order {cs, ras, cas, we} (active low on pins).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandCode {
    /// Command inhibit (device deselected).
    Inhibit,
    /// No operation.
    Nop,
    /// Row activate.
    Active,
    /// Column read.
    Read,
    /// Column write.
    Write,
    /// Burst terminate.
    BurstTerminate,
    /// Precharge one bank, or all banks with A10 set.
    Precharge,
    /// Auto-refresh.
    AutoRefresh,
    /// Load mode register.
    LoadMode,
}

impl CommandCode {
    /// The 4-bit pin encoding of this command.
    pub const fn bits(self) -> u8 {
        match self {
            Self::Inhibit => 0b1111,
            Self::Nop => 0b0111,
            Self::Active => 0b0011,
            Self::Read => 0b0101,
            Self::Write => 0b0100,
            Self::BurstTerminate => 0b0110,
            Self::Precharge => 0b0010,
            Self::AutoRefresh => 0b0001,
            Self::LoadMode => 0b0000,
        }
    }
}

/// Splits a requester's linear byte address into (bank, row, column).
///
/// The low address bit selects the byte lane within the 16-bit device word
/// and does not participate in the decode; callers keep it for the data
/// return path.
pub fn map_address(port: Port, addr: u32) -> DramAddr {
    match port {
        Port::Program => {
            let addr = addr & mask(PROGRAM_ADDR_BITS);
            let word = addr >> 1;
            DramAddr::new(
                ((addr >> (PROGRAM_ADDR_BITS - 1)) & 1) as u8,
                (word >> 9) as u16,
                word as u16 & COL_MASK,
            )
        }
        Port::Work => region(addr, WORK_ADDR_BITS, WORK_BATTERY_BANK, WORK_ROW_BASE),
        Port::Battery => region(addr, BATTERY_ADDR_BITS, WORK_BATTERY_BANK, BATTERY_ROW_BASE),
        Port::Audio => region(addr, AUDIO_ADDR_BITS, AUDIO_VIDEO_BANK, AUDIO_ROW_BASE),
        Port::VideoA | Port::VideoB | Port::VideoMerged => {
            region(addr, VIDEO_ADDR_BITS, AUDIO_VIDEO_BANK, VIDEO_ROW_BASE)
        }
    }
}

/// Decode for the fixed-prefix stores: column from the low word bits, the
/// store's remaining bits ORed under its row prefix.
fn region(addr: u32, addr_bits: u32, bank: u8, row_base: u16) -> DramAddr {
    let word = (addr & mask(addr_bits)) >> 1;
    DramAddr::new(bank, row_base | (word >> 9) as u16, word as u16 & COL_MASK)
}

const fn mask(bits: u32) -> u32 {
    (1 << bits) - 1
}
