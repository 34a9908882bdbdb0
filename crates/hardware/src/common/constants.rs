//! Global controller constants.
//!
//! This module defines the fixed numeric contract of the controller. It includes:
//! 1. **Device Geometry:** Bank/row/column widths of the attached SDRAM.
//! 2. **Schedule Constants:** Phase count, per-slot offsets, and pipeline delays.
//! 3. **Bring-up Constants:** Countdown values for the initialization sequence.
//! 4. **Refresh Constants:** Maximum refresh interval and the insertion threshold.
//!
//! None of these are configurable: the address bit-slicing and the phase table
//! must be reproduced bit-for-bit for compatibility with the real hardware.

/// Number of independently addressable banks in the device.
pub const NUM_BANKS: usize = 4;

/// Width of a row address in bits (8192 rows per bank).
pub const ROW_ADDR_BITS: u32 = 13;

/// Width of a column address in bits (512 columns per row).
pub const COL_ADDR_BITS: u32 = 9;

/// Rows per bank.
pub const NUM_ROWS: usize = 1 << ROW_ADDR_BITS;

/// Columns per row.
pub const NUM_COLS: usize = 1 << COL_ADDR_BITS;

/// Mask for extracting a row address from the multiplexed address field.
pub const ROW_MASK: u16 = (NUM_ROWS - 1) as u16;

/// Mask for extracting a column address from the multiplexed address field.
pub const COL_MASK: u16 = (NUM_COLS - 1) as u16;

/// A10 of the multiplexed address field.
///
/// On a column command it requests auto-precharge; on a precharge command it
/// selects all banks.
pub const A10: u16 = 1 << 10;

/// CAS latency in ticks (read data appears this many ticks after the column command).
pub const CAS_LATENCY: u8 = 3;

/// Number of phases in one scheduler cycle.
pub const NUM_PHASES: u8 = 8;

/// Row-activate phase for each of the three arbiter slots.
pub const SLOT_OFFSETS: [u8; 3] = [0, 2, 4];

/// Ticks from row-activate to the matching column command.
pub const COLUMN_DELAY: u8 = 3;

/// Ticks from row-activate to read-data capture (column delay + CAS latency + 1).
pub const CAPTURE_DELAY: u8 = COLUMN_DELAY + CAS_LATENCY + 1;

/// Mode-register payload loaded during bring-up.
///
/// Burst length 1, sequential addressing, CAS latency 3, standard operation,
/// single-access writes (no write burst).
pub const MODE_REGISTER: u16 = 0b000_1_00_011_0_000;

/// Initial value of the bring-up countdown; decremented once per 8-phase cycle.
pub const INIT_COUNTDOWN: u8 = 31;

/// Countdown value at which bring-up emits precharge-all.
pub const INIT_PRECHARGE_AT: u8 = 15;

/// Countdown value of the first bring-up auto-refresh.
pub const INIT_REFRESH_HIGH_AT: u8 = 10;

/// Countdown value of the second bring-up auto-refresh.
pub const INIT_REFRESH_LOW_AT: u8 = 8;

/// Countdown value at which bring-up loads the mode register.
pub const INIT_LOAD_MODE_AT: u8 = 2;

/// Ticks between the last bring-up refresh and the hand-off to normal operation.
///
/// Used to pre-arm the refresh timer so that the device-side interval is
/// accounted from the last refresh actually issued, not from the hand-off.
pub const INIT_REFRESH_TAIL_TICKS: u32 = INIT_REFRESH_LOW_AT as u32 * NUM_PHASES as u32;

/// Maximum ticks the device tolerates between refresh commands
/// (64 ms budget / 8192 rows at the nominal clock).
pub const REFRESH_INTERVAL: u32 = 1000;

/// Refresh-timer value at which an idle slot-2 cycle inserts a refresh.
///
/// The opportunity is evaluated once per 8-phase cycle, so the threshold sits
/// one cycle below the hard interval to keep the issued gap within it.
pub const REFRESH_DUE_THRESHOLD: u32 = REFRESH_INTERVAL - NUM_PHASES as u32;

/// Program-store address width in bits (spans two banks by its top bit).
pub const PROGRAM_ADDR_BITS: u32 = 24;

/// Work-store address width in bits (32 KiB).
pub const WORK_ADDR_BITS: u32 = 15;

/// Battery-store address width in bits (8 KiB).
pub const BATTERY_ADDR_BITS: u32 = 13;

/// Audio-store address width in bits (128 KiB).
pub const AUDIO_ADDR_BITS: u32 = 17;

/// Video-store address width in bits (128 KiB per port).
pub const VIDEO_ADDR_BITS: u32 = 17;

/// Bank holding the work and battery stores.
pub const WORK_BATTERY_BANK: u8 = 2;

/// Bank holding the audio and video stores.
pub const AUDIO_VIDEO_BANK: u8 = 3;

/// High-order row prefix of the work store within its bank.
pub const WORK_ROW_BASE: u16 = 0x0000;

/// High-order row prefix of the battery store within its bank.
pub const BATTERY_ROW_BASE: u16 = 0x1000;

/// High-order row prefix of the audio store within its bank.
pub const AUDIO_ROW_BASE: u16 = 0x0000;

/// High-order row prefix of the video stores within their bank.
pub const VIDEO_ROW_BASE: u16 = 0x1000;
