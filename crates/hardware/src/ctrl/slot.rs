//! Per-slot pipeline.
//!
//! The three arbiter slots run the same three-stage pipeline — row-activate,
//! column command, data capture — offset from each other so that the shared
//! bus carries at most one command per tick. Rather than hand-unrolling three
//! copies, one parameterized pipeline is instantiated per slot with its phase
//! offset and candidate requester list.
//!
//! A latched transaction lives exactly one 8-phase cycle: captured at the
//! activate phase, consumed at the capture phase, never cancelled.

use crate::common::DramAddr;
use crate::common::constants::{A10, CAPTURE_DELAY, COLUMN_DELAY, NUM_PHASES, SLOT_OFFSETS};
use crate::ctrl::bus::{BusOwner, CommandBus};
use crate::ctrl::encode::{self, CommandCode};
use crate::ctrl::port::{Port, Ports, RequestChannel};
use crate::stats::SimStats;

/// A transaction latched at row-activate time, serviced over one cycle.
#[derive(Clone, Copy, Debug)]
pub struct PendingAccess {
    /// Owning port (possibly the merged video pseudo-port).
    pub port: Port,
    /// Decoded bank/row/column.
    pub addr: DramAddr,
    /// Byte lane of a single-byte access (low address bit).
    pub lane: usize,
    /// Direction (`true` = write).
    pub we: bool,
    /// Byte-lane mask driven with write data (`true` = lane masked).
    pub dqm: [bool; 2],
    /// Full 16-bit word driven on a write.
    pub wdata: u16,
}

impl PendingAccess {
    /// Builds the transaction for a single requester's posted request.
    ///
    /// The write data is placed on the byte lane selected by the low address
    /// bit, with the other lane masked; reads enable both lanes and select
    /// the byte at capture time instead.
    pub fn single(port: Port, ch: &RequestChannel) -> Self {
        let lane = (ch.addr & 1) as usize;
        let mut dqm = [false, false];
        if ch.we {
            dqm = [true, true];
            dqm[lane] = false;
        }
        Self {
            port,
            addr: encode::map_address(port, ch.addr),
            lane,
            we: ch.we,
            dqm,
            wdata: u16::from(ch.wdata) << (8 * lane as u32),
        }
    }

    /// Builds the merged 16-bit video transaction: A supplies the low byte,
    /// B the high byte, both lanes enabled.
    pub fn merged(a: &RequestChannel, b: &RequestChannel) -> Self {
        Self {
            port: Port::VideoMerged,
            addr: encode::map_address(Port::VideoMerged, a.addr),
            lane: 0,
            we: a.we,
            dqm: [false, false],
            wdata: u16::from(a.wdata) | (u16::from(b.wdata) << 8),
        }
    }
}

/// One arbiter slot's pipeline state.
#[derive(Clone, Copy, Debug)]
pub struct SlotPipeline {
    index: u8,
    /// Phase at which this slot evaluates its requesters and activates a row.
    pub activate_phase: u8,
    /// Phase of the matching column command (activate + 3).
    pub column_phase: u8,
    /// Phase at which read data is captured and the acknowledge flips.
    pub capture_phase: u8,
    candidates: &'static [Port],
    latch: Option<PendingAccess>,
}

impl SlotPipeline {
    /// Creates the pipeline for slot `index` with its fixed phase offsets and
    /// requester set.
    pub fn new(index: u8) -> Self {
        let activate = SLOT_OFFSETS[index as usize];
        let candidates: &'static [Port] = match index {
            0 => &[Port::Program, Port::Work, Port::Battery],
            1 => &[Port::Audio],
            _ => &[Port::VideoA, Port::VideoB],
        };
        Self {
            index,
            activate_phase: activate,
            column_phase: (activate + COLUMN_DELAY) % NUM_PHASES,
            capture_phase: (activate + CAPTURE_DELAY) % NUM_PHASES,
            candidates,
            latch: None,
        }
    }

    /// Whether a transaction is latched this cycle.
    #[inline]
    pub fn busy(&self) -> bool {
        self.latch.is_some()
    }

    /// Discards any latched transaction; called on external reset.
    pub fn clear(&mut self) {
        self.latch = None;
    }

    /// Fixed-priority selection: the first candidate with a pending request.
    pub fn arbitrate(&self, ports: &Ports) -> Option<Port> {
        self.candidates
            .iter()
            .copied()
            .find(|&p| ports.channel(p).pending())
    }

    /// Latches a transaction and drives the row-activate command.
    pub fn activate(&mut self, access: PendingAccess, bus: &mut CommandBus, stats: &mut SimStats) {
        bus.drive(
            BusOwner::Slot(self.index),
            CommandCode::Active,
            access.addr.bank,
            access.addr.row,
        );
        stats.activates[self.index as usize] += 1;
        self.latch = Some(access);
    }

    /// Drives the column command (with auto-precharge) for the latched
    /// transaction; writes drive their data and byte mask the same tick.
    pub fn column(&mut self, bus: &mut CommandBus) {
        let Some(access) = &self.latch else { return };
        let code = if access.we {
            CommandCode::Write
        } else {
            CommandCode::Read
        };
        bus.drive(
            BusOwner::Slot(self.index),
            code,
            access.addr.bank,
            access.addr.col | A10,
        );
        if access.we {
            bus.drive_data(access.wdata, access.dqm);
        }
    }

    /// Completes the latched transaction.
    ///
    /// Reads take the device word registered from the previous tick and
    /// byte-select per the latched lane (both lanes for merged video); writes
    /// pass the supplied data through to the output register at the same
    /// phase, preserving the observed same-cycle pass-through.
    pub fn capture(&mut self, bus: &CommandBus, ports: &mut Ports, stats: &mut SimStats) {
        let Some(access) = self.latch.take() else {
            return;
        };
        let word = if access.we {
            access.wdata
        } else {
            bus.captured().unwrap_or(0)
        };
        match access.port {
            Port::VideoMerged => {
                ports.video_a.complete(word as u8);
                ports.video_b.complete((word >> 8) as u8);
            }
            port => {
                let byte = (word >> (8 * access.lane as u32)) as u8;
                ports.channel_mut(port).complete(byte);
            }
        }
        if access.we {
            stats.writes += 1;
        } else {
            stats.reads += 1;
        }
    }
}
