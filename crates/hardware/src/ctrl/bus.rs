//! Shared command/address/data bus.
//!
//! The physical bus is bidirectional and tri-stated; the model replaces that
//! with an explicit owner tag checked once per tick. Exactly one writer may
//! issue a command per tick, the default state between transactions is
//! undriven, and the controller-driven write data (`dq_out`) and
//! device-driven read data (`dq_in`) are kept as separate lanes with a
//! conflict check where they would fight on real silicon.

use crate::ctrl::encode::CommandCode;

/// Which pipeline stage drove the bus this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusOwner {
    /// The bring-up sequencer.
    Init,
    /// One of the three arbiter slots.
    Slot(u8),
}

/// A command driven onto the bus for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IssuedCommand {
    /// Stage that owns the bus this tick.
    pub owner: BusOwner,
    /// 4-bit command code.
    pub code: CommandCode,
    /// Bank-select lines.
    pub bank: u8,
    /// 13-bit multiplexed address field (row, or column plus A10).
    pub addr: u16,
}

/// The shared bus state for the current tick.
#[derive(Debug, Default)]
pub struct CommandBus {
    issued: Option<IssuedCommand>,
    /// Byte-lane masks driven with write data (`true` = lane masked).
    pub dqm: [bool; 2],
    dq_out: Option<u16>,
    dq_in: Option<u16>,
    dq_r: Option<u16>,
}

impl CommandBus {
    /// Creates an undriven bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the bus for a new tick.
    ///
    /// The previous tick's device-driven data moves into the controller's
    /// input register (`dq_r`), which is what the capture stage reads.
    pub fn begin_tick(&mut self) {
        self.issued = None;
        self.dqm = [true, true];
        self.dq_out = None;
        self.dq_r = self.dq_in.take();
    }

    /// Drives a command onto the bus.
    ///
    /// # Panics
    ///
    /// Panics if another stage already drove a command this tick; the
    /// schedule guarantees one writer per tick, so a second drive is a
    /// controller bug, not a recoverable condition.
    pub fn drive(&mut self, owner: BusOwner, code: CommandCode, bank: u8, addr: u16) {
        assert!(
            self.issued.is_none(),
            "command bus driven twice in one tick"
        );
        tracing::trace!(
            ?owner,
            ?code,
            bank = u64::from(bank),
            addr = u64::from(addr),
            "bus command"
        );
        self.issued = Some(IssuedCommand {
            owner,
            code,
            bank,
            addr,
        });
    }

    /// Drives write data and its byte-lane mask alongside a write command.
    ///
    /// # Panics
    ///
    /// Panics if the device is driving read data this tick (a bus fight).
    pub fn drive_data(&mut self, word: u16, dqm: [bool; 2]) {
        assert!(self.dq_in.is_none(), "dq bus conflict: device is driving");
        self.dq_out = Some(word);
        self.dqm = dqm;
    }

    /// Device-side drive of read data for this tick.
    ///
    /// # Panics
    ///
    /// Panics if the controller is driving write data this tick.
    pub fn device_drive(&mut self, word: u16) {
        assert!(
            self.dq_out.is_none(),
            "dq bus conflict: controller is driving"
        );
        self.dq_in = Some(word);
    }

    /// The command driven this tick, if any.
    #[inline]
    pub fn issued(&self) -> Option<IssuedCommand> {
        self.issued
    }

    /// Controller-driven write data for this tick, if any.
    #[inline]
    pub fn write_data(&self) -> Option<(u16, [bool; 2])> {
        self.dq_out.map(|w| (w, self.dqm))
    }

    /// The device data registered from the previous tick.
    #[inline]
    pub fn captured(&self) -> Option<u16> {
        self.dq_r
    }
}
