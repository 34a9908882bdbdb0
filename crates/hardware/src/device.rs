//! Behavioral SDRAM device model.
//!
//! A functional model of the attached device, driven purely by command-bus
//! semantics: 4 banks of 8192 rows by 512 sixteen-bit columns, a mode
//! register, and a CAS-depth output pipeline. The controller is always the
//! unit under test; the device exists to close the loop and to police the
//! protocol. Violations panic:
//! 1. Column access with no active row, or activate on an already-active bank.
//! 2. Read or write before the mode register has been loaded.
//! 3. Auto-refresh while any row is open.
//! 4. Refresh starvation: more than twice the nominal interval between
//!    refresh commands.
//!
//! The model drives burst-length-1 read data for exactly one tick, CAS-latency
//! ticks after the read command, matching the mode register the controller
//! programs.

use crate::common::constants::{
    A10, CAS_LATENCY, COL_MASK, NUM_BANKS, NUM_COLS, NUM_ROWS, REFRESH_INTERVAL, ROW_MASK,
};
use crate::ctrl::bus::CommandBus;
use crate::ctrl::encode::CommandCode;

#[derive(Clone)]
struct Bank {
    cells: Vec<u16>,
    active_row: Option<usize>,
}

impl Bank {
    fn new() -> Self {
        Self {
            cells: vec![0; NUM_ROWS * NUM_COLS],
            active_row: None,
        }
    }

    fn activate(&mut self, row: usize) {
        assert!(
            self.active_row.is_none(),
            "activate on a bank with an already-active row"
        );
        self.active_row = Some(row);
    }

    fn precharge(&mut self) {
        self.active_row = None;
    }

    fn cell_index(&self, col: usize) -> usize {
        match self.active_row {
            Some(row) => row * NUM_COLS + col,
            None => panic!("column access with no active row"),
        }
    }

    fn read(&self, col: usize) -> u16 {
        self.cells[self.cell_index(col)]
    }

    fn write(&mut self, col: usize, word: u16, dqm: [bool; 2]) {
        let idx = self.cell_index(col);
        let old = self.cells[idx];
        let mut merged = old;
        if !dqm[0] {
            merged = (merged & 0xFF00) | (word & 0x00FF);
        }
        if !dqm[1] {
            merged = (merged & 0x00FF) | (word & 0xFF00);
        }
        self.cells[idx] = merged;
    }
}

/// Tracks ticks between refresh commands; panics past the device budget.
#[derive(Clone, Copy, Debug, Default)]
struct RefreshGuard {
    armed: bool,
    since: u32,
}

impl RefreshGuard {
    /// Hard limit before the model declares data loss. The nominal interval
    /// is an average-rate target; the cells tolerate an occasional late
    /// refresh, so the guard fires at twice the nominal interval.
    const LIMIT: u32 = 2 * REFRESH_INTERVAL;

    fn tick(&mut self) {
        if !self.armed {
            return;
        }
        self.since += 1;
        assert!(
            self.since <= Self::LIMIT,
            "refresh interval violated: {} ticks since last refresh",
            self.since
        );
    }

    fn refreshed(&mut self) {
        self.armed = true;
        self.since = 0;
    }
}

/// The SDRAM device: storage, mode register, and CAS output pipeline.
pub struct Sdram {
    banks: Vec<Bank>,
    mode: Option<u16>,
    dq_pipe: [Option<u16>; CAS_LATENCY as usize],
    refresh_guard: RefreshGuard,
}

impl std::fmt::Debug for Sdram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sdram")
            .field("mode", &self.mode)
            .field("refresh_guard", &self.refresh_guard)
            .finish_non_exhaustive()
    }
}

impl Default for Sdram {
    fn default() -> Self {
        Self::new()
    }
}

impl Sdram {
    /// Creates a device with all cells zero and no mode register loaded.
    pub fn new() -> Self {
        Self {
            banks: vec![Bank::new(); NUM_BANKS],
            mode: None,
            dq_pipe: [None; CAS_LATENCY as usize],
            refresh_guard: RefreshGuard::default(),
        }
    }

    /// The loaded mode-register value, if any.
    #[inline]
    pub fn mode(&self) -> Option<u16> {
        self.mode
    }

    /// Clears the interface state (mode register, open rows, output pipeline,
    /// refresh guard) while preserving cell contents. Models a reset of the
    /// surrounding system; the controller will re-run bring-up.
    pub fn reset_interface(&mut self) {
        for bank in &mut self.banks {
            bank.active_row = None;
        }
        self.mode = None;
        self.dq_pipe = [None; CAS_LATENCY as usize];
        self.refresh_guard = RefreshGuard::default();
    }

    /// Advances the device by one tick: executes this tick's bus command and
    /// shifts the CAS output pipeline, driving read data when it emerges.
    pub fn clk(&mut self, bus: &mut CommandBus) {
        self.refresh_guard.tick();

        let mut next_dq = None;
        if let Some(cmd) = bus.issued() {
            let bank = &mut self.banks[cmd.bank as usize];
            match cmd.code {
                CommandCode::Active => {
                    bank.activate(usize::from(cmd.addr & ROW_MASK));
                }
                CommandCode::Read => {
                    assert!(self.mode.is_some(), "read before mode register load");
                    next_dq = Some(bank.read(usize::from(cmd.addr & COL_MASK)));
                    if cmd.addr & A10 != 0 {
                        bank.precharge();
                    }
                }
                CommandCode::Write => {
                    assert!(self.mode.is_some(), "write before mode register load");
                    let (word, dqm) = match bus.write_data() {
                        Some(d) => d,
                        None => panic!("write command with no data driven"),
                    };
                    bank.write(usize::from(cmd.addr & COL_MASK), word, dqm);
                    if cmd.addr & A10 != 0 {
                        bank.precharge();
                    }
                }
                CommandCode::Precharge => {
                    if cmd.addr & A10 != 0 {
                        for b in &mut self.banks {
                            b.precharge();
                        }
                    } else {
                        bank.precharge();
                    }
                }
                CommandCode::AutoRefresh => {
                    assert!(
                        self.banks.iter().all(|b| b.active_row.is_none()),
                        "auto-refresh with an open row"
                    );
                    self.refresh_guard.refreshed();
                }
                CommandCode::LoadMode => {
                    self.mode = Some(cmd.addr & 0x3FFF);
                }
                CommandCode::Inhibit | CommandCode::Nop | CommandCode::BurstTerminate => {}
            }
        }

        let out = self.dq_pipe[CAS_LATENCY as usize - 1];
        for i in (1..CAS_LATENCY as usize).rev() {
            self.dq_pipe[i] = self.dq_pipe[i - 1];
        }
        self.dq_pipe[0] = next_dq;

        if let Some(word) = out {
            bus.device_drive(word);
        }
    }

    /// Directly writes a cell, bypassing the command protocol. Test and
    /// workload seeding only.
    pub fn poke(&mut self, bank: u8, row: u16, col: u16, word: u16) {
        let idx = usize::from(row & ROW_MASK) * NUM_COLS + usize::from(col & COL_MASK);
        self.banks[usize::from(bank) % NUM_BANKS].cells[idx] = word;
    }

    /// Directly reads a cell, bypassing the command protocol.
    pub fn peek(&self, bank: u8, row: u16, col: u16) -> u16 {
        let idx = usize::from(row & ROW_MASK) * NUM_COLS + usize::from(col & COL_MASK);
        self.banks[usize::from(bank) % NUM_BANKS].cells[idx]
    }
}
