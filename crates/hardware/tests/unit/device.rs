use pretty_assertions::assert_eq;
use sdram_core::Sdram;
use sdram_core::common::constants::{A10, CAS_LATENCY, MODE_REGISTER, REFRESH_INTERVAL};
use sdram_core::ctrl::bus::{BusOwner, CommandBus};
use sdram_core::ctrl::encode::CommandCode;

/// Drives one command and clocks the device through it.
fn step(sdram: &mut Sdram, bus: &mut CommandBus, code: CommandCode, bank: u8, addr: u16) {
    bus.begin_tick();
    bus.drive(BusOwner::Init, code, bank, addr);
    sdram.clk(bus);
}

/// One idle device tick.
fn idle(sdram: &mut Sdram, bus: &mut CommandBus) {
    bus.begin_tick();
    sdram.clk(bus);
}

fn ready_device() -> (Sdram, CommandBus) {
    let mut sdram = Sdram::new();
    let mut bus = CommandBus::new();
    step(&mut sdram, &mut bus, CommandCode::LoadMode, 0, MODE_REGISTER);
    (sdram, bus)
}

#[test]
fn load_mode_stores_the_register() {
    let (sdram, _bus) = ready_device();
    assert_eq!(sdram.mode(), Some(MODE_REGISTER));
}

#[test]
fn read_data_emerges_after_cas_latency() {
    let (mut sdram, mut bus) = ready_device();
    sdram.poke(0, 5, 7, 0xABCD);

    step(&mut sdram, &mut bus, CommandCode::Active, 0, 5);
    step(&mut sdram, &mut bus, CommandCode::Read, 0, 7);

    for _ in 0..CAS_LATENCY - 1 {
        bus.begin_tick();
        assert_eq!(bus.captured(), None);
        sdram.clk(&mut bus);
    }
    // The device drives the data this tick; the controller's input register
    // picks it up at the next tick boundary.
    idle(&mut sdram, &mut bus);
    bus.begin_tick();
    assert_eq!(bus.captured(), Some(0xABCD));
}

#[test]
fn auto_precharge_closes_the_row_on_a_read() {
    let (mut sdram, mut bus) = ready_device();
    step(&mut sdram, &mut bus, CommandCode::Active, 1, 3);
    step(&mut sdram, &mut bus, CommandCode::Read, 1, A10);
    // The row is closed, so a fresh activate on the same bank is legal.
    step(&mut sdram, &mut bus, CommandCode::Active, 1, 4);
}

#[test]
fn writes_respect_the_byte_lane_mask() {
    let (mut sdram, mut bus) = ready_device();
    step(&mut sdram, &mut bus, CommandCode::Active, 2, 9);

    bus.begin_tick();
    bus.drive(BusOwner::Init, CommandCode::Write, 2, 3);
    bus.drive_data(0x00EE, [false, true]);
    sdram.clk(&mut bus);
    assert_eq!(sdram.peek(2, 9, 3), 0x00EE);

    bus.begin_tick();
    bus.drive(BusOwner::Init, CommandCode::Write, 2, 3);
    bus.drive_data(0xDD00, [true, false]);
    sdram.clk(&mut bus);
    assert_eq!(sdram.peek(2, 9, 3), 0xDDEE);
}

#[test]
fn precharge_all_closes_every_bank() {
    let (mut sdram, mut bus) = ready_device();
    step(&mut sdram, &mut bus, CommandCode::Active, 0, 1);
    step(&mut sdram, &mut bus, CommandCode::Active, 3, 2);
    step(&mut sdram, &mut bus, CommandCode::Precharge, 0, A10);
    // Auto-refresh asserts that no row is open.
    step(&mut sdram, &mut bus, CommandCode::AutoRefresh, 0, 0);
}

#[test]
fn reset_interface_keeps_cell_contents() {
    let (mut sdram, mut bus) = ready_device();
    sdram.poke(1, 10, 20, 0x7777);

    step(&mut sdram, &mut bus, CommandCode::Active, 1, 10);
    sdram.reset_interface();
    assert_eq!(sdram.mode(), None);
    assert_eq!(sdram.peek(1, 10, 20), 0x7777);
    // Open-row state was discarded with the rest of the interface.
    step(&mut sdram, &mut bus, CommandCode::Active, 1, 11);
}

#[test]
#[should_panic(expected = "already-active row")]
fn activate_on_an_open_bank_panics() {
    let (mut sdram, mut bus) = ready_device();
    step(&mut sdram, &mut bus, CommandCode::Active, 0, 1);
    step(&mut sdram, &mut bus, CommandCode::Active, 0, 2);
}

#[test]
#[should_panic(expected = "no active row")]
fn column_access_without_an_open_row_panics() {
    let (mut sdram, mut bus) = ready_device();
    step(&mut sdram, &mut bus, CommandCode::Read, 0, 0);
}

#[test]
#[should_panic(expected = "read before mode register load")]
fn read_before_initialization_panics() {
    let mut sdram = Sdram::new();
    let mut bus = CommandBus::new();
    step(&mut sdram, &mut bus, CommandCode::Active, 0, 0);
    step(&mut sdram, &mut bus, CommandCode::Read, 0, 0);
}

#[test]
#[should_panic(expected = "write command with no data driven")]
fn write_without_data_panics() {
    let (mut sdram, mut bus) = ready_device();
    step(&mut sdram, &mut bus, CommandCode::Active, 0, 0);
    step(&mut sdram, &mut bus, CommandCode::Write, 0, 0);
}

#[test]
#[should_panic(expected = "auto-refresh with an open row")]
fn refresh_with_an_open_row_panics() {
    let (mut sdram, mut bus) = ready_device();
    step(&mut sdram, &mut bus, CommandCode::Active, 0, 0);
    step(&mut sdram, &mut bus, CommandCode::AutoRefresh, 0, 0);
}

#[test]
#[should_panic(expected = "refresh interval violated")]
fn refresh_starvation_panics() {
    let (mut sdram, mut bus) = ready_device();
    // The guard arms on the first refresh and tolerates up to twice the
    // nominal interval before declaring data loss.
    step(&mut sdram, &mut bus, CommandCode::AutoRefresh, 0, 0);
    for _ in 0..=2 * REFRESH_INTERVAL {
        idle(&mut sdram, &mut bus);
    }
}

#[test]
fn occasional_late_refresh_is_tolerated() {
    let (mut sdram, mut bus) = ready_device();
    step(&mut sdram, &mut bus, CommandCode::AutoRefresh, 0, 0);
    for _ in 0..REFRESH_INTERVAL + REFRESH_INTERVAL / 2 {
        idle(&mut sdram, &mut bus);
    }
    step(&mut sdram, &mut bus, CommandCode::AutoRefresh, 0, 0);
}
