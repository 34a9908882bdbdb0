use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use sdram_core::common::constants::{A10, MODE_REGISTER};
use sdram_core::ctrl::bus::BusOwner;
use sdram_core::ctrl::encode::CommandCode;
use sdram_core::ctrl::port::Port;

/// One observed bus command: (tick it was driven, code, multiplexed address).
type Event = (u64, CommandCode, u16);

fn record_bringup(ctx: &mut TestContext) -> Vec<Event> {
    let mut events = Vec::new();
    while !ctx.sim.ctrl.init_done() {
        ctx.sim.tick();
        if let Some(cmd) = ctx.sim.bus.issued() {
            assert_eq!(cmd.owner, BusOwner::Init);
            events.push((ctx.sim.ticks - 1, cmd.code, cmd.addr));
        }
    }
    events
}

#[test]
fn emits_the_fixed_initialization_sequence() {
    let mut ctx = TestContext::cold();
    let events = record_bringup(&mut ctx);

    assert_eq!(
        events,
        vec![
            (120, CommandCode::Precharge, A10),
            (160, CommandCode::AutoRefresh, 0),
            (176, CommandCode::AutoRefresh, 0),
            (224, CommandCode::LoadMode, MODE_REGISTER),
        ]
    );
    assert_eq!(ctx.sim.ctrl.stats.bringup_done_tick, 241);
}

#[test]
fn device_mode_register_is_loaded_at_hand_off() {
    let mut ctx = TestContext::cold();
    ctx.sim.run_bringup();
    assert_eq!(ctx.sim.sdram.mode(), Some(MODE_REGISTER));
}

#[test]
fn requests_posted_during_bringup_wait_for_hand_off() {
    let mut ctx = TestContext::cold();
    ctx.request(Port::Program, 0x40, 0, false);

    ctx.sim.run_bringup();
    // Still outstanding: the main pipeline was gated the whole time.
    assert!(ctx.sim.ctrl.ports.program.pending());

    let _ = ctx.wait_ack(Port::Program, 16);
}

#[test]
fn reset_rearms_the_full_sequence() {
    let mut ctx = TestContext::cold();
    let first = record_bringup(&mut ctx);
    ctx.run(100);

    ctx.sim.reset();
    assert!(!ctx.sim.ctrl.init_done());
    let second = record_bringup(&mut ctx);
    assert_eq!(first, second);
}

#[test]
fn posted_request_survives_a_reset() {
    let mut ctx = TestContext::new();
    ctx.request(Port::Work, 0x10, 0x42, true);

    ctx.sim.reset();
    ctx.sim.run_bringup();
    assert!(ctx.sim.ctrl.ports.work.pending());

    let _ = ctx.wait_ack(Port::Work, 16);
    assert_eq!(ctx.rdata(Port::Work), 0x42);
    assert_eq!(ctx.peek_word(Port::Work, 0x10) & 0x00FF, 0x0042);
}
