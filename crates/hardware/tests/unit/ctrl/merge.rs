use crate::common::harness::TestContext;
use pretty_assertions::assert_eq;
use sdram_core::ctrl::port::Port;

/// Both video ports pending at the same address and direction complete as
/// one 16-bit transaction, acknowledged in the same tick.
#[test]
fn matching_video_reads_merge() {
    let mut ctx = TestContext::new();
    ctx.poke_word(Port::VideoA, 0x10, 0xBEEF);
    ctx.request(Port::VideoA, 0x10, 0, false);
    ctx.request(Port::VideoB, 0x10, 0, false);

    let a_ticks = ctx.wait_ack(Port::VideoA, 16);
    assert!(!ctx.sim.ctrl.ports.video_b.pending());
    assert_eq!(a_ticks, 12);

    assert_eq!(ctx.rdata(Port::VideoA), 0xEF);
    assert_eq!(ctx.rdata(Port::VideoB), 0xBE);
    assert_eq!(ctx.sim.ctrl.stats.merged, 1);
    assert_eq!(ctx.sim.ctrl.stats.activates[2], 1);
}

/// A merged write drives both byte lanes: A supplies the low byte, B the
/// high byte.
#[test]
fn matching_video_writes_merge_into_one_word() {
    let mut ctx = TestContext::new();
    ctx.request(Port::VideoA, 0x20, 0x34, true);
    ctx.request(Port::VideoB, 0x20, 0x12, true);

    let _ = ctx.wait_ack(Port::VideoA, 16);
    assert!(!ctx.sim.ctrl.ports.video_b.pending());

    assert_eq!(ctx.peek_word(Port::VideoA, 0x20), 0x1234);
    assert_eq!(ctx.rdata(Port::VideoA), 0x34);
    assert_eq!(ctx.rdata(Port::VideoB), 0x12);
    assert_eq!(ctx.sim.ctrl.stats.merged, 1);
}

/// Different addresses do not merge; the ports are serviced one per cycle
/// with A first.
#[test]
fn mismatched_addresses_are_serviced_separately() {
    let mut ctx = TestContext::new();
    ctx.poke_word(Port::VideoA, 0x02, 0x00AA);
    ctx.poke_word(Port::VideoA, 0x04, 0x00BB);
    ctx.request(Port::VideoA, 0x02, 0, false);
    ctx.request(Port::VideoB, 0x04, 0, false);

    assert_eq!(ctx.wait_ack(Port::VideoA, 16), 12);
    assert!(ctx.sim.ctrl.ports.video_b.pending());
    assert_eq!(ctx.wait_ack(Port::VideoB, 16), 8);

    assert_eq!(ctx.rdata(Port::VideoA), 0xAA);
    assert_eq!(ctx.rdata(Port::VideoB), 0xBB);
    assert_eq!(ctx.sim.ctrl.stats.merged, 0);
    assert_eq!(ctx.sim.ctrl.stats.activates[2], 2);
}

/// Same address but opposite directions must not merge.
#[test]
fn mismatched_directions_are_serviced_separately() {
    let mut ctx = TestContext::new();
    ctx.request(Port::VideoA, 0x08, 0x5A, true);
    ctx.request(Port::VideoB, 0x08, 0, false);

    let _ = ctx.wait_ack(Port::VideoA, 16);
    assert!(ctx.sim.ctrl.ports.video_b.pending());
    let _ = ctx.wait_ack(Port::VideoB, 16);

    assert_eq!(ctx.sim.ctrl.stats.merged, 0);
    // B's read observes A's earlier write on the shared low byte lane.
    assert_eq!(ctx.rdata(Port::VideoB), 0x5A);
}

/// A lone video requester is serviced unmerged through slot 2.
#[test]
fn single_video_port_reads_its_own_byte_lane() {
    let mut ctx = TestContext::new();
    ctx.poke_word(Port::VideoB, 0x06, 0xA1B2);
    assert_eq!(ctx.read(Port::VideoB, 0x06), 0xB2);
    assert_eq!(ctx.read(Port::VideoB, 0x07), 0xA1);
    assert_eq!(ctx.sim.ctrl.stats.merged, 0);
}
