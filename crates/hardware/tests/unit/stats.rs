use pretty_assertions::assert_eq;
use sdram_core::SimStats;

#[test]
fn new_stats_are_zeroed() {
    let stats = SimStats::new();
    assert_eq!(stats.activates, [0, 0, 0]);
    assert_eq!(stats.reads, 0);
    assert_eq!(stats.writes, 0);
    assert_eq!(stats.merged, 0);
    assert_eq!(stats.refreshes, 0);
    assert_eq!(stats.max_refresh_gap, 0);
}

#[test]
fn report_includes_every_counter() {
    let stats = SimStats {
        activates: [11, 22, 33],
        reads: 44,
        writes: 55,
        merged: 66,
        refreshes: 77,
        max_refresh_gap: 996,
        bringup_done_tick: 241,
    };
    let report = stats.report(12_345);

    assert!(report.contains("12345"));
    assert!(report.contains("slot0=11 slot1=22 slot2=33"));
    assert!(report.contains("reads:            44"));
    assert!(report.contains("writes:           55"));
    assert!(report.contains("merged video:     66"));
    assert!(report.contains("refreshes:        77"));
    assert!(report.contains("996 ticks"));
    assert!(report.contains("241"));
}
