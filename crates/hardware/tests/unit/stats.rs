//! Statistics report tests.

use rv32sim_core::core::arch::CsrFile;
use rv32sim_core::core::arch::csr::{CTR_BRANCHES, CTR_CYCLE, CTR_INSTRET, CTR_MISPREDICT};
use rv32sim_core::stats::SimStats;

#[test]
fn collect_snapshots_the_counter_file() {
    let mut csr = CsrFile::new();
    for _ in 0..10 {
        csr.bump(CTR_CYCLE);
    }
    for _ in 0..4 {
        csr.bump(CTR_INSTRET);
    }
    for _ in 0..3 {
        csr.bump(CTR_BRANCHES);
    }
    csr.bump(CTR_MISPREDICT);

    let stats = SimStats::collect(&csr);
    assert_eq!(stats.cycles, 10);
    assert_eq!(stats.instructions_retired, 4);
    assert_eq!(stats.branches, 3);
    assert_eq!(stats.mispredictions, 1);
    assert_eq!(stats.stalls_mem, 0);
}

#[test]
fn ipc_is_retired_over_cycles() {
    let stats = SimStats {
        cycles: 8,
        instructions_retired: 4,
        ..Default::default()
    };
    assert!((stats.ipc() - 0.5).abs() < 1e-9);
}

#[test]
fn ipc_of_an_unticked_machine_is_zero() {
    assert_eq!(SimStats::default().ipc(), 0.0);
}

#[test]
fn accuracy_is_one_minus_mispredict_rate() {
    let stats = SimStats {
        branches: 10,
        mispredictions: 2,
        ..Default::default()
    };
    assert!((stats.prediction_accuracy() - 0.8).abs() < 1e-9);
}

#[test]
fn accuracy_with_no_branches_is_zero() {
    assert_eq!(SimStats::default().prediction_accuracy(), 0.0);
}

#[test]
fn accuracy_never_goes_negative() {
    // Unconditional-jump mispredictions can outnumber conditional
    // branches; the denominator widens rather than underflowing.
    let stats = SimStats {
        branches: 1,
        mispredictions: 4,
        ..Default::default()
    };
    assert_eq!(stats.prediction_accuracy(), 0.0);
}
