//! Indirect Branch Target Buffer tests.

use rv32sim_core::core::units::bru::{Ibtb, rs1_hash};

// ══════════════════════════════════════════════════════════
// 1. Lookup and training keys
// ══════════════════════════════════════════════════════════

#[test]
fn miss_on_cold_buffer() {
    let mut ibtb = Ibtb::new(8);
    assert_eq!(ibtb.predict(0x100), None);
}

#[test]
fn predicts_trained_target_by_pc() {
    let mut ibtb = Ibtb::new(8);
    ibtb.update(0x100, rs1_hash(0x8000), 0x8000);
    assert_eq!(ibtb.predict(0x100), Some(0x8000));
    assert_eq!(ibtb.predict(0x104), None);
}

#[test]
fn same_pc_distinct_hashes_hold_distinct_targets() {
    // One jump site (a jump table) trained with two register values keeps
    // both entries; lookup returns the more recently used one.
    let mut ibtb = Ibtb::new(8);
    ibtb.update(0x100, rs1_hash(0xAAAA), 0x2000);
    ibtb.update(0x100, rs1_hash(0xBBBB), 0x3000);
    assert_eq!(ibtb.predict(0x100), Some(0x3000));
    // Re-training the first key refreshes it in place; it wins again.
    ibtb.update(0x100, rs1_hash(0xAAAA), 0x2000);
    assert_eq!(ibtb.predict(0x100), Some(0x2000));
}

#[test]
fn exact_key_retrain_updates_in_place() {
    let mut ibtb = Ibtb::new(2);
    ibtb.update(0x100, 7, 0x2000);
    ibtb.update(0x100, 7, 0x2400);
    ibtb.update(0x200, 9, 0x5000);
    // Both sites still present: the retrain did not consume a second slot.
    assert_eq!(ibtb.predict(0x200), Some(0x5000));
    assert_eq!(ibtb.predict(0x100), Some(0x2400));
}

// ══════════════════════════════════════════════════════════
// 2. LRU replacement
// ══════════════════════════════════════════════════════════

#[test]
fn eviction_removes_least_recently_used() {
    let mut ibtb = Ibtb::new(2);
    ibtb.update(0x100, 1, 0x1000);
    ibtb.update(0x200, 2, 0x2000);
    // Touch 0x100 so 0x200 is the LRU.
    assert_eq!(ibtb.predict(0x100), Some(0x1000));
    ibtb.update(0x300, 3, 0x3000);
    assert_eq!(ibtb.predict(0x200), None, "LRU entry should be evicted");
    assert_eq!(ibtb.predict(0x100), Some(0x1000));
    assert_eq!(ibtb.predict(0x300), Some(0x3000));
}

#[test]
fn reset_clears_all_entries() {
    let mut ibtb = Ibtb::new(8);
    ibtb.update(0x100, 1, 0x1000);
    ibtb.reset();
    assert_eq!(ibtb.predict(0x100), None);
}

// ══════════════════════════════════════════════════════════
// 3. Hash folding
// ══════════════════════════════════════════════════════════

#[test]
fn hash_folds_all_four_bytes() {
    assert_eq!(rs1_hash(0), 0);
    assert_eq!(rs1_hash(0x0000_00FF), 0xFF);
    assert_eq!(rs1_hash(0xFF00_0000), 0xFF);
    // Matching bytes cancel pairwise.
    assert_eq!(rs1_hash(0x1212_1212), 0);
    assert_ne!(rs1_hash(0x1000_0000), rs1_hash(0x2000_0000));
}
