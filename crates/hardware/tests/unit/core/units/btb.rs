//! Branch Target Buffer tests.

use proptest::prelude::*;
use rv32sim_core::core::units::bru::Btb;

// ══════════════════════════════════════════════════════════
// 1. Counter state machine
// ══════════════════════════════════════════════════════════

#[test]
fn cold_btb_predicts_nothing() {
    let btb = Btb::new(32);
    assert_eq!(btb.predict(0x100), None);
}

#[test]
fn first_taken_allocation_predicts_immediately() {
    // Fresh allocation starts at counter 2 ("weakly taken"), so a single
    // taken resolution is enough to predict the second visit.
    let mut btb = Btb::new(32);
    btb.update(0x100, 0x200, true);
    assert_eq!(btb.predict(0x100), Some(0x200));
}

#[test]
fn one_not_taken_drops_below_threshold() {
    let mut btb = Btb::new(32);
    btb.update(0x100, 0x200, true); // counter 2
    btb.update(0x100, 0x200, false); // counter 1
    assert_eq!(btb.predict(0x100), None, "counter 1 must not predict taken");
    // The entry is still allocated: one taken brings it back.
    btb.update(0x100, 0x200, true);
    assert_eq!(btb.predict(0x100), Some(0x200));
}

#[test]
fn strongly_taken_survives_one_not_taken() {
    let mut btb = Btb::new(32);
    btb.update(0x100, 0x200, true); // 2
    btb.update(0x100, 0x200, true); // 3
    btb.update(0x100, 0x200, false); // 2
    assert_eq!(btb.predict(0x100), Some(0x200));
}

#[test]
fn not_taken_at_counter_one_invalidates_entry() {
    let mut btb = Btb::new(32);
    btb.update(0x100, 0x200, true); // 2
    btb.update(0x100, 0x200, false); // 1
    btb.update(0x100, 0x200, false); // invalidated, not parked at 0
    // A single taken resolution must now re-allocate at counter 2 and
    // predict again; a dead entry at counter 0 would need two.
    btb.update(0x100, 0x200, true);
    assert_eq!(btb.predict(0x100), Some(0x200));
}

#[test]
fn not_taken_on_missing_entry_allocates_nothing() {
    let mut btb = Btb::new(32);
    btb.update(0x100, 0x200, false);
    assert_eq!(btb.predict(0x100), None);
}

// ══════════════════════════════════════════════════════════
// 2. Tags, aliasing, and target refresh
// ══════════════════════════════════════════════════════════

#[test]
fn tag_mismatch_is_a_miss() {
    // 0x100 and 0x100 + 32*4 alias to the same direct-mapped slot.
    let mut btb = Btb::new(32);
    btb.update(0x100, 0x200, true);
    assert_eq!(btb.predict(0x100 + 32 * 4), None);
}

#[test]
fn aliasing_taken_branch_steals_the_slot() {
    let mut btb = Btb::new(32);
    btb.update(0x100, 0x200, true);
    btb.update(0x100 + 32 * 4, 0x300, true);
    assert_eq!(btb.predict(0x100), None);
    assert_eq!(btb.predict(0x100 + 32 * 4), Some(0x300));
}

#[test]
fn taken_hit_refreshes_target() {
    // An indirect-style target change on a hit must follow the new target.
    let mut btb = Btb::new(32);
    btb.update(0x100, 0x200, true);
    btb.update(0x100, 0x280, true);
    assert_eq!(btb.predict(0x100), Some(0x280));
}

#[test]
fn reset_invalidates_everything() {
    let mut btb = Btb::new(32);
    btb.update(0x100, 0x200, true);
    btb.update(0x104, 0x300, true);
    btb.reset();
    assert_eq!(btb.predict(0x100), None);
    assert_eq!(btb.predict(0x104), None);
}

// ══════════════════════════════════════════════════════════
// 3. Properties
// ══════════════════════════════════════════════════════════

proptest! {
    /// A prediction, when made, always returns the most recent taken
    /// target trained for that PC.
    #[test]
    fn prediction_matches_last_taken_target(
        pc in (0u32..0x1000).prop_map(|x| x << 2),
        targets in proptest::collection::vec(0u32..0xFFFF_F000, 1..8),
    ) {
        let mut btb = Btb::new(32);
        for &t in &targets {
            btb.update(pc, t, true);
        }
        prop_assert_eq!(btb.predict(pc), Some(*targets.last().unwrap()));
    }

    /// Training never makes the BTB predict for an untrained PC.
    #[test]
    fn no_cross_talk_outside_the_aliased_slot(
        pc in (0u32..0x1000).prop_map(|x| x << 2),
        other in (0u32..0x1000).prop_map(|x| x << 2),
    ) {
        prop_assume!(pc != other);
        let mut btb = Btb::new(32);
        btb.update(pc, 0x4000, true);
        // Only the aliased slot may be disturbed, and even then the tag
        // check must reject the lookup.
        prop_assert_eq!(btb.predict(other), None);
    }
}
