//! Multiply/divide unit tests.

use rstest::rstest;
use rv32sim_core::core::units::muldiv::{DivOp, MulOp, MultiCycleUnit, divide, multiply};

// ══════════════════════════════════════════════════════════
// 1. Functional results
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(MulOp::Mul, 7, 6, 42)]
#[case(MulOp::Mul, 0x8000_0000, 2, 0)] // low half wraps
#[case(MulOp::Mulh, (-1i32) as u32, (-1i32) as u32, 0)] // (-1)*(-1) = 1, high = 0
#[case(MulOp::Mulh, 0x4000_0000, 4, 1)]
#[case(MulOp::Mulhu, 0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFE)]
#[case(MulOp::Mulhsu, (-1i32) as u32, 0xFFFF_FFFF, 0xFFFF_FFFF)] // -1 * max_u, high half
fn multiply_results(#[case] op: MulOp, #[case] a: u32, #[case] b: u32, #[case] want: u32) {
    assert_eq!(multiply(op, a, b), want);
}

#[rstest]
#[case(DivOp::Div, 42, 6, 7)]
#[case(DivOp::Div, (-42i32) as u32, 6, (-7i32) as u32)]
#[case(DivOp::Rem, 43, 6, 1)]
#[case(DivOp::Rem, (-43i32) as u32, 6, (-1i32) as u32)]
#[case(DivOp::Divu, 0xFFFF_FFFE, 2, 0x7FFF_FFFF)]
#[case(DivOp::Remu, 7, 4, 3)]
fn divide_results(#[case] op: DivOp, #[case] a: u32, #[case] b: u32, #[case] want: u32) {
    assert_eq!(divide(op, a, b), want);
}

// ══════════════════════════════════════════════════════════
// 2. RV32M edge cases
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(DivOp::Div, 17, 0, u32::MAX)]
#[case(DivOp::Divu, 17, 0, u32::MAX)]
#[case(DivOp::Rem, 17, 0, 17)]
#[case(DivOp::Remu, 17, 0, 17)]
fn division_by_zero(#[case] op: DivOp, #[case] a: u32, #[case] b: u32, #[case] want: u32) {
    assert_eq!(divide(op, a, b), want);
}

#[test]
fn signed_overflow_division() {
    let min = i32::MIN as u32;
    let neg1 = (-1i32) as u32;
    assert_eq!(divide(DivOp::Div, min, neg1), min);
    assert_eq!(divide(DivOp::Rem, min, neg1), 0);
}

// ══════════════════════════════════════════════════════════
// 3. Latency handshake
// ══════════════════════════════════════════════════════════

#[test]
fn result_appears_after_latency_ticks() {
    let mut unit = MultiCycleUnit::new(4);
    unit.start(0x100, 42);
    for _ in 0..4 {
        assert!(unit.busy());
        assert_eq!(unit.result(), None);
        unit.tick();
    }
    assert!(!unit.busy());
    assert_eq!(unit.result(), Some(42));
    assert_eq!(unit.occupant(), Some(0x100));
}

#[test]
fn result_holds_until_release() {
    // A memory stall downstream can pin the finished instruction in
    // execute for several cycles; the result must stay valid.
    let mut unit = MultiCycleUnit::new(2);
    unit.start(0x200, 9);
    unit.tick();
    unit.tick();
    for _ in 0..3 {
        assert_eq!(unit.result(), Some(9));
        unit.tick();
    }
    unit.release();
    assert_eq!(unit.result(), None);
    assert_eq!(unit.occupant(), None);
}

#[test]
fn release_allows_same_pc_to_start_again() {
    // A loop re-executing the same multiply address must restart the unit.
    let mut unit = MultiCycleUnit::new(1);
    unit.start(0x300, 5);
    unit.tick();
    assert_eq!(unit.result(), Some(5));
    unit.release();
    unit.start(0x300, 6);
    assert_eq!(unit.result(), None);
    unit.tick();
    assert_eq!(unit.result(), Some(6));
}
