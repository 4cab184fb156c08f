//! Register file tests.

use rv32sim_core::core::arch::Gpr;

#[test]
fn x0_is_hardwired_to_zero() {
    let mut gpr = Gpr::new();
    gpr.write(0, 0xDEAD_BEEF);
    assert_eq!(gpr.read(0), 0);
}

#[test]
fn writes_are_readable() {
    let mut gpr = Gpr::new();
    gpr.write(1, 0x1234);
    gpr.write(31, 0xFFFF_FFFF);
    assert_eq!(gpr.read(1), 0x1234);
    assert_eq!(gpr.read(31), 0xFFFF_FFFF);
}

#[test]
fn reset_zeroes_all_registers() {
    let mut gpr = Gpr::new();
    for i in 1..32 {
        gpr.write(i, i as u32);
    }
    gpr.reset();
    for i in 0..32 {
        assert_eq!(gpr.read(i), 0);
    }
}
