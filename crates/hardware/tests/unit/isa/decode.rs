//! Field extraction and immediate synthesis tests.
//!
//! Each immediate form is checked against hand-assembled encodings from
//! the `asm` helpers, which build the words field by field.

use proptest::prelude::*;
use rv32sim_core::isa::decode;

use crate::common::asm;

// ══════════════════════════════════════════════════════════
// 1. Field extraction
// ══════════════════════════════════════════════════════════

#[test]
fn r_type_fields() {
    let inst = asm::add(3, 10, 20);
    assert_eq!(decode::opcode(inst), 0x33);
    assert_eq!(decode::rd(inst), 3);
    assert_eq!(decode::rs1(inst), 10);
    assert_eq!(decode::rs2(inst), 20);
    assert_eq!(decode::funct3(inst), 0);
    assert_eq!(decode::funct7(inst), 0);
    assert_eq!(decode::funct7(asm::sub(3, 10, 20)), 0x20);
}

#[test]
fn csr_fields() {
    let inst = asm::csrrwi(2, 0x305, 13);
    assert_eq!(decode::csr_addr(inst), 0x305);
    assert_eq!(decode::zimm(inst), 13);
}

// ══════════════════════════════════════════════════════════
// 2. Immediate synthesis
// ══════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn i_type_round_trips(imm in -2048i32..2048) {
        prop_assert_eq!(decode::imm_i(asm::addi(1, 2, imm)), imm);
    }

    #[test]
    fn s_type_round_trips(imm in -2048i32..2048) {
        prop_assert_eq!(decode::imm_s(asm::sw(1, 2, imm)), imm);
    }

    #[test]
    fn b_type_round_trips(raw in -2048i32..2048) {
        // Branch offsets are halfword aligned; bit 0 is not encoded.
        let imm = raw * 2;
        prop_assert_eq!(decode::imm_b(asm::beq(1, 2, imm)), imm);
    }

    #[test]
    fn j_type_round_trips(raw in -524_288i32..524_288) {
        let imm = raw * 2;
        prop_assert_eq!(decode::imm_j(asm::jal(1, imm)), imm);
    }
}

#[test]
fn u_type_keeps_upper_bits_only() {
    assert_eq!(decode::imm_u(asm::lui(1, 0xDEAD_B000)), 0xDEAD_B000u32 as i32);
    assert_eq!(decode::imm_u(asm::auipc(1, 0x0000_1000)), 0x1000);
}

#[test]
fn negative_immediates_sign_extend() {
    assert_eq!(decode::imm_i(asm::addi(1, 0, -1)), -1);
    assert_eq!(decode::imm_s(asm::sw(1, 2, -4)), -4);
    assert_eq!(decode::imm_b(asm::bne(1, 2, -8)), -8);
    assert_eq!(decode::imm_j(asm::jal(0, -16)), -16);
}
