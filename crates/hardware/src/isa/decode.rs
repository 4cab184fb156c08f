//! Instruction field extraction and immediate synthesis.
//!
//! All accessors are pure functions over the raw 32-bit encoding; the
//! pipeline's decode stage layers control-signal generation on top.

use crate::common::constants::{
    FUNCT3_MASK, FUNCT3_SHIFT, FUNCT7_MASK, FUNCT7_SHIFT, OPCODE_MASK, RD_MASK, RD_SHIFT, RS1_MASK,
    RS1_SHIFT, RS2_MASK, RS2_SHIFT,
};

/// Extracts the 7-bit opcode field.
pub fn opcode(inst: u32) -> u32 {
    inst & OPCODE_MASK
}

/// Extracts the destination register index.
pub fn rd(inst: u32) -> usize {
    ((inst >> RD_SHIFT) & RD_MASK) as usize
}

/// Extracts the funct3 field.
pub fn funct3(inst: u32) -> u32 {
    (inst >> FUNCT3_SHIFT) & FUNCT3_MASK
}

/// Extracts the first source register index.
pub fn rs1(inst: u32) -> usize {
    ((inst >> RS1_SHIFT) & RS1_MASK) as usize
}

/// Extracts the second source register index.
pub fn rs2(inst: u32) -> usize {
    ((inst >> RS2_SHIFT) & RS2_MASK) as usize
}

/// Extracts the funct7 field.
pub fn funct7(inst: u32) -> u32 {
    (inst >> FUNCT7_SHIFT) & FUNCT7_MASK
}

/// Synthesizes the sign-extended I-type immediate (loads, `OP_IMM`, `JALR`).
pub fn imm_i(inst: u32) -> i32 {
    (inst as i32) >> 20
}

/// Synthesizes the sign-extended S-type immediate (stores).
pub fn imm_s(inst: u32) -> i32 {
    (((inst & 0xFE00_0000) as i32) >> 20) | (((inst >> 7) & 0x1F) as i32)
}

/// Synthesizes the sign-extended B-type immediate (branches).
///
/// Bit 0 is always zero; branch targets are halfword aligned.
pub fn imm_b(inst: u32) -> i32 {
    (((inst & 0x8000_0000) as i32) >> 19)
        | (((inst >> 7) & 0x1) as i32) << 11
        | (((inst >> 25) & 0x3F) as i32) << 5
        | (((inst >> 8) & 0xF) as i32) << 1
}

/// Synthesizes the U-type immediate (`LUI`, `AUIPC`): upper 20 bits, low 12 zero.
pub fn imm_u(inst: u32) -> i32 {
    (inst & 0xFFFF_F000) as i32
}

/// Synthesizes the sign-extended J-type immediate (`JAL`).
pub fn imm_j(inst: u32) -> i32 {
    (((inst & 0x8000_0000) as i32) >> 11)
        | ((inst & 0x000F_F000) as i32)
        | (((inst >> 20) & 0x1) as i32) << 11
        | (((inst >> 21) & 0x3FF) as i32) << 1
}

/// Extracts the zero-extended CSR immediate (`rs1` bit positions).
pub fn zimm(inst: u32) -> u32 {
    (inst >> RS1_SHIFT) & RS1_MASK
}

/// Extracts the 12-bit CSR address from the I-type immediate field.
pub fn csr_addr(inst: u32) -> u32 {
    inst >> 20
}
