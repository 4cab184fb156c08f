//! Combinational integer ALU.
//!
//! Implements the RV32I arithmetic/logic/shift/compare operations plus the
//! saturating DSP operations carried on the custom-0 opcode. The ALU is
//! purely combinational; multi-cycle multiply/divide live in `muldiv`.

/// ALU operation selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (default; also used for address generation).
    #[default]
    Add,
    /// Integer subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set less than (signed).
    Slt,
    /// Set less than unsigned.
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
    /// Saturating signed addition (DSP extension).
    SAdd,
    /// Saturating signed subtraction (DSP extension).
    SSub,
    /// Pass operand B through (used by `LUI` and CSR write data).
    PassB,
}

/// Evaluates one ALU operation.
///
/// Shift amounts use only the low five bits of operand B, matching the
/// RV32 shift encoding.
pub fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_sub(b),
        AluOp::Sll => a << (b & 0x1F),
        AluOp::Slt => u32::from((a as i32) < (b as i32)),
        AluOp::Sltu => u32::from(a < b),
        AluOp::Xor => a ^ b,
        AluOp::Srl => a >> (b & 0x1F),
        AluOp::Sra => ((a as i32) >> (b & 0x1F)) as u32,
        AluOp::Or => a | b,
        AluOp::And => a & b,
        AluOp::SAdd => (a as i32).saturating_add(b as i32) as u32,
        AluOp::SSub => (a as i32).saturating_sub(b as i32) as u32,
        AluOp::PassB => b,
    }
}
