//! Instruction-set definitions for RV32I, RV32M, and the DSP extension.

/// ABI register indices (`ra`, `sp`, `t0`, ...).
pub mod abi;
/// Field extraction and immediate synthesis.
pub mod decode;
/// Opcode, funct3, and funct7 encoding tables.
pub mod opcodes;
