//! Fixed constants of the RV32 instruction encoding.
//!
//! Field positions follow the base RISC-V instruction formats; these never
//! change between extensions, so they live here rather than in `isa`.

/// Canonical no-operation encoding (`ADDI x0, x0, 0`).
///
/// Injected into a pipeline latch on flush and driven by fetch when the
/// instruction port has not supplied a valid word.
pub const NOP: u32 = 0x0000_0013;

/// Mask for the 7-bit opcode field (bits 6:0).
pub const OPCODE_MASK: u32 = 0x7F;

/// Shift for the destination register field.
pub const RD_SHIFT: u32 = 7;
/// Mask for the destination register field (after shifting).
pub const RD_MASK: u32 = 0x1F;

/// Shift for the funct3 field.
pub const FUNCT3_SHIFT: u32 = 12;
/// Mask for the funct3 field (after shifting).
pub const FUNCT3_MASK: u32 = 0x7;

/// Shift for the first source register field.
pub const RS1_SHIFT: u32 = 15;
/// Mask for the first source register field (after shifting).
pub const RS1_MASK: u32 = 0x1F;

/// Shift for the second source register field.
pub const RS2_SHIFT: u32 = 20;
/// Mask for the second source register field (after shifting).
pub const RS2_MASK: u32 = 0x1F;

/// Shift for the funct7 field.
pub const FUNCT7_SHIFT: u32 = 25;
/// Mask for the funct7 field (after shifting).
pub const FUNCT7_MASK: u32 = 0x7F;

/// Number of byte lanes on the 32-bit data bus.
pub const BUS_BYTES: usize = 4;
