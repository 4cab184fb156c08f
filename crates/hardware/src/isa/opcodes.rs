//! Opcode and function-field encoding tables for RV32I/M and the DSP ops.

/// Load upper immediate (`LUI`).
pub const OP_LUI: u32 = 0x37;
/// Add upper immediate to PC (`AUIPC`).
pub const OP_AUIPC: u32 = 0x17;
/// Jump and link (`JAL`).
pub const OP_JAL: u32 = 0x6F;
/// Jump and link register (`JALR`).
pub const OP_JALR: u32 = 0x67;
/// Conditional branches (`BEQ`..`BGEU`).
pub const OP_BRANCH: u32 = 0x63;
/// Loads (`LB`..`LHU`).
pub const OP_LOAD: u32 = 0x03;
/// Stores (`SB`..`SW`).
pub const OP_STORE: u32 = 0x23;
/// Register-immediate ALU operations.
pub const OP_IMM: u32 = 0x13;
/// Register-register ALU operations (including RV32M with funct7 = 1).
pub const OP_REG: u32 = 0x33;
/// Fences (`FENCE`, `FENCE.I`); executed as no-ops by this core.
pub const OP_MISC_MEM: u32 = 0x0F;
/// System instructions (`ECALL`, `EBREAK`, `MRET`, `WFI`, CSR accesses).
pub const OP_SYSTEM: u32 = 0x73;
/// Custom-0 opcode carrying the saturating DSP operations.
pub const OP_CUSTOM0: u32 = 0x0B;

/// funct7 value selecting the RV32M multiply/divide group on `OP_REG`.
pub const FUNCT7_MULDIV: u32 = 0x01;
/// funct7 value selecting `SUB`/`SRA` on `OP_REG` and `SRAI` on `OP_IMM`.
pub const FUNCT7_ALT: u32 = 0x20;

/// funct3 for `BEQ`.
pub const F3_BEQ: u32 = 0b000;
/// funct3 for `BNE`.
pub const F3_BNE: u32 = 0b001;
/// funct3 for `BLT`.
pub const F3_BLT: u32 = 0b100;
/// funct3 for `BGE`.
pub const F3_BGE: u32 = 0b101;
/// funct3 for `BLTU`.
pub const F3_BLTU: u32 = 0b110;
/// funct3 for `BGEU`.
pub const F3_BGEU: u32 = 0b111;

/// funct3 for saturating add (`SADD`) on the custom-0 opcode.
pub const F3_SADD: u32 = 0b000;
/// funct3 for saturating subtract (`SSUB`) on the custom-0 opcode.
pub const F3_SSUB: u32 = 0b001;

/// Immediate field value identifying `ECALL` (funct3 = 0).
pub const SYS_ECALL: u32 = 0x000;
/// Immediate field value identifying `EBREAK` (funct3 = 0).
pub const SYS_EBREAK: u32 = 0x001;
/// Immediate field value identifying `MRET` (funct3 = 0).
pub const SYS_MRET: u32 = 0x302;
/// Immediate field value identifying `WFI` (funct3 = 0); executed as a no-op.
pub const SYS_WFI: u32 = 0x105;
