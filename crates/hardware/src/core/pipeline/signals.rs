//! Pipeline control signals generated in decode.
//!
//! This module defines the signal bundle carried alongside each
//! instruction from decode onward:
//! 1. **Operand Selection:** Sources for the two ALU inputs.
//! 2. **Memory Control:** Access width and sign extension for loads.
//! 3. **Writeback Routing:** Which result reaches the register file.
//! 4. **System Control:** CSR operation class and address.

use crate::core::units::{AluOp, DivOp, MulOp};

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use the (forwarded) `rs1` register value.
    #[default]
    Reg1,
    /// Use the instruction address (`AUIPC`).
    Pc,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use the synthesized immediate.
    #[default]
    Imm,
    /// Use the (forwarded) `rs2` register value.
    Reg2,
}

/// Writeback data source, selected in decode and consumed in writeback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WbSrc {
    /// ALU (or multiplier/divider/CSR) result.
    #[default]
    Alu,
    /// Data returned by a load.
    Mem,
    /// Link address (`pc + 4`) for `JAL`/`JALR`.
    Link,
}

/// Memory access width for loads and stores.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// No memory operation.
    #[default]
    Nop,
    /// 8-bit access (`LB`/`LBU`/`SB`).
    Byte,
    /// 16-bit access (`LH`/`LHU`/`SH`).
    Half,
    /// 32-bit access (`LW`/`SW`).
    Word,
}

/// CSR operation class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CsrOp {
    /// No CSR operation.
    #[default]
    None,
    /// CSR read-write (`CSRRW`/`CSRRWI`).
    Rw,
    /// CSR read-set (`CSRRS`/`CSRRSI`).
    Rs,
    /// CSR read-clear (`CSRRC`/`CSRRCI`).
    Rc,
}

/// Control signals computed once in decode and carried down the pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct ControlSignals {
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Enable memory read (load).
    pub mem_read: bool,
    /// Enable memory write (store).
    pub mem_write: bool,
    /// Writeback data source.
    pub wb_src: WbSrc,
    /// Width of the memory access.
    pub width: MemWidth,
    /// Load result is sign-extended.
    pub signed_load: bool,
    /// ALU operation.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
    /// Routed to the multiplier with this operation, if any.
    pub mul: Option<MulOp>,
    /// Routed to the divider with this operation, if any.
    pub div: Option<DivOp>,
    /// CSR operation class.
    pub csr_op: CsrOp,
    /// CSR address for CSR operations.
    pub csr_addr: u32,
    /// CSR operand comes from the immediate (`zimm`) forms.
    pub csr_imm: bool,
}
