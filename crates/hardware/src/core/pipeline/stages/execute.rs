//! Execute stage: ALU, multiplier, divider, and CSR access.
//!
//! Operands are re-resolved against the forwarding network every cycle,
//! so a value produced while this instruction waited in ID is picked up
//! here. M-extension instructions are routed to the multiplier (funct3
//! 0-3) or divider (funct3 4-7); the stage tracks which instruction
//! address occupies each unit so a stalled instruction does not pulse
//! `start` again every cycle.

use crate::core::arch::CsrFile;
use crate::core::pipeline::hazards::Forwards;
use crate::core::pipeline::latches::{ExMemEntry, IdExEntry};
use crate::core::pipeline::signals::{CsrOp, OpASrc, OpBSrc};
use crate::core::units::muldiv::{divide, multiply};
use crate::core::units::{MultiCycleUnit, alu};

/// Combinational outputs of the execute stage for one cycle.
pub struct ExecOut {
    /// Value driven onto the EX/MEM latch input (a bubble while stalled).
    pub exmem_input: ExMemEntry,
    /// A multi-cycle unit is still counting down.
    pub stall: bool,
    /// CSR write to apply when this instruction leaves execute.
    pub csr_write: Option<(u32, u32)>,
    /// The multiplier's occupant finished this cycle.
    pub mul_done: bool,
    /// The divider's occupant finished this cycle.
    pub div_done: bool,
}

/// Execute stage state: the two multi-cycle units.
pub struct ExecuteStage {
    /// Multiplier unit.
    pub mul: MultiCycleUnit,
    /// Divider unit.
    pub div: MultiCycleUnit,
}

impl ExecuteStage {
    /// Creates the stage with the configured unit latencies.
    pub fn new(mul_latency: u32, div_latency: u32) -> Self {
        Self {
            mul: MultiCycleUnit::new(mul_latency),
            div: MultiCycleUnit::new(div_latency),
        }
    }

    /// Evaluates one cycle of execute.
    pub fn evaluate(&mut self, entry: &IdExEntry, fwd: &Forwards, csr: &mut CsrFile) -> ExecOut {
        let mut out = ExecOut {
            exmem_input: ExMemEntry::default(),
            stall: false,
            csr_write: None,
            mul_done: false,
            div_done: false,
        };
        if !entry.valid {
            return out;
        }

        let rv1 = fwd.resolve(entry.rs1, entry.rv1);
        let rv2 = fwd.resolve(entry.rs2, entry.rv2);
        let op_a = match entry.ctrl.a_src {
            OpASrc::Reg1 => rv1,
            OpASrc::Pc => entry.pc,
        };
        let op_b = match entry.ctrl.b_src {
            OpBSrc::Imm => entry.imm,
            OpBSrc::Reg2 => rv2,
        };

        let result = if entry.ctrl.mul.is_some() || entry.ctrl.div.is_some() {
            match self.run_muldiv(entry, rv1, rv2) {
                Some((value, mul_done)) => {
                    out.mul_done = mul_done;
                    out.div_done = !mul_done;
                    value
                }
                None => {
                    out.stall = true;
                    return out;
                }
            }
        } else if entry.ctrl.csr_op != CsrOp::None {
            let wdata = if entry.ctrl.csr_imm { entry.rv1 } else { rv1 };
            let (old, new_value) = self.run_csr(entry, wdata, csr);
            if let Some(value) = new_value {
                out.csr_write = Some((entry.ctrl.csr_addr, value));
            }
            old
        } else {
            alu::execute(entry.ctrl.alu, op_a, op_b)
        };

        out.exmem_input = ExMemEntry {
            pc: entry.pc,
            valid: true,
            rd: entry.rd,
            alu: result,
            store_data: rv2,
            ctrl: entry.ctrl,
        };
        out
    }

    /// Runs (or continues) the occupying multiply/divide operation.
    ///
    /// Returns the result and which unit produced it once the latency has
    /// elapsed; `None` while still counting down.
    fn run_muldiv(&mut self, entry: &IdExEntry, rv1: u32, rv2: u32) -> Option<(u32, bool)> {
        let is_mul = entry.ctrl.mul.is_some();
        let unit = if is_mul { &mut self.mul } else { &mut self.div };
        if unit.occupant() != Some(entry.pc) {
            // A new instruction arrived while the unit is idle. The
            // functional result is computed up front; the counter only
            // models the cycle cost.
            let value = if let Some(op) = entry.ctrl.mul {
                multiply(op, rv1, rv2)
            } else if let Some(op) = entry.ctrl.div {
                divide(op, rv1, rv2)
            } else {
                0
            };
            unit.start(entry.pc, value);
        }
        unit.result().map(|value| (value, is_mul))
    }

    /// Performs the CSR read-modify-write for this instruction.
    ///
    /// Returns the old value (destined for `rd`) and the new value to
    /// write, if the operation writes at all: `CSRRS`/`CSRRC` with a zero
    /// source, and their immediate forms with `zimm = 0`, read only.
    fn run_csr(&mut self, entry: &IdExEntry, wdata: u32, csr: &mut CsrFile) -> (u32, Option<u32>) {
        let read_suppressed = entry.ctrl.csr_op == CsrOp::Rw && entry.rd == 0;
        let old = if read_suppressed {
            0
        } else {
            csr.read(entry.ctrl.csr_addr)
        };
        let write_suppressed = match entry.ctrl.csr_op {
            CsrOp::Rs | CsrOp::Rc => {
                if entry.ctrl.csr_imm {
                    wdata == 0
                } else {
                    entry.rs1 == 0
                }
            }
            _ => false,
        };
        if write_suppressed {
            return (old, None);
        }
        let new_value = match entry.ctrl.csr_op {
            CsrOp::Rw => wdata,
            CsrOp::Rs => old | wdata,
            CsrOp::Rc => old & !wdata,
            CsrOp::None => return (old, None),
        };
        (old, Some(new_value))
    }

    /// Returns both units to their reset state.
    pub fn reset(&mut self) {
        self.mul.reset();
        self.div.reset();
    }
}
