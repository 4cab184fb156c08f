//! Forwarding and hazard detection.
//!
//! Read-after-write hazards are resolved in two ways:
//! 1. **Forwarding:** both the decode use-site (branch comparison) and the
//!    execute use-site (ALU operands) pull the newest in-flight value,
//!    with priority MEM-stage result > WB-stage result > register file.
//!    Register `x0` is never forwarded.
//! 2. **Stalling:** hazards forwarding cannot cover hold the front of the
//!    pipeline for one cycle; a load-use pair must wait until the load
//!    reaches writeback, and a branch whose operand is still in execute
//!    must retry its decision the next cycle.

use crate::core::pipeline::latches::IdExEntry;

/// Forwardable results visible this cycle, newest first.
#[derive(Clone, Copy, Debug, Default)]
pub struct Forwards {
    /// Result produced by the instruction in the memory stage.
    pub mem: Option<(usize, u32)>,
    /// Result produced by the instruction in the writeback stage.
    pub wb: Option<(usize, u32)>,
}

impl Forwards {
    /// Resolves one operand read with MEM > WB > register-file priority.
    pub fn resolve(&self, idx: usize, regfile_value: u32) -> u32 {
        if idx == 0 {
            return 0;
        }
        if let Some((rd, value)) = self.mem {
            if rd == idx {
                return value;
            }
        }
        if let Some((rd, value)) = self.wb {
            if rd == idx {
                return value;
            }
        }
        regfile_value
    }
}

/// Returns `true` when the instruction in execute is a load whose result
/// the instruction in decode needs this cycle.
pub fn load_use(idex: &IdExEntry, rs1: Option<usize>, rs2: Option<usize>) -> bool {
    if !idex.valid || !idex.ctrl.mem_read || idex.rd == 0 {
        return false;
    }
    rs1 == Some(idex.rd) || rs2 == Some(idex.rd)
}

/// Returns `true` when a control transfer resolving in decode would read
/// an operand whose producer has not yet passed execute.
///
/// Decode can only forward from the memory and writeback stages; a
/// producer still in execute (or a load still waiting on the bus in the
/// memory stage) makes the forwarded value stale, so the decision and all
/// predictor training must be suppressed and retried.
pub fn branch_operand(
    idex: &IdExEntry,
    mem_pending_rd: Option<usize>,
    rs1: Option<usize>,
    rs2: Option<usize>,
) -> bool {
    let in_execute = idex.valid && idex.ctrl.reg_write && idex.rd != 0;
    if in_execute && (rs1 == Some(idex.rd) || rs2 == Some(idex.rd)) {
        return true;
    }
    if let Some(rd) = mem_pending_rd {
        if rd != 0 && (rs1 == Some(rd) || rs2 == Some(rd)) {
            return true;
        }
    }
    false
}
