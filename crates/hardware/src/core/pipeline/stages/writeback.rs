//! Writeback stage.
//!
//! Selects the final register-write value from the ALU result, the
//! loaded data, or the link address, keyed by the selector computed in
//! decode.

use crate::core::pipeline::latches::MemWbEntry;
use crate::core::pipeline::signals::WbSrc;

/// Combinational outputs of the writeback stage for one cycle.
pub struct WbOut {
    /// Register write to perform, if any.
    pub write: Option<(usize, u32)>,
    /// Result made available to the forwarding network.
    pub forward: Option<(usize, u32)>,
    /// A real instruction retires this cycle.
    pub retired: bool,
}

/// Evaluates one cycle of writeback.
pub fn evaluate(entry: &MemWbEntry) -> WbOut {
    let value = match entry.ctrl.wb_src {
        WbSrc::Alu => entry.alu,
        WbSrc::Mem => entry.load_data,
        WbSrc::Link => entry.pc.wrapping_add(4),
    };
    let write = if entry.valid && entry.ctrl.reg_write && entry.rd != 0 {
        Some((entry.rd, value))
    } else {
        None
    };
    WbOut {
        write,
        forward: write,
        retired: entry.valid,
    }
}
