//! Core-local interrupt and trap controller.
//!
//! Arbitrates one trap decision per cycle, in priority order:
//! 1. `ECALL`/`EBREAK` resolving in decode (synchronous exceptions).
//! 2. An asserted interrupt line, gated globally by `mstatus.MIE` and
//!    individually by the matching `mie` bit (line 0 is the machine
//!    timer; lines 1 and up are external).
//! 3. `MRET` resolving in decode (trap return).
//!
//! On entry the saved PC is the jump target when a control transfer is
//! concurrently resolving, otherwise the raw fetch address; either way it
//! is exactly where execution must resume.

use crate::common::TrapCause;
use crate::core::arch::CsrFile;
use crate::core::arch::csr::{MIE_MEIE, MIE_MTIE, MSTATUS_MIE};
use crate::core::pipeline::stages::decode::DecodeOut;

/// The trap controller's decision for one cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClintAction {
    /// Enter the trap handler at `mtvec`.
    Enter {
        /// Cause to record in `mcause`.
        cause: TrapCause,
        /// PC to record in `mepc`.
        mepc: u32,
    },
    /// Return from the handler to `mepc`.
    Return,
}

impl ClintAction {
    /// Fetch redirect target implied by this action.
    pub fn target(&self, csr: &CsrFile) -> u32 {
        match self {
            ClintAction::Enter { .. } => csr.mtvec,
            ClintAction::Return => csr.mepc,
        }
    }
}

/// Arbitrates the trap decision for this cycle.
///
/// `irq_lines` carries the asserted interrupt lines; `fetch_pc` is the
/// address fetch is issuing this cycle.
pub fn arbitrate(
    csr: &CsrFile,
    dec: &DecodeOut,
    irq_lines: u32,
    fetch_pc: u32,
) -> Option<ClintAction> {
    let mepc = dec.redirect.unwrap_or(fetch_pc);
    if dec.ecall {
        return Some(ClintAction::Enter {
            cause: TrapCause::EnvironmentCall,
            mepc,
        });
    }
    if dec.ebreak {
        return Some(ClintAction::Enter {
            cause: TrapCause::Breakpoint,
            mepc,
        });
    }
    if csr.mstatus & MSTATUS_MIE != 0 {
        if irq_lines & 1 != 0 && csr.mie & MIE_MTIE != 0 {
            return Some(ClintAction::Enter {
                cause: TrapCause::TimerInterrupt,
                mepc,
            });
        }
        if irq_lines & !1 != 0 && csr.mie & MIE_MEIE != 0 {
            return Some(ClintAction::Enter {
                cause: TrapCause::ExternalInterrupt,
                mepc,
            });
        }
    }
    if dec.mret {
        return Some(ClintAction::Return);
    }
    None
}
