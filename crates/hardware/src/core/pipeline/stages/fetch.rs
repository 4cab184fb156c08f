//! Instruction fetch stage.
//!
//! Owns the program counter and computes the next fetch address each
//! cycle with the following priority (highest first):
//! 1. Trap redirect from the trap controller.
//! 2. A latched pending jump deferred from a stalled cycle.
//! 3. A jump/branch resolution (or misprediction correction) from decode.
//! 4. Return address stack prediction (`JALR` with `rd = x0` and a link
//!    register source).
//! 5. Indirect target buffer prediction (other `JALR`).
//! 6. Branch target buffer prediction.
//! 7. Fall through to `pc + 4`.
//!
//! A resolution arriving while the pipeline is stalled is latched rather
//! than dropped, and applied on the cycle the stall releases; dropping it
//! would lose the control transfer entirely.

use crate::common::constants::NOP;
use crate::core::pipeline::latches::IfIdEntry;
use crate::core::units::BranchUnit;
use crate::isa::{abi, decode, opcodes};
use crate::soc::SystemBus;

/// Combinational outputs of the fetch stage for one cycle.
pub struct FetchOut {
    /// Value driven onto the IF/ID latch input.
    pub ifid_input: IfIdEntry,
    /// Next program counter.
    pub next_pc: u32,
    /// A speculative return-address pop should be committed this edge.
    pub ras_pop: bool,
    /// The BTB supplied a taken prediction this cycle.
    pub btb_used: bool,
    /// Fetch was redirected; this cycle's fetch must be squashed.
    pub redirected: bool,
}

/// Instruction fetch stage state.
pub struct FetchStage {
    pc: u32,
    pending_jump: Option<u32>,
    reset_pc: u32,
}

impl FetchStage {
    /// Creates the stage with the given reset program counter.
    pub fn new(reset_pc: u32) -> Self {
        Self {
            pc: reset_pc,
            pending_jump: None,
            reset_pc,
        }
    }

    /// Current fetch address.
    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Overrides the fetch address (program entry point).
    pub fn set_pc(&mut self, pc: u32) {
        self.pc = pc;
    }

    /// Evaluates one cycle of fetch.
    ///
    /// `redirect` is the trap-controller target, `resolved` is decode's
    /// redirect for this cycle. When `stalled`, the program counter holds
    /// and `resolved` is latched for replay on release.
    pub fn evaluate(
        &mut self,
        bru: &mut BranchUnit,
        bus: &SystemBus,
        redirect: Option<u32>,
        resolved: Option<u32>,
        stalled: bool,
    ) -> FetchOut {
        if stalled {
            if let Some(target) = resolved {
                self.pending_jump = Some(target);
            }
            return FetchOut {
                ifid_input: IfIdEntry::default(),
                next_pc: self.pc,
                ras_pop: false,
                btb_used: false,
                redirected: false,
            };
        }

        let pending = self.pending_jump.take();
        if let Some(target) = redirect.or(pending).or(resolved) {
            return FetchOut {
                ifid_input: IfIdEntry::default(),
                next_pc: target,
                ras_pop: false,
                btb_used: false,
                redirected: true,
            };
        }

        let fetched = bus.fetch(self.pc);
        let mut entry = IfIdEntry {
            pc: self.pc,
            inst: fetched.unwrap_or(NOP),
            valid: fetched.is_some(),
            pred_taken: false,
            pred_target: 0,
        };
        let mut next_pc = self.pc.wrapping_add(4);
        let mut ras_pop = false;
        let mut btb_used = false;

        if let Some(inst) = fetched {
            let op = decode::opcode(inst);
            if op == opcodes::OP_JALR && decode::rd(inst) == 0 && abi::is_link(decode::rs1(inst)) {
                if let Some(target) = bru.ras.top() {
                    next_pc = target;
                    ras_pop = true;
                    entry.pred_taken = true;
                    entry.pred_target = target;
                }
            } else if op == opcodes::OP_JALR {
                if let Some(target) = bru.ibtb.predict(self.pc) {
                    next_pc = target;
                    entry.pred_taken = true;
                    entry.pred_target = target;
                }
            } else if let Some(target) = bru.btb.predict(self.pc) {
                next_pc = target;
                btb_used = true;
                entry.pred_taken = true;
                entry.pred_target = target;
            }
        }

        FetchOut {
            ifid_input: entry,
            next_pc,
            ras_pop,
            btb_used,
            redirected: false,
        }
    }

    /// Commits the next program counter (clock edge).
    pub fn update(&mut self, next_pc: u32) {
        self.pc = next_pc;
    }

    /// Returns the stage to its reset state.
    pub fn reset(&mut self) {
        self.pc = self.reset_pc;
        self.pending_jump = None;
    }
}
