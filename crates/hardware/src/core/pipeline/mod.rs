//! The five-stage pipeline and its per-cycle step function.
//!
//! `Core::step` evaluates one clock cycle in two phases:
//! 1. **Evaluation (combinational):** stages run back to front —
//!    writeback, memory, execute, hazard detection, decode, trap
//!    arbitration, fetch — each computing its latch inputs and stall or
//!    redirect requests from the latch outputs of the previous edge.
//! 2. **Edge (sequential):** CSR side effects, counters, predictor
//!    training, latch captures, the program counter, the multi-cycle
//!    units, and the bus all advance at once.
//!
//! Running predictor training in the edge phase means fetch always
//! predicts from pre-update state, exactly like the hardware it models.

/// Forwarding network and hazard detection.
pub mod hazards;
/// Generic edge-triggered pipeline register.
pub mod latch;
/// Latch payload types.
pub mod latches;
/// Control signal bundle.
pub mod signals;
/// The five stage implementations.
pub mod stages;

use crate::common::TrapCause;
use crate::config::Config;
use crate::core::arch::csr::{
    CTR_BRANCHES, CTR_BTB_MISS, CTR_BTB_PREDICT, CTR_CYCLE, CTR_FLUSH, CTR_HAZARD_STALL,
    CTR_INSTRET, CTR_MEM_STALL, CTR_MISPREDICT, MSTATUS_MIE, MSTATUS_MPIE,
};
use crate::core::arch::{CsrFile, Gpr};
use crate::core::clint::{self, ClintAction};
use crate::core::units::BranchUnit;
use crate::soc::SystemBus;
use hazards::Forwards;
use latch::Latch;
use latches::{ExMemEntry, IdExEntry, IfIdEntry, MemWbEntry};
use stages::decode::{self, DecodeOut};
use stages::execute::ExecuteStage;
use stages::fetch::FetchStage;
use stages::memory::MemStage;
use stages::writeback;

/// The simulated five-stage core.
pub struct Core {
    fetch: FetchStage,
    execute: ExecuteStage,
    memory: MemStage,
    if_id: Latch<IfIdEntry>,
    id_ex: Latch<IdExEntry>,
    ex_mem: Latch<ExMemEntry>,
    mem_wb: Latch<MemWbEntry>,
    gpr: Gpr,
    csr: CsrFile,
    bru: BranchUnit,
    halted: bool,
}

impl Core {
    /// Creates a core in its reset state.
    pub fn new(config: &Config) -> Self {
        Self {
            fetch: FetchStage::new(config.system.reset_pc),
            execute: ExecuteStage::new(config.pipeline.mul_latency, config.pipeline.div_latency),
            memory: MemStage::new(),
            if_id: Latch::new(),
            id_ex: Latch::new(),
            ex_mem: Latch::new(),
            mem_wb: Latch::new(),
            gpr: Gpr::new(),
            csr: CsrFile::new(),
            bru: BranchUnit::new(&config.pipeline),
            halted: false,
        }
    }

    /// Advances the core (and the attached bus) by one clock cycle.
    pub fn step(&mut self, bus: &mut SystemBus) {
        // ── Evaluation phase, back to front ──

        // Writeback first: the register write lands before decode reads,
        // modelling a write-through register file.
        let wb = writeback::evaluate(self.mem_wb.output());
        if let Some((rd, value)) = wb.write {
            self.gpr.write(rd, value);
        }

        let mem = self.memory.evaluate(self.ex_mem.output(), bus);
        let fwd = Forwards {
            mem: mem.forward,
            wb: wb.forward,
        };

        let ex = self
            .execute
            .evaluate(self.id_ex.output(), &fwd, &mut self.csr);

        let ifid = self.if_id.output().clone();
        let (use1, use2) = decode::operand_uses(ifid.inst);
        let load_use = ifid.valid && hazards::load_use(self.id_ex.output(), use1, use2);
        let branch_hazard = ifid.valid
            && decode::is_control(ifid.inst)
            && hazards::branch_operand(self.id_ex.output(), mem.pending_rd, use1, use2);

        let mem_stall = mem.stall;
        let ex_stall = ex.stall;
        let hazard = load_use || branch_hazard;
        let front_stall = mem_stall || ex_stall || hazard;

        let dec = if hazard {
            DecodeOut::default()
        } else {
            decode::evaluate(&ifid, &self.gpr, &fwd)
        };

        // Traps are taken only on cycles where the pipeline flows.
        let trap = if front_stall {
            None
        } else {
            clint::arbitrate(&self.csr, &dec, bus.irq_lines(), self.fetch.pc())
        };
        let trap_target = trap.as_ref().map(|a| a.target(&self.csr));

        // A resolution during a bus stall is latched by fetch; during
        // shorter stalls decode simply retries once the front releases.
        let latched = if mem_stall { dec.redirect } else { None };
        let resolved = if front_stall { latched } else { dec.redirect };
        let f = self
            .fetch
            .evaluate(&mut self.bru, bus, trap_target, resolved, front_stall);

        tracing::trace!(
            pc = format_args!("{:#010x}", self.fetch.pc()),
            mem_stall,
            ex_stall,
            hazard,
            redirect = f.redirected,
            retired = wb.retired,
            "cycle"
        );

        // ── Edge phase ──

        if !mem_stall {
            if let Some((addr, value)) = ex.csr_write {
                self.csr.write(addr, value);
            }
            if ex.mul_done {
                self.execute.mul.release();
            }
            if ex.div_done {
                self.execute.div.release();
            }
        }

        if let Some(action) = trap {
            self.apply_trap(action);
        }

        if !front_stall {
            if let Some((pc, target, taken)) = dec.train_btb {
                self.bru.btb.update(pc, target, taken);
            }
            if let Some((pc, hash, target)) = dec.train_ibtb {
                self.bru.ibtb.update(pc, hash, target);
            }
            if f.ras_pop {
                self.bru.ras.pop();
            }
            if let Some(addr) = dec.ras_push {
                self.bru.ras.push(addr);
            }
        }

        self.csr.bump(CTR_CYCLE);
        if mem_stall {
            self.csr.bump(CTR_MEM_STALL);
        } else if f.redirected {
            self.csr.bump(CTR_FLUSH);
        } else if hazard || ex_stall {
            self.csr.bump(CTR_HAZARD_STALL);
        }
        if wb.retired {
            self.csr.bump(CTR_INSTRET);
        }
        if !front_stall {
            if dec.is_branch {
                self.csr.bump(CTR_BRANCHES);
            }
            if dec.mispredict {
                self.csr.bump(CTR_MISPREDICT);
            }
            if dec.btb_miss {
                self.csr.bump(CTR_BTB_MISS);
            }
            if f.btb_used {
                self.csr.bump(CTR_BTB_PREDICT);
            }
        }

        self.if_id.set_input(f.ifid_input);
        self.if_id.set_stall(front_stall);
        self.if_id.set_flush(f.redirected);
        self.id_ex.set_input(dec.idex_input);
        self.id_ex.set_stall(mem_stall || ex_stall);
        self.ex_mem.set_input(ex.exmem_input);
        self.ex_mem.set_stall(mem_stall);
        self.mem_wb.set_input(mem.wb_input);

        self.if_id.tick();
        self.id_ex.tick();
        self.ex_mem.tick();
        self.mem_wb.tick();

        self.fetch.update(f.next_pc);
        self.execute.mul.tick();
        self.execute.div.tick();
        bus.tick();
    }

    fn apply_trap(&mut self, action: ClintAction) {
        match action {
            ClintAction::Enter { cause, mepc } => {
                let enabled = self.csr.mstatus & MSTATUS_MIE != 0;
                self.csr.mstatus &= !(MSTATUS_MIE | MSTATUS_MPIE);
                if enabled {
                    self.csr.mstatus |= MSTATUS_MPIE;
                }
                self.csr.mepc = mepc;
                self.csr.mcause = cause.mcause();
                tracing::debug!(?cause, mepc = format_args!("{mepc:#010x}"), "trap entered");
                // An exception with no handler installed ends the run.
                if !cause.is_interrupt() && self.csr.mtvec == 0 {
                    self.halted = true;
                }
            }
            ClintAction::Return => {
                let restore = self.csr.mstatus & MSTATUS_MPIE != 0;
                self.csr.mstatus &= !MSTATUS_MIE;
                if restore {
                    self.csr.mstatus |= MSTATUS_MIE;
                }
                self.csr.mstatus |= MSTATUS_MPIE;
                tracing::debug!(
                    mepc = format_args!("{:#010x}", self.csr.mepc),
                    "trap return"
                );
            }
        }
    }

    /// Current fetch address.
    pub fn pc(&self) -> u32 {
        self.fetch.pc()
    }

    /// Overrides the fetch address (program entry point).
    pub fn set_pc(&mut self, pc: u32) {
        self.fetch.set_pc(pc);
    }

    /// The core took an unhandled exception and stopped.
    pub fn halted(&self) -> bool {
        self.halted
    }

    /// Architectural register file (debug port).
    pub fn gpr(&self) -> &Gpr {
        &self.gpr
    }

    /// Mutable register file access (environment setup).
    pub fn gpr_mut(&mut self) -> &mut Gpr {
        &mut self.gpr
    }

    /// CSR bank and performance counters (debug port).
    pub fn csr(&self) -> &CsrFile {
        &self.csr
    }

    /// Mutable CSR access (environment setup).
    pub fn csr_mut(&mut self) -> &mut CsrFile {
        &mut self.csr
    }

    /// Full 64-bit value of a performance counter (debug port).
    pub fn counter(&self, idx: usize) -> u64 {
        self.csr.counter(idx)
    }

    /// Returns the core to its reset state. Predictors, counters, and all
    /// in-flight instructions are discarded.
    pub fn reset(&mut self, reset_pc: u32) {
        self.fetch.reset();
        self.fetch.set_pc(reset_pc);
        self.execute.reset();
        self.memory.reset();
        self.if_id.reset();
        self.id_ex.reset();
        self.ex_mem.reset();
        self.mem_wb.reset();
        self.gpr.reset();
        self.csr.reset();
        self.bru.reset();
        self.halted = false;
    }
}
