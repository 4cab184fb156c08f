//! Simulation statistics collection and reporting.
//!
//! This module snapshots the CSR performance counter file into a plain
//! report. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and derived
//!    metrics (CPI).
//! 2. **Stalls:** Memory, control-flush, and hazard stall cycles.
//! 3. **Branch prediction:** Resolutions, mispredictions, and accuracy.
//!
//! Everything here is derived from the architectural counters, so a
//! program reading its own counters over CSR instructions sees exactly
//! the numbers reported.

use crate::core::arch::CsrFile;
use crate::core::arch::csr::{
    CTR_BRANCHES, CTR_BTB_MISS, CTR_BTB_PREDICT, CTR_CYCLE, CTR_FLUSH, CTR_HAZARD_STALL,
    CTR_INSTRET, CTR_MEM_STALL, CTR_MISPREDICT,
};

/// A snapshot of the performance counters.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimStats {
    /// Host wall-clock seconds spent simulating; zero when unknown.
    pub host_seconds: f64,
    /// Total simulated cycles.
    pub cycles: u64,
    /// Instructions retired.
    pub instructions_retired: u64,
    /// Control-transfer mispredictions (any flush-causing resolution).
    pub mispredictions: u64,
    /// Cycles lost to hazard stalls (load-use, branch operand, multi-cycle units).
    pub stalls_hazard: u64,
    /// Cycles lost to bus transactions.
    pub stalls_mem: u64,
    /// Control flush events.
    pub flushes: u64,
    /// Taken BTB-covered transfers the BTB failed to predict.
    pub btb_misses: u64,
    /// Conditional branches resolved.
    pub branches: u64,
    /// Taken predictions the BTB supplied to fetch.
    pub btb_predictions: u64,
}

impl SimStats {
    /// Snapshots the counter file.
    pub fn collect(csr: &CsrFile) -> Self {
        Self {
            host_seconds: 0.0,
            cycles: csr.counter(CTR_CYCLE),
            instructions_retired: csr.counter(CTR_INSTRET),
            mispredictions: csr.counter(CTR_MISPREDICT),
            stalls_hazard: csr.counter(CTR_HAZARD_STALL),
            stalls_mem: csr.counter(CTR_MEM_STALL),
            flushes: csr.counter(CTR_FLUSH),
            btb_misses: csr.counter(CTR_BTB_MISS),
            branches: csr.counter(CTR_BRANCHES),
            btb_predictions: csr.counter(CTR_BTB_PREDICT),
        }
    }

    /// Instructions per cycle.
    pub fn ipc(&self) -> f64 {
        self.instructions_retired as f64 / self.cycles.max(1) as f64
    }

    /// Fraction of resolved control transfers that needed no redirect.
    pub fn prediction_accuracy(&self) -> f64 {
        let resolved = self.branches.max(self.mispredictions);
        if resolved == 0 {
            return 0.0;
        }
        1.0 - self.mispredictions as f64 / resolved as f64
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`,
    /// `"stalls"`, or `"branch"`. Pass an empty slice to print all
    /// sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1);
        let instr = self.instructions_retired.max(1);

        if want("summary") {
            println!("\n==========================================================");
            println!("RV32 PIPELINE SIMULATION STATISTICS");
            println!("==========================================================");
            if self.host_seconds > 0.0 {
                let khz = (self.cycles as f64 / self.host_seconds) / 1000.0;
                println!("host_seconds             {:.4} s", self.host_seconds);
                println!("sim_freq                 {khz:.2} kHz");
            }
            println!("sim_cycles               {}", self.cycles);
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_ipc                  {:.4}", self.ipc());
            println!("sim_cpi                  {:.4}", cyc as f64 / instr as f64);
            println!("----------------------------------------------------------");
        }
        if want("stalls") {
            let pct = |n: u64| (n as f64 / cyc as f64) * 100.0;
            println!("STALL BREAKDOWN");
            println!(
                "  stalls.memory          {} ({:.2}%)",
                self.stalls_mem,
                pct(self.stalls_mem)
            );
            println!(
                "  stalls.control         {} ({:.2}%)",
                self.flushes,
                pct(self.flushes)
            );
            println!(
                "  stalls.hazard          {} ({:.2}%)",
                self.stalls_hazard,
                pct(self.stalls_hazard)
            );
            println!("----------------------------------------------------------");
        }
        if want("branch") {
            println!("BRANCH PREDICTION");
            println!("  bp.branches            {}", self.branches);
            println!("  bp.mispredicts         {}", self.mispredictions);
            println!("  bp.btb_predictions     {}", self.btb_predictions);
            println!("  bp.btb_misses          {}", self.btb_misses);
            println!(
                "  bp.accuracy            {:.2}%",
                self.prediction_accuracy() * 100.0
            );
            println!("----------------------------------------------------------");
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
