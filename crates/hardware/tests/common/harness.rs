//! Full-system test harness.

use std::path::Path;

use rv32sim_core::Simulator;
use rv32sim_core::config::Config;
use rv32sim_core::core::Core;

/// A simulator wrapper with conveniences for loading short programs and
/// running bounded cycle counts.
pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
        Self {
            sim: Simulator::new(config),
        }
    }

    /// Convenience accessor for the core.
    pub fn core(&self) -> &Core {
        self.sim.core()
    }

    /// Mutable convenience accessor for the core.
    pub fn core_mut(&mut self) -> &mut Core {
        self.sim.core_mut()
    }

    /// Loads a sequence of instruction words at `addr` and points the PC
    /// there.
    pub fn load_program(mut self, addr: u32, instructions: &[u32]) -> Self {
        let bytes: Vec<u8> = instructions
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect();
        self.sim
            .bus_mut()
            .ram_mut()
            .load(addr, &bytes)
            .expect("test program fits in RAM");
        self.sim.core_mut().set_pc(addr);
        self
    }

    /// Loads an image file through the production loader.
    pub fn load_file(&mut self, path: &Path) {
        self.sim.load(path).expect("test image loads");
    }

    /// Sets a general-purpose register.
    pub fn set_reg(&mut self, reg: usize, val: u32) {
        self.sim.core_mut().gpr_mut().write(reg, val);
    }

    /// Reads a general-purpose register.
    pub fn get_reg(&self, reg: usize) -> u32 {
        self.sim.core().gpr().read(reg)
    }

    /// Runs for at most `cycles` cycles, stopping early on halt.
    pub fn run(&mut self, cycles: u64) {
        for _ in 0..cycles {
            if self.sim.core().halted() {
                break;
            }
            self.sim.tick();
        }
    }

    /// Reads a performance counter.
    pub fn counter(&self, idx: usize) -> u64 {
        self.sim.core().counter(idx)
    }
}
