//! Top-level simulator: a core wired to a system bus.

use std::path::Path;
use std::time::Instant;

use crate::common::SimError;
use crate::config::Config;
use crate::core::Core;
use crate::sim::loader;
use crate::soc::SystemBus;
use crate::stats::SimStats;

/// Why a bounded run returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The core took a halting trap.
    Halted,
    /// The cycle budget ran out first.
    CycleLimit,
}

/// A single-core system: pipeline, bus, and the configuration that
/// built them.
pub struct Simulator {
    core: Core,
    bus: SystemBus,
    config: Config,
    started: Instant,
}

impl Simulator {
    /// Builds a simulator from a configuration.
    pub fn new(config: Config) -> Self {
        let bus = SystemBus::new(&config.system);
        let core = Core::new(&config);
        Self {
            core,
            bus,
            config,
            started: Instant::now(),
        }
    }

    /// Loads a program image (ELF or flat binary) and points the core at
    /// its entry.
    pub fn load(&mut self, path: &Path) -> Result<(), SimError> {
        let entry = loader::load_program(
            &mut self.bus,
            path,
            self.config.system.ram_base,
            self.config.system.reset_pc,
        )?;
        self.core.set_pc(entry);
        tracing::info!(entry = format_args!("{entry:#010x}"), "program loaded");
        Ok(())
    }

    /// Advances the system by one clock cycle.
    pub fn tick(&mut self) {
        self.core.step(&mut self.bus);
    }

    /// Runs until the core halts or `max_cycles` elapse.
    pub fn run(&mut self, max_cycles: u64) -> RunOutcome {
        for _ in 0..max_cycles {
            if self.core.halted() {
                return RunOutcome::Halted;
            }
            self.tick();
        }
        if self.core.halted() {
            RunOutcome::Halted
        } else {
            RunOutcome::CycleLimit
        }
    }

    /// Snapshot of the performance counters, stamped with host wall-clock
    /// time since construction (or the last reset).
    pub fn stats(&self) -> SimStats {
        let mut stats = SimStats::collect(self.core.csr());
        stats.host_seconds = self.started.elapsed().as_secs_f64();
        stats
    }

    /// The core, for architectural state inspection.
    pub fn core(&self) -> &Core {
        &self.core
    }

    /// Mutable core access, for environment setup.
    pub fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    /// Mutable bus access, for draining UART output and poking devices.
    pub fn bus_mut(&mut self) -> &mut SystemBus {
        &mut self.bus
    }

    /// The configuration this system was built from.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns core and peripherals to reset. RAM contents survive, so a
    /// loaded program can be re-run.
    pub fn reset(&mut self) {
        self.core.reset(self.config.system.reset_pc);
        self.bus.reset();
        self.started = Instant::now();
    }
}
