//! Configuration system for the pipeline simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulated core. It provides:
//! 1. **Defaults:** Baseline hardware constants (RAM, predictors, latencies).
//! 2. **Structures:** Hierarchical config for the system and the pipeline.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or built
//! programmatically with `Config::default()`.

use serde::Deserialize;

/// Default configuration constants for the simulator.
///
/// These values define the baseline hardware configuration when not
/// explicitly overridden in a configuration file.
mod defaults {
    /// Base address of main system RAM.
    ///
    /// The RAM occupies bus region 0; regions are selected by the upper
    /// three address bits.
    pub const RAM_BASE: u32 = 0x0000_0000;

    /// Total size of main system RAM (1 MiB).
    pub const RAM_SIZE: usize = 1024 * 1024;

    /// Program counter value at reset.
    pub const RESET_PC: u32 = 0x0000_0000;

    /// Data-bus completion latency in cycles.
    ///
    /// Number of cycles between a granted request and `read_valid` /
    /// `write_valid`. The instruction port is not affected.
    pub const BUS_LATENCY: u32 = 1;

    /// Branch Target Buffer entry count. Must be a power of two.
    pub const BTB_ENTRIES: usize = 32;

    /// Return Address Stack depth.
    pub const RAS_DEPTH: usize = 4;

    /// Indirect Branch Target Buffer entry count.
    pub const IBTB_ENTRIES: usize = 8;

    /// Multiplier latency in cycles.
    pub const MUL_LATENCY: u32 = 4;

    /// Divider latency in cycles.
    pub const DIV_LATENCY: u32 = 16;
}

/// System-level configuration (memory map, bus timing).
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SystemConfig {
    /// Base address of main RAM (bus region 0).
    pub ram_base: u32,
    /// RAM size in bytes.
    pub ram_size: usize,
    /// Program counter at reset.
    pub reset_pc: u32,
    /// Data-bus grant-to-completion latency in cycles.
    pub bus_latency: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
            reset_pc: defaults::RESET_PC,
            bus_latency: defaults::BUS_LATENCY,
        }
    }
}

/// Pipeline and predictor configuration.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Branch Target Buffer entry count (power of two).
    pub btb_entries: usize,
    /// Return Address Stack depth.
    pub ras_depth: usize,
    /// Indirect Branch Target Buffer entry count.
    pub ibtb_entries: usize,
    /// Multiplier latency in cycles.
    pub mul_latency: u32,
    /// Divider latency in cycles.
    pub div_latency: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            btb_entries: defaults::BTB_ENTRIES,
            ras_depth: defaults::RAS_DEPTH,
            ibtb_entries: defaults::IBTB_ENTRIES,
            mul_latency: defaults::MUL_LATENCY,
            div_latency: defaults::DIV_LATENCY,
        }
    }
}

/// Root configuration for a simulated system.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// System-level configuration.
    pub system: SystemConfig,
    /// Pipeline and predictor configuration.
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses a configuration from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, crate::common::SimError> {
        Ok(serde_json::from_str(s)?)
    }
}
