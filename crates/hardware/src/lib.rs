//! Cycle-accurate RV32I+M pipeline simulator library.
//!
//! This crate implements a cycle-accurate 5-stage RISC-V RV32IM core with the following:
//! 1. **Core:** Pipeline (fetch, decode, execute, memory, writeback), GPR and CSR state.
//! 2. **Prediction:** Branch target buffer, return address stack, and indirect target buffer.
//! 3. **ISA:** Decoding for RV32I, RV32M, and the saturating DSP extension.
//! 4. **SoC:** Region-decoded system bus, RAM, and MMIO devices (UART, timer).
//! 5. **Simulation:** Loader, configuration, and statistics collection.

/// Common types and constants (traps, host errors, instruction layout).
pub mod common;
/// Simulator configuration (defaults, hierarchical config structures).
pub mod config;
/// CPU core (pipeline, arch state, functional units, trap controller).
pub mod core;
/// Instruction set (field extraction, immediates, opcode tables, ABI names).
pub mod isa;
/// Program loader and top-level simulator.
pub mod sim;
/// System-on-chip (bus protocol, RAM, devices).
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Main core type; holds pipeline latches, predictors, and architectural state.
pub use crate::core::Core;
/// Top-level simulator; owns the core and the system bus.
pub use crate::sim::Simulator;
/// System bus with region-decoded devices; construct with `SystemBus::new`.
pub use crate::soc::SystemBus;
