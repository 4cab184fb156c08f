//! Simulation driver: image loading and the run loop.

/// ELF and flat-binary image loading.
pub mod loader;
/// The top-level simulator.
pub mod simulator;

pub use simulator::{RunOutcome, Simulator};
