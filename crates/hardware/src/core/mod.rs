//! The simulated CPU core.

/// Architectural state: register file and CSR bank.
pub mod arch;
/// Trap and interrupt arbitration.
pub mod clint;
/// The five-stage pipeline.
pub mod pipeline;
/// Functional units and branch predictors.
pub mod units;

pub use pipeline::Core;
