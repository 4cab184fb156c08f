//! Common types shared across the simulator.

/// Fixed instruction-encoding constants (field masks, NOP).
pub mod constants;
/// Host-level errors and architectural trap causes.
pub mod error;

pub use error::{SimError, TrapCause};
