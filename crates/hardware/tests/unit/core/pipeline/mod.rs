//! Pipeline tests.

/// Pipeline latch flush/stall/capture behavior.
pub mod latch;
