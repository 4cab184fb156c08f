//! Shared test infrastructure.

/// Full-system test harness.
pub mod harness;
