//! Functional unit tests.

/// Branch target buffer.
pub mod btb;
/// Indirect branch target buffer.
pub mod ibtb;
/// Multi-cycle multiply/divide.
pub mod muldiv;
