//! Functional units: ALU, branch predictors, multiplier and divider.

/// Combinational arithmetic/logic unit.
pub mod alu;

/// Branch prediction unit (BTB, RAS, IBTB).
pub mod bru;

/// Multi-cycle multiply and divide units.
pub mod muldiv;

pub use alu::AluOp;
pub use bru::BranchUnit;
pub use muldiv::{DivOp, MulOp, MultiCycleUnit};
