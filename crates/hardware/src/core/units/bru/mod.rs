//! Branch prediction unit (BRU).
//!
//! Three complementary target predictors cooperate in fetch:
//! 1. **BTB** - direct-mapped buffer with 2-bit counters, covering
//!    conditional branches and direct jumps.
//! 2. **RAS** - return address stack, covering `JALR` returns
//!    (`rd = x0`, `rs1` in {`ra`, `t0`}).
//! 3. **IBTB** - small associative buffer, covering all other indirect
//!    jumps.
//!
//! Decode trains all three once a control transfer resolves; training is
//! suppressed on cycles where the decision itself used a hazardous
//! operand.

pub use self::btb::Btb;
pub use self::ibtb::{Ibtb, rs1_hash};
pub use self::ras::Ras;

/// Branch Target Buffer for conditional branches and direct jumps.
pub mod btb;

/// Indirect Branch Target Buffer for non-return indirect jumps.
pub mod ibtb;

/// Return Address Stack for predicting return addresses.
pub mod ras;

use crate::config::PipelineConfig;

/// The combined branch prediction unit owned by the core.
pub struct BranchUnit {
    /// Direct-mapped target buffer.
    pub btb: Btb,
    /// Return address stack.
    pub ras: Ras,
    /// Associative indirect-target buffer.
    pub ibtb: Ibtb,
}

impl BranchUnit {
    /// Creates the predictors sized per the pipeline configuration.
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            btb: Btb::new(config.btb_entries),
            ras: Ras::new(config.ras_depth),
            ibtb: Ibtb::new(config.ibtb_entries),
        }
    }

    /// Returns every predictor to its empty reset state.
    pub fn reset(&mut self) {
        self.btb.reset();
        self.ras.reset();
        self.ibtb.reset();
    }
}
