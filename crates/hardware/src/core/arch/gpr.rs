//! RV32 General-Purpose Register File.
//!
//! This module implements the architectural integer register file:
//! 1. **Storage:** 32 registers of 32 bits (`x0`-`x31`).
//! 2. **Invariant Enforcement:** Register `x0` is hardwired to zero.
//! 3. **Debugging:** A combinational read port independent of the pipeline.
//!
//! The write port is exclusively owned by the writeback stage; both read
//! ports are combinational and used by decode.

/// General-Purpose Register file.
///
/// Register `x0` always reads zero and writes to it are discarded.
#[derive(Clone, PartialEq, Eq)]
pub struct Gpr {
    regs: [u32; 32],
}

impl Default for Gpr {
    fn default() -> Self {
        Self::new()
    }
}

impl Gpr {
    /// Creates a new register file with all registers initialized to zero.
    pub fn new() -> Self {
        Self { regs: [0; 32] }
    }

    /// Reads a register value. Register `x0` always returns 0.
    pub fn read(&self, idx: usize) -> u32 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a value to a register. Writes to `x0` are discarded.
    pub fn write(&mut self, idx: usize, val: u32) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }

    /// Resets all registers to zero.
    pub fn reset(&mut self) {
        self.regs = [0; 32];
    }

    /// Dumps the contents of all registers to stdout.
    pub fn dump(&self) {
        for i in (0..32).step_by(2) {
            println!(
                "x{:<2}={:#010x} x{:<2}={:#010x}",
                i,
                self.regs[i],
                i + 1,
                self.regs[i + 1]
            );
        }
    }
}
