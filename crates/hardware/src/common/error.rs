//! Host errors and architectural trap causes.
//!
//! This module separates two very different failure domains:
//! 1. **Host faults** (`SimError`): unreadable images, malformed ELF files,
//!    images that do not fit in RAM. These are Rust errors and abort setup.
//! 2. **Architectural traps** (`TrapCause`): ECALL, EBREAK, and interrupts.
//!    These are ordinary data flowing through the trap controller; the core
//!    never treats them as errors and never drops them.

use thiserror::Error;

/// Host-level simulator error.
///
/// Raised during setup (program loading, configuration parsing); the
/// simulated core itself has no unrecoverable-fatal path.
#[derive(Debug, Error)]
pub enum SimError {
    /// The program image could not be read from disk.
    #[error("could not read image '{path}': {source}")]
    Image {
        /// Path that failed to open or read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The ELF file was recognized but could not be parsed.
    #[error("malformed ELF image: {0}")]
    Elf(#[from] object::read::Error),

    /// A loadable segment falls outside the configured RAM region.
    #[error("segment at {addr:#010x} ({len} bytes) does not fit in RAM of {ram_size} bytes")]
    ImageTooLarge {
        /// Load address of the offending segment.
        addr: u32,
        /// Segment length in bytes.
        len: usize,
        /// Configured RAM size.
        ram_size: usize,
    },

    /// The configuration file could not be parsed.
    #[error("bad configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Cause of a trap taken by the core.
///
/// The numeric `mcause` encoding is fixed by the privileged specification
/// and must match bit-for-bit for compliance-test compatibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapCause {
    /// `ECALL` executed (machine mode).
    EnvironmentCall,
    /// `EBREAK` executed.
    Breakpoint,
    /// Machine timer interrupt (interrupt line bit 0).
    TimerInterrupt,
    /// Machine external interrupt (any interrupt line bit above 0).
    ExternalInterrupt,
}

impl TrapCause {
    /// Returns the `mcause` encoding for this trap.
    pub fn mcause(self) -> u32 {
        match self {
            TrapCause::EnvironmentCall => 11,
            TrapCause::Breakpoint => 3,
            TrapCause::TimerInterrupt => 0x8000_0007,
            TrapCause::ExternalInterrupt => 0x8000_000B,
        }
    }

    /// Returns `true` for asynchronous causes (interrupts).
    pub fn is_interrupt(self) -> bool {
        matches!(
            self,
            TrapCause::TimerInterrupt | TrapCause::ExternalInterrupt
        )
    }
}
