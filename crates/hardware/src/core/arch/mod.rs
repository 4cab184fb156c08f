//! Architectural state: register file and CSR bank.

/// Machine-mode CSR bank and performance counter file.
pub mod csr;
/// General-purpose register file.
pub mod gpr;

pub use csr::CsrFile;
pub use gpr::Gpr;
