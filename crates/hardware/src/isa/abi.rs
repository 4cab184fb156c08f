//! RISC-V ABI register indices.
//!
//! Only the registers the core inspects by name are listed: the
//! return-address and alternate-link registers drive the return address
//! stack heuristics.

/// Return address register (`ra` / `x1`).
pub const REG_RA: usize = 1;

/// Alternate link register (`t0` / `x5`).
///
/// The RISC-V calling convention permits `t0` as a secondary link
/// register; the RAS call/return heuristics treat it like `ra`.
pub const REG_T0: usize = 5;

/// Returns `true` if `idx` is one of the link registers (`ra`, `t0`).
pub fn is_link(idx: usize) -> bool {
    idx == REG_RA || idx == REG_T0
}
