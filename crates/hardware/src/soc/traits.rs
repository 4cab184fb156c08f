//! Device trait for memory-mapped I/O.
//!
//! This module defines the `Device` trait implemented by all bus-attached
//! components. It provides:
//! 1. **Identification:** `name` for bus routing diagnostics.
//! 2. **Access:** Word-granular read/write at device-relative offsets,
//!    with per-byte write strobes matching the bus lanes.
//! 3. **Lifecycle:** Optional `tick` and interrupt reporting.

/// Trait for memory-mapped I/O devices attached to the system bus.
///
/// All accesses are word-wide; sub-word stores arrive with the data
/// already shifted into the correct byte lanes and the matching strobe
/// bits set.
pub trait Device {
    /// Returns a short name for this device (e.g. `"UART0"`, `"RAM"`).
    fn name(&self) -> &str;

    /// Reads the word at the given device-relative offset.
    ///
    /// Takes `&mut self` because some registers have read side effects
    /// (reading the UART receive register clears its interrupt).
    fn read(&mut self, offset: u32) -> u32;

    /// Writes the byte lanes selected by `strobe` at the given offset.
    fn write(&mut self, offset: u32, value: u32, strobe: u8);

    /// Advances device state by one cycle; returns `true` while the
    /// device asserts its interrupt line.
    fn tick(&mut self) -> bool {
        false
    }
}
