//! SoC tests.

/// RAM backing store.
pub mod memory;
/// UART peripheral.
pub mod uart;
