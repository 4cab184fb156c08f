//! Memory-mapped peripherals.

/// Cycle-counting timer with interrupt.
pub mod timer;
/// UART with host-side buffers.
pub mod uart;

pub use timer::Timer;
pub use uart::Uart;
