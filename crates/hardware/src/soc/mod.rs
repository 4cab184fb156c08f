//! System-on-chip: bus protocol, RAM, and peripherals.

/// Region-decoded system bus.
pub mod bus;
/// Memory-mapped peripherals.
pub mod devices;
/// Main system RAM.
pub mod memory;
/// The device trait.
pub mod traits;

pub use bus::SystemBus;
pub use memory::Ram;
pub use traits::Device;
