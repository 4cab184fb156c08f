//! The five pipeline stages.

/// Instruction decode and early branch resolution.
pub mod decode;
/// Execute stage (ALU, multiplier/divider, CSR access).
pub mod execute;
/// Instruction fetch and next-PC selection.
pub mod fetch;
/// Memory access bus state machine.
pub mod memory;
/// Register writeback.
pub mod writeback;
