//! Pipeline latch payloads for inter-stage communication.
//!
//! This module defines the entry types carried between the five stages:
//! Fetch → Decode → Execute → Memory → Writeback.
//!
//! Every payload carries a `valid` flag; the reset value of each latch is
//! an invalid bubble whose instruction word is the canonical NOP, so a
//! flushed latch always decodes to a harmless no-operation.

use crate::common::constants::NOP;
use crate::core::pipeline::signals::ControlSignals;

/// Entry in the IF/ID latch (fetch to decode).
///
/// Carries the fetched instruction and the branch prediction metadata
/// decode needs to verify the prediction.
#[derive(Clone, Debug)]
pub struct IfIdEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// 32-bit instruction encoding.
    pub inst: u32,
    /// Entry holds a real fetched instruction (not a bubble).
    pub valid: bool,
    /// Fetch redirected to a predicted target for this instruction.
    pub pred_taken: bool,
    /// The target fetch redirected to, when `pred_taken` is set.
    pub pred_target: u32,
}

impl Default for IfIdEntry {
    fn default() -> Self {
        Self {
            pc: 0,
            inst: NOP,
            valid: false,
            pred_taken: false,
            pred_target: 0,
        }
    }
}

/// Entry in the ID/EX latch (decode to execute).
#[derive(Clone, Debug, Default)]
pub struct IdExEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Entry holds a real instruction (not a bubble).
    pub valid: bool,
    /// First source register index.
    pub rs1: usize,
    /// Second source register index.
    pub rs2: usize,
    /// Destination register index.
    pub rd: usize,
    /// Value read (or forwarded) for `rs1` during decode.
    pub rv1: u32,
    /// Value read (or forwarded) for `rs2` during decode.
    pub rv2: u32,
    /// Synthesized immediate as a 32-bit two's-complement value.
    pub imm: u32,
    /// Control signals for downstream stages.
    pub ctrl: ControlSignals,
}

/// Entry in the EX/MEM latch (execute to memory).
#[derive(Clone, Debug, Default)]
pub struct ExMemEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Entry holds a real instruction (not a bubble).
    pub valid: bool,
    /// Destination register index.
    pub rd: usize,
    /// ALU result, or the effective address for memory operations.
    pub alu: u32,
    /// Data to be stored (forwarded `rs2` value).
    pub store_data: u32,
    /// Control signals for memory and writeback.
    pub ctrl: ControlSignals,
}

/// Entry in the MEM/WB latch (memory to writeback).
#[derive(Clone, Debug, Default)]
pub struct MemWbEntry {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Entry holds a real instruction (not a bubble).
    pub valid: bool,
    /// Destination register index.
    pub rd: usize,
    /// ALU result (for non-load instructions).
    pub alu: u32,
    /// Data loaded from memory (for load instructions).
    pub load_data: u32,
    /// Control signals for the writeback stage.
    pub ctrl: ControlSignals,
}
