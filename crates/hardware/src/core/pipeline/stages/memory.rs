//! Memory access stage: the data-bus state machine.
//!
//! States: Idle → Read → Idle or Idle → Write → Idle. Entering a
//! transaction latches the writeback control signals, because the EX/MEM
//! latch will re-capture the *next* instruction's signals while this one
//! is still completing. Reads hold the global stall until `read_valid`
//! and extract the addressed byte/halfword/word with the correct
//! extension; writes hold until `write_valid` — waiting only for
//! data-accepted was found unsafe, leaving the machine mid-transaction
//! when a new instruction arrives.
//!
//! Halfword accesses at byte offset 3 cannot be expressed with adjacent
//! lanes on a 32-bit bus; they wrap within the addressed word on a
//! best-effort basis.

use crate::core::pipeline::latches::{ExMemEntry, MemWbEntry};
use crate::core::pipeline::signals::{MemWidth, WbSrc};
use crate::soc::SystemBus;

/// Combinational outputs of the memory stage for one cycle.
pub struct MemOut {
    /// Stage is mid-transaction; the whole pipeline must hold.
    pub stall: bool,
    /// Value driven onto the MEM/WB latch input (a bubble while waiting).
    pub wb_input: MemWbEntry,
    /// Result forwarded back to execute, when one is available.
    pub forward: Option<(usize, u32)>,
    /// Destination register of a load still waiting on the bus.
    pub pending_rd: Option<usize>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum MemState {
    Idle,
    Read,
    Write,
}

/// Memory stage state machine.
pub struct MemStage {
    state: MemState,
    /// Writeback entry latched when the transaction started.
    latched: MemWbEntry,
    offset: u32,
    width: MemWidth,
    signed: bool,
}

impl MemStage {
    /// Creates the stage in the idle state.
    pub fn new() -> Self {
        Self {
            state: MemState::Idle,
            latched: MemWbEntry::default(),
            offset: 0,
            width: MemWidth::Nop,
            signed: false,
        }
    }

    /// Evaluates one cycle of the memory stage.
    pub fn evaluate(&mut self, entry: &ExMemEntry, bus: &mut SystemBus) -> MemOut {
        match self.state {
            MemState::Idle => self.eval_idle(entry, bus),
            MemState::Read => self.eval_read(bus),
            MemState::Write => self.eval_write(bus),
        }
    }

    fn eval_idle(&mut self, entry: &ExMemEntry, bus: &mut SystemBus) -> MemOut {
        if entry.valid && entry.ctrl.mem_read {
            self.latched = MemWbEntry {
                pc: entry.pc,
                valid: true,
                rd: entry.rd,
                alu: entry.alu,
                load_data: 0,
                ctrl: entry.ctrl,
            };
            self.offset = entry.alu & 3;
            self.width = entry.ctrl.width;
            self.signed = entry.ctrl.signed_load;
            if bus.begin_read(entry.alu & !3) {
                self.state = MemState::Read;
            }
            return MemOut {
                stall: true,
                wb_input: MemWbEntry::default(),
                forward: None,
                pending_rd: Some(entry.rd),
            };
        }
        if entry.valid && entry.ctrl.mem_write {
            self.latched = MemWbEntry {
                pc: entry.pc,
                valid: true,
                rd: 0,
                alu: entry.alu,
                load_data: 0,
                ctrl: entry.ctrl,
            };
            let offset = entry.alu & 3;
            let (strobe, data) = store_lanes(entry.ctrl.width, offset, entry.store_data);
            if bus.begin_write(entry.alu & !3, data, strobe) {
                self.state = MemState::Write;
            }
            return MemOut {
                stall: true,
                wb_input: MemWbEntry::default(),
                forward: None,
                pending_rd: None,
            };
        }

        // Non-memory instructions pass straight through.
        let wb_input = MemWbEntry {
            pc: entry.pc,
            valid: entry.valid,
            rd: entry.rd,
            alu: entry.alu,
            load_data: 0,
            ctrl: entry.ctrl,
        };
        let forward = if entry.valid && entry.ctrl.reg_write && entry.rd != 0 {
            match entry.ctrl.wb_src {
                WbSrc::Alu => Some((entry.rd, entry.alu)),
                WbSrc::Link => Some((entry.rd, entry.pc.wrapping_add(4))),
                WbSrc::Mem => None,
            }
        } else {
            None
        };
        MemOut {
            stall: false,
            wb_input,
            forward,
            pending_rd: None,
        }
    }

    fn eval_read(&mut self, bus: &mut SystemBus) -> MemOut {
        if let Some(word) = bus.read_valid() {
            let data = extract(word, self.width, self.offset, self.signed);
            self.latched.load_data = data;
            self.state = MemState::Idle;
            let forward = if self.latched.ctrl.reg_write && self.latched.rd != 0 {
                Some((self.latched.rd, data))
            } else {
                None
            };
            return MemOut {
                stall: false,
                wb_input: self.latched.clone(),
                forward,
                pending_rd: None,
            };
        }
        MemOut {
            stall: true,
            wb_input: MemWbEntry::default(),
            forward: None,
            pending_rd: Some(self.latched.rd),
        }
    }

    fn eval_write(&mut self, bus: &mut SystemBus) -> MemOut {
        if bus.write_valid() {
            self.state = MemState::Idle;
            return MemOut {
                stall: false,
                wb_input: self.latched.clone(),
                forward: None,
                pending_rd: None,
            };
        }
        MemOut {
            stall: true,
            wb_input: MemWbEntry::default(),
            forward: None,
            pending_rd: None,
        }
    }

    /// Returns the stage to the idle state.
    pub fn reset(&mut self) {
        self.state = MemState::Idle;
        self.latched = MemWbEntry::default();
        self.offset = 0;
        self.width = MemWidth::Nop;
        self.signed = false;
    }
}

impl Default for MemStage {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the addressed sub-word from a bus word with the requested
/// extension.
fn extract(word: u32, width: MemWidth, offset: u32, signed: bool) -> u32 {
    match width {
        MemWidth::Byte => {
            let byte = (word >> (8 * offset)) & 0xFF;
            if signed { byte as u8 as i8 as i32 as u32 } else { byte }
        }
        MemWidth::Half => {
            let half = if offset == 3 {
                // Wraps within the addressed word.
                ((word >> 24) & 0xFF) | ((word & 0xFF) << 8)
            } else {
                (word >> (8 * offset)) & 0xFFFF
            };
            if signed {
                half as u16 as i16 as i32 as u32
            } else {
                half
            }
        }
        _ => word,
    }
}

/// Computes the write strobes and lane-shifted data for a store.
fn store_lanes(width: MemWidth, offset: u32, value: u32) -> (u8, u32) {
    match width {
        MemWidth::Byte => (1 << offset, (value & 0xFF) << (8 * offset)),
        MemWidth::Half => {
            if offset == 3 {
                // Wraps within the addressed word.
                (0b1001, ((value & 0xFF) << 24) | ((value >> 8) & 0xFF))
            } else {
                (0b11 << offset, (value & 0xFFFF) << (8 * offset))
            }
        }
        _ => (0b1111, value),
    }
}
