//! Control and Status Register (CSR) bank and performance counters.
//!
//! This module implements the machine-mode CSR subsystem:
//! 1. **Address Definitions:** Constants for the implemented machine CSRs.
//! 2. **Register Storage:** Named 32-bit machine registers.
//! 3. **Counter File:** Nine 64-bit performance counters with a
//!    shadow-high latch for torn-read-free 64-bit reads and per-counter
//!    `mcountinhibit` gating.
//!
//! Counter addressing: low halves live at `0xB00 + i`, high halves at
//! `0xC00 + i`. Reading a low half latches the counter's current high half
//! into a shadow register; the subsequent high-half read returns the
//! shadow, so the pair is a consistent snapshot even if the counter
//! incremented in between.

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;
/// Machine interrupt enable register CSR address.
pub const MIE: u32 = 0x304;
/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;
/// Machine counter-inhibit register CSR address.
pub const MCOUNTINHIBIT: u32 = 0x320;
/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;
/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;
/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;

/// Base address of the counter low halves.
pub const COUNTER_LOW_BASE: u32 = 0xB00;
/// Base address of the counter high halves.
pub const COUNTER_HIGH_BASE: u32 = 0xC00;
/// Number of addressable counter slots (indices 0-9; slot 1 is reserved).
pub const COUNTER_SLOTS: usize = 10;

/// Machine interrupt enable bit in `mstatus`.
pub const MSTATUS_MIE: u32 = 1 << 3;
/// Previous machine interrupt enable bit in `mstatus`.
pub const MSTATUS_MPIE: u32 = 1 << 7;

/// Machine timer interrupt enable bit in `mie` (gates interrupt line 0).
pub const MIE_MTIE: u32 = 1 << 7;
/// Machine external interrupt enable bit in `mie` (gates lines 1 and up).
pub const MIE_MEIE: u32 = 1 << 11;

/// Cycle counter index.
pub const CTR_CYCLE: usize = 0;
/// Instructions-retired counter index.
pub const CTR_INSTRET: usize = 2;
/// Branch misprediction counter index.
pub const CTR_MISPREDICT: usize = 3;
/// Hazard-stall cycle counter index.
pub const CTR_HAZARD_STALL: usize = 4;
/// Memory-stall cycle counter index.
pub const CTR_MEM_STALL: usize = 5;
/// Control-flush event counter index.
pub const CTR_FLUSH: usize = 6;
/// BTB-miss-penalty event counter index.
pub const CTR_BTB_MISS: usize = 7;
/// Total branches-resolved counter index.
pub const CTR_BRANCHES: usize = 8;
/// BTB-predictions-made counter index.
pub const CTR_BTB_PREDICT: usize = 9;

/// Machine-mode CSR bank with the 64-bit performance counter file.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CsrFile {
    /// Machine status register (MIE/MPIE bits).
    pub mstatus: u32,
    /// Machine interrupt enable register.
    pub mie: u32,
    /// Machine trap vector base address.
    pub mtvec: u32,
    /// Machine scratch register.
    pub mscratch: u32,
    /// Machine exception program counter.
    pub mepc: u32,
    /// Machine trap cause.
    pub mcause: u32,
    /// Counter-inhibit bitmask; bit `i` freezes counter slot `i`.
    pub mcountinhibit: u32,
    counters: [u64; COUNTER_SLOTS],
    shadow_high: [u32; COUNTER_SLOTS],
}

impl CsrFile {
    /// Creates a new CSR bank with all registers and counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all registers, counters, and shadow latches to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Reads a CSR, applying read side effects.
    ///
    /// Reading a counter low half latches the current high half into the
    /// shadow register for that slot. Unrecognized addresses read zero.
    pub fn read(&mut self, addr: u32) -> u32 {
        match addr {
            MSTATUS => self.mstatus,
            MIE => self.mie,
            MTVEC => self.mtvec,
            MCOUNTINHIBIT => self.mcountinhibit,
            MSCRATCH => self.mscratch,
            MEPC => self.mepc,
            MCAUSE => self.mcause,
            a if Self::counter_slot(a, COUNTER_LOW_BASE).is_some() => {
                let i = Self::counter_slot(a, COUNTER_LOW_BASE).unwrap_or(0);
                self.shadow_high[i] = (self.counters[i] >> 32) as u32;
                self.counters[i] as u32
            }
            a if Self::counter_slot(a, COUNTER_HIGH_BASE).is_some() => {
                let i = Self::counter_slot(a, COUNTER_HIGH_BASE).unwrap_or(0);
                self.shadow_high[i]
            }
            _ => 0,
        }
    }

    /// Reads a CSR without side effects (debug port).
    ///
    /// Counter high halves return the live value rather than the shadow.
    pub fn peek(&self, addr: u32) -> u32 {
        match addr {
            MSTATUS => self.mstatus,
            MIE => self.mie,
            MTVEC => self.mtvec,
            MCOUNTINHIBIT => self.mcountinhibit,
            MSCRATCH => self.mscratch,
            MEPC => self.mepc,
            MCAUSE => self.mcause,
            a if Self::counter_slot(a, COUNTER_LOW_BASE).is_some() => {
                let i = Self::counter_slot(a, COUNTER_LOW_BASE).unwrap_or(0);
                self.counters[i] as u32
            }
            a if Self::counter_slot(a, COUNTER_HIGH_BASE).is_some() => {
                let i = Self::counter_slot(a, COUNTER_HIGH_BASE).unwrap_or(0);
                (self.counters[i] >> 32) as u32
            }
            _ => 0,
        }
    }

    /// Writes a CSR. Unrecognized addresses are ignored.
    ///
    /// Counter halves are writable; writing a half replaces only that half.
    pub fn write(&mut self, addr: u32, val: u32) {
        match addr {
            MSTATUS => self.mstatus = val,
            MIE => self.mie = val,
            MTVEC => self.mtvec = val,
            MCOUNTINHIBIT => self.mcountinhibit = val,
            MSCRATCH => self.mscratch = val,
            MEPC => self.mepc = val,
            MCAUSE => self.mcause = val,
            a if Self::counter_slot(a, COUNTER_LOW_BASE).is_some() => {
                let i = Self::counter_slot(a, COUNTER_LOW_BASE).unwrap_or(0);
                self.counters[i] = (self.counters[i] & 0xFFFF_FFFF_0000_0000) | u64::from(val);
            }
            a if Self::counter_slot(a, COUNTER_HIGH_BASE).is_some() => {
                let i = Self::counter_slot(a, COUNTER_HIGH_BASE).unwrap_or(0);
                self.counters[i] =
                    (self.counters[i] & 0x0000_0000_FFFF_FFFF) | (u64::from(val) << 32);
            }
            _ => {}
        }
    }

    /// Increments counter slot `idx` unless inhibited by `mcountinhibit`.
    pub fn bump(&mut self, idx: usize) {
        if self.mcountinhibit & (1 << idx) == 0 {
            self.counters[idx] = self.counters[idx].wrapping_add(1);
        }
    }

    /// Returns the full 64-bit value of counter slot `idx` (debug port).
    pub fn counter(&self, idx: usize) -> u64 {
        self.counters[idx]
    }

    fn counter_slot(addr: u32, base: u32) -> Option<usize> {
        let i = addr.wrapping_sub(base) as usize;
        // Slot 1 is reserved and reads/writes as an ordinary zero slot.
        if i < COUNTER_SLOTS { Some(i) } else { None }
    }
}
