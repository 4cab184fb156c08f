//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped cache that stores target addresses for
//! control flow instructions, letting the fetch stage predict a branch
//! or jump target before the instruction is decoded. Each entry carries
//! a 2-bit saturating counter; only counters at or above 2 ("weakly
//! taken") produce a taken prediction.

/// An entry in the Branch Target Buffer.
#[derive(Clone, Copy, Default)]
struct BtbEntry {
    /// The tag used to verify if this entry corresponds to the requested PC.
    tag: u32,
    /// The predicted target address.
    target: u32,
    /// 2-bit saturating taken/not-taken counter (0-3).
    counter: u8,
    /// Indicates if this entry contains valid data.
    valid: bool,
}

/// Branch Target Buffer structure.
pub struct Btb {
    /// The table of BTB entries.
    table: Vec<BtbEntry>,
    /// The total number of entries in the BTB.
    size: usize,
}

impl Btb {
    /// Creates a new Branch Target Buffer with the specified size.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries in the BTB. Must be a power of 2.
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![BtbEntry::default(); size],
            size,
        }
    }

    /// Calculates the index into the BTB table for a given program counter.
    ///
    /// Shifts the PC right by 2 bits (ignoring instruction alignment) and
    /// masks it against the table size.
    fn index(&self, pc: u32) -> usize {
        ((pc >> 2) as usize) & (self.size - 1)
    }

    /// Predicts the target for the given program counter.
    ///
    /// # Returns
    ///
    /// The predicted target address if a valid entry exists, the tag
    /// matches, and the counter predicts taken; otherwise `None` (the
    /// caller falls through to `pc + 4`).
    pub fn predict(&self, pc: u32) -> Option<u32> {
        let idx = self.index(pc);
        let e = self.table[idx];
        if e.valid && e.tag == pc && e.counter >= 2 {
            Some(e.target)
        } else {
            None
        }
    }

    /// Trains the BTB with a resolved branch outcome.
    ///
    /// On a taken outcome, an existing matching entry has its counter
    /// saturating-incremented (cap 3) and its target refreshed; a fresh
    /// allocation starts at counter 2. On a not-taken outcome, a matching
    /// entry at counter 1 is invalidated outright, freeing the slot
    /// instead of leaving a dead entry at 0; higher counters decrement.
    ///
    /// # Arguments
    ///
    /// * `pc` - The program counter of the branch or jump.
    /// * `target` - The resolved target address.
    /// * `taken` - Whether the branch was actually taken.
    pub fn update(&mut self, pc: u32, target: u32, taken: bool) {
        let idx = self.index(pc);
        let e = &mut self.table[idx];
        let hit = e.valid && e.tag == pc;
        if taken {
            if hit {
                e.target = target;
                e.counter = (e.counter + 1).min(3);
            } else {
                *e = BtbEntry {
                    tag: pc,
                    target,
                    counter: 2,
                    valid: true,
                };
            }
        } else if hit {
            if e.counter <= 1 {
                e.valid = false;
            } else {
                e.counter -= 1;
            }
        }
    }

    /// Invalidates every entry.
    pub fn reset(&mut self) {
        self.table.fill(BtbEntry::default());
    }
}
