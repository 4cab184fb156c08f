//! Indirect Branch Target Buffer (IBTB).
//!
//! A small fully-associative predictor for `JALR` instructions that do
//! not match the return heuristic. Lookup matches on PC alone, because
//! the source register value is not available at fetch time; training
//! matches on the (PC, rs1-hash) pair so one indirect jump site can hold
//! distinct targets for distinct register values. Replacement is LRU via
//! a per-entry age counter.

/// An entry in the Indirect Branch Target Buffer.
#[derive(Clone, Copy, Default)]
struct IbtbEntry {
    /// PC of the indirect jump this entry predicts for.
    pc_tag: u32,
    /// The predicted target address.
    target: u32,
    /// Folded hash of the source register value at training time.
    rs1_hash: u8,
    /// LRU age; 0 is most recently used.
    age: u8,
    /// Indicates if this entry contains valid data.
    valid: bool,
}

/// Indirect Branch Target Buffer structure.
pub struct Ibtb {
    /// The table of entries, searched associatively.
    table: Vec<IbtbEntry>,
}

/// Folds a 32-bit register value into the 8-bit hash used as part of the
/// training key.
pub fn rs1_hash(value: u32) -> u8 {
    (value ^ (value >> 8) ^ (value >> 16) ^ (value >> 24)) as u8
}

impl Ibtb {
    /// Creates a new IBTB with the specified number of entries.
    pub fn new(entries: usize) -> Self {
        Self {
            table: vec![IbtbEntry::default(); entries],
        }
    }

    /// Predicts the target for the indirect jump at `pc`.
    ///
    /// Among all valid entries whose PC tag matches, the most recently
    /// used one (lowest age) wins. A hit refreshes the winning entry's
    /// age and ages every other entry.
    ///
    /// # Returns
    ///
    /// The predicted target address, or `None` on a miss.
    pub fn predict(&mut self, pc: u32) -> Option<u32> {
        let hit = self
            .table
            .iter()
            .enumerate()
            .filter(|(_, e)| e.valid && e.pc_tag == pc)
            .min_by_key(|(_, e)| e.age)
            .map(|(i, e)| (i, e.target));
        if let Some((idx, target)) = hit {
            self.touch(idx);
            Some(target)
        } else {
            None
        }
    }

    /// Trains the IBTB with a resolved indirect jump.
    ///
    /// An exact (PC, hash) match is refreshed in place; otherwise a free
    /// slot is allocated, or failing that the globally oldest entry is
    /// evicted.
    ///
    /// # Arguments
    ///
    /// * `pc` - The program counter of the indirect jump.
    /// * `hash` - Folded hash of the jump's source register value.
    /// * `target` - The resolved target address.
    pub fn update(&mut self, pc: u32, hash: u8, target: u32) {
        let idx = self
            .table
            .iter()
            .position(|e| e.valid && e.pc_tag == pc && e.rs1_hash == hash)
            .or_else(|| self.table.iter().position(|e| !e.valid))
            .unwrap_or_else(|| {
                self.table
                    .iter()
                    .enumerate()
                    .max_by_key(|(_, e)| e.age)
                    .map(|(i, _)| i)
                    .unwrap_or(0)
            });
        self.table[idx] = IbtbEntry {
            pc_tag: pc,
            target,
            rs1_hash: hash,
            age: 0,
            valid: true,
        };
        self.touch(idx);
    }

    /// Invalidates every entry.
    pub fn reset(&mut self) {
        self.table.fill(IbtbEntry::default());
    }

    /// Makes entry `idx` the most recently used and ages all others,
    /// saturating at `entries - 1`.
    fn touch(&mut self, idx: usize) {
        let max_age = (self.table.len() - 1) as u8;
        for (i, e) in self.table.iter_mut().enumerate() {
            if i == idx {
                e.age = 0;
            } else if e.age < max_age {
                e.age += 1;
            }
        }
    }
}
