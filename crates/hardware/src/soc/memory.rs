//! Main system RAM.
//!
//! Byte-addressed backing store for bus region 0. The data port follows
//! the `Device` protocol; the instruction port bypasses the bus state
//! machine through `peek_word`, which is combinational.

use crate::common::SimError;
use crate::common::constants::BUS_BYTES;
use crate::soc::traits::Device;

/// Main system RAM.
pub struct Ram {
    bytes: Vec<u8>,
}

impl Ram {
    /// Allocates a zero-filled RAM of the given size in bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![0; size],
        }
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` for a zero-sized RAM.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Combinational word read for the instruction port.
    ///
    /// Returns `None` when any byte of the word falls outside RAM.
    pub fn peek_word(&self, offset: u32) -> Option<u32> {
        let base = offset as usize & !(BUS_BYTES - 1);
        let slice = self.bytes.get(base..base + BUS_BYTES)?;
        Some(u32::from_le_bytes([slice[0], slice[1], slice[2], slice[3]]))
    }

    /// Copies a program image into RAM at the given offset.
    pub fn load(&mut self, offset: u32, data: &[u8]) -> Result<(), SimError> {
        let start = offset as usize;
        let end = start.checked_add(data.len()).unwrap_or(usize::MAX);
        if end > self.bytes.len() {
            return Err(SimError::ImageTooLarge {
                addr: offset,
                len: data.len(),
                ram_size: self.bytes.len(),
            });
        }
        self.bytes[start..end].copy_from_slice(data);
        Ok(())
    }

    /// Zero-fills the entire RAM.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }
}

impl Device for Ram {
    fn name(&self) -> &str {
        "RAM"
    }

    fn read(&mut self, offset: u32) -> u32 {
        self.peek_word(offset).unwrap_or(0)
    }

    fn write(&mut self, offset: u32, value: u32, strobe: u8) {
        let base = offset as usize & !(BUS_BYTES - 1);
        let lanes = value.to_le_bytes();
        for (lane, byte) in lanes.iter().enumerate() {
            if strobe & (1 << lane) != 0 {
                if let Some(slot) = self.bytes.get_mut(base + lane) {
                    *slot = *byte;
                }
            }
        }
    }
}
