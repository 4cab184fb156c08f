//! Cycle-counting timer peripheral (bus region 4).
//!
//! Register map (device-relative):
//! - `+0x00` COUNT (read-only): current cycle count.
//! - `+0x04` LIMIT (read/write): interrupt threshold.
//! - `+0x08` ENABLED (read/write): non-zero starts counting from zero.
//!
//! When enabled and the count reaches the limit, the count wraps to zero
//! and the timer interrupt line (line 0) latches high. Writing either
//! LIMIT or ENABLED acknowledges and clears the pending interrupt.

use crate::soc::traits::Device;

const REG_COUNT: u32 = 0x00;
const REG_LIMIT: u32 = 0x04;
const REG_ENABLED: u32 = 0x08;

/// Timer peripheral state.
pub struct Timer {
    count: u32,
    limit: u32,
    enabled: bool,
    pending: bool,
}

impl Timer {
    /// Creates a disabled timer.
    pub fn new() -> Self {
        Self {
            count: 0,
            limit: 0,
            enabled: false,
            pending: false,
        }
    }

    /// Returns `true` while the interrupt line is asserted.
    pub fn pending(&self) -> bool {
        self.pending
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Timer {
    fn name(&self) -> &str {
        "TIMER"
    }

    fn read(&mut self, offset: u32) -> u32 {
        match offset {
            REG_COUNT => self.count,
            REG_LIMIT => self.limit,
            REG_ENABLED => u32::from(self.enabled),
            _ => 0,
        }
    }

    fn write(&mut self, offset: u32, value: u32, _strobe: u8) {
        match offset {
            REG_LIMIT => {
                self.limit = value;
                self.pending = false;
            }
            REG_ENABLED => {
                self.enabled = value != 0;
                self.count = 0;
                self.pending = false;
            }
            _ => {}
        }
    }

    fn tick(&mut self) -> bool {
        if self.enabled {
            self.count = self.count.wrapping_add(1);
            if self.limit != 0 && self.count >= self.limit {
                self.count = 0;
                self.pending = true;
            }
        }
        self.pending
    }
}
