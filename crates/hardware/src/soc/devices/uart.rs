//! UART peripheral (bus region 2).
//!
//! Register map (device-relative):
//! - `+0x00` STATUS (read-only): bit 0 TX ready (always set; the
//!   simulated transmit buffer never fills), bit 1 RX valid.
//! - `+0x04` BAUDRATE (read-only): fixed configuration value.
//! - `+0x08` INTERRUPT (write-only): non-zero enables the RX interrupt.
//! - `+0x0C` RECV (read-only): pops one received byte and clears the
//!   interrupt when the queue drains.
//! - `+0x10` SEND (write-only): appends one byte to the transmit buffer.
//!
//! Transmitted bytes accumulate host-side until drained with
//! `take_output`; received bytes are injected with `push_input`.

use std::collections::VecDeque;

use crate::soc::traits::Device;

const REG_STATUS: u32 = 0x00;
const REG_BAUDRATE: u32 = 0x04;
const REG_INTERRUPT: u32 = 0x08;
const REG_RECV: u32 = 0x0C;
const REG_SEND: u32 = 0x10;

const STATUS_TX_READY: u32 = 1 << 0;
const STATUS_RX_VALID: u32 = 1 << 1;

const BAUDRATE: u32 = 115_200;

/// UART peripheral state.
pub struct Uart {
    tx: Vec<u8>,
    rx: VecDeque<u8>,
    irq_enabled: bool,
}

impl Uart {
    /// Creates a UART with empty buffers and interrupts disabled.
    pub fn new() -> Self {
        Self {
            tx: Vec::new(),
            rx: VecDeque::new(),
            irq_enabled: false,
        }
    }

    /// Drains and returns everything the program has transmitted.
    pub fn take_output(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.tx)
    }

    /// Injects one byte into the receive queue.
    pub fn push_input(&mut self, byte: u8) {
        self.rx.push_back(byte);
    }
}

impl Default for Uart {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Uart {
    fn name(&self) -> &str {
        "UART0"
    }

    fn read(&mut self, offset: u32) -> u32 {
        match offset {
            REG_STATUS => {
                let rx_valid = if self.rx.is_empty() {
                    0
                } else {
                    STATUS_RX_VALID
                };
                STATUS_TX_READY | rx_valid
            }
            REG_BAUDRATE => BAUDRATE,
            REG_RECV => u32::from(self.rx.pop_front().unwrap_or(0)),
            _ => 0,
        }
    }

    fn write(&mut self, offset: u32, value: u32, _strobe: u8) {
        match offset {
            REG_INTERRUPT => self.irq_enabled = value != 0,
            REG_SEND => self.tx.push(value as u8),
            _ => {}
        }
    }

    fn tick(&mut self) -> bool {
        self.irq_enabled && !self.rx.is_empty()
    }
}
