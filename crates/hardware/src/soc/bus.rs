//! Region-decoded system bus with a three-phase data protocol.
//!
//! The data port follows request → grant → completion: the memory stage
//! asserts a read or write request, the bus grants it when idle, and
//! after the configured latency raises `read_valid` (with the data) or
//! `write_valid`. Writes complete on the response, never on data-accept.
//! The instruction port bypasses the state machine and reads RAM
//! combinationally.
//!
//! Address regions are selected by the upper three address bits:
//!
//! | Region | Base          | Device            |
//! |--------|---------------|-------------------|
//! | 0      | `0x0000_0000` | RAM               |
//! | 1      | `0x2000_0000` | VGA (unmapped)    |
//! | 2      | `0x4000_0000` | UART              |
//! | 4      | `0x8000_0000` | Timer             |
//!
//! Unmapped regions read zero and swallow writes.

use crate::config::SystemConfig;
use crate::soc::devices::{Timer, Uart};
use crate::soc::memory::Ram;
use crate::soc::traits::Device;

/// Shift selecting the bus region from an address.
const REGION_SHIFT: u32 = 29;
/// Mask yielding the device-relative offset within a region.
const OFFSET_MASK: u32 = (1 << REGION_SHIFT) - 1;

const REGION_RAM: u32 = 0;
const REGION_UART: u32 = 2;
const REGION_TIMER: u32 = 4;

#[derive(Clone, Copy, PartialEq, Eq)]
enum BusState {
    Idle,
    Read { addr: u32, wait: u32 },
    ReadDone { data: u32 },
    Write { addr: u32, data: u32, strobe: u8, wait: u32 },
    WriteDone,
}

/// The system bus and every device behind it.
pub struct SystemBus {
    ram: Ram,
    uart: Uart,
    timer: Timer,
    ram_base: u32,
    latency: u32,
    state: BusState,
    irq: u32,
}

impl SystemBus {
    /// Builds the bus and devices from the system configuration.
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            ram: Ram::new(config.ram_size),
            uart: Uart::new(),
            timer: Timer::new(),
            ram_base: config.ram_base,
            // A zero-latency bus still takes one cycle to respond.
            latency: config.bus_latency.max(1),
            state: BusState::Idle,
            irq: 0,
        }
    }

    /// Combinational instruction fetch.
    ///
    /// Only RAM is executable; fetches from any other region (or past the
    /// end of RAM) return `None` and fetch injects a NOP.
    pub fn fetch(&self, addr: u32) -> Option<u32> {
        if addr >> REGION_SHIFT != REGION_RAM {
            return None;
        }
        self.ram.peek_word(addr.wrapping_sub(self.ram_base))
    }

    /// Requests a read transaction. Returns `true` when granted.
    pub fn begin_read(&mut self, addr: u32) -> bool {
        if self.state != BusState::Idle {
            return false;
        }
        self.state = BusState::Read {
            addr,
            wait: self.latency,
        };
        true
    }

    /// Requests a write transaction. Returns `true` when granted.
    pub fn begin_write(&mut self, addr: u32, data: u32, strobe: u8) -> bool {
        if self.state != BusState::Idle {
            return false;
        }
        self.state = BusState::Write {
            addr,
            data,
            strobe,
            wait: self.latency,
        };
        true
    }

    /// Read data, valid for exactly one cycle at completion.
    pub fn read_valid(&self) -> Option<u32> {
        match self.state {
            BusState::ReadDone { data } => Some(data),
            _ => None,
        }
    }

    /// Write response, asserted for exactly one cycle at completion.
    pub fn write_valid(&self) -> bool {
        self.state == BusState::WriteDone
    }

    /// Currently asserted interrupt lines (bit 0 timer, bit 1 UART).
    pub fn irq_lines(&self) -> u32 {
        self.irq
    }

    /// Advances the bus and all devices by one clock cycle.
    pub fn tick(&mut self) {
        self.state = match self.state {
            BusState::Idle => BusState::Idle,
            BusState::Read { addr, wait } => {
                if wait <= 1 {
                    let data = self.route_read(addr);
                    BusState::ReadDone { data }
                } else {
                    BusState::Read {
                        addr,
                        wait: wait - 1,
                    }
                }
            }
            BusState::ReadDone { .. } => BusState::Idle,
            BusState::Write {
                addr,
                data,
                strobe,
                wait,
            } => {
                if wait <= 1 {
                    self.route_write(addr, data, strobe);
                    BusState::WriteDone
                } else {
                    BusState::Write {
                        addr,
                        data,
                        strobe,
                        wait: wait - 1,
                    }
                }
            }
            BusState::WriteDone => BusState::Idle,
        };

        let mut irq = 0;
        if self.timer.tick() {
            irq |= 1;
        }
        if self.uart.tick() {
            irq |= 2;
        }
        self.irq = irq;
    }

    fn route_read(&mut self, addr: u32) -> u32 {
        let offset = addr & OFFSET_MASK;
        match addr >> REGION_SHIFT {
            REGION_RAM => self.ram.read(addr.wrapping_sub(self.ram_base)),
            REGION_UART => self.uart.read(offset),
            REGION_TIMER => self.timer.read(offset),
            _ => 0,
        }
    }

    fn route_write(&mut self, addr: u32, data: u32, strobe: u8) {
        let offset = addr & OFFSET_MASK;
        match addr >> REGION_SHIFT {
            REGION_RAM => self.ram.write(addr.wrapping_sub(self.ram_base), data, strobe),
            REGION_UART => self.uart.write(offset, data, strobe),
            REGION_TIMER => self.timer.write(offset, data, strobe),
            _ => {}
        }
    }

    /// Backing RAM (loader access).
    pub fn ram_mut(&mut self) -> &mut Ram {
        &mut self.ram
    }

    /// UART peripheral (host-side buffer access).
    pub fn uart_mut(&mut self) -> &mut Uart {
        &mut self.uart
    }

    /// Returns the bus and all devices to their reset state, keeping RAM
    /// contents so a loaded program survives a core reset.
    pub fn reset(&mut self) {
        self.uart = Uart::new();
        self.timer = Timer::new();
        self.state = BusState::Idle;
        self.irq = 0;
    }
}
