//! Multi-cycle multiplier and divider (RV32M).
//!
//! Both units share the same handshake: `start` loads the operands and
//! raises `busy` for the configured latency; `result` becomes valid once
//! the latency has elapsed. The execute stage tracks the instruction
//! address occupying the unit so a stalled instruction does not pulse
//! `start` again every cycle.
//!
//! Division edge cases follow the RV32M specification: division by zero
//! yields all-ones quotient (or the dividend as remainder); the
//! `i32::MIN / -1` overflow yields `i32::MIN` quotient and zero remainder.

/// Multiply-group operation (funct3 0-3 under funct7 = 1).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MulOp {
    /// Low 32 bits of the product.
    #[default]
    Mul,
    /// High 32 bits of signed × signed.
    Mulh,
    /// High 32 bits of signed × unsigned.
    Mulhsu,
    /// High 32 bits of unsigned × unsigned.
    Mulhu,
}

/// Divide-group operation (funct3 4-7 under funct7 = 1).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DivOp {
    /// Signed quotient.
    #[default]
    Div,
    /// Unsigned quotient.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
}

/// Computes a multiply-group result combinationally.
pub fn multiply(op: MulOp, a: u32, b: u32) -> u32 {
    match op {
        MulOp::Mul => a.wrapping_mul(b),
        MulOp::Mulh => ((i64::from(a as i32) * i64::from(b as i32)) >> 32) as u32,
        MulOp::Mulhsu => ((i64::from(a as i32).wrapping_mul(u64::from(b) as i64)) >> 32) as u32,
        MulOp::Mulhu => ((u64::from(a) * u64::from(b)) >> 32) as u32,
    }
}

/// Computes a divide-group result combinationally.
pub fn divide(op: DivOp, a: u32, b: u32) -> u32 {
    match op {
        DivOp::Div => {
            if b == 0 {
                u32::MAX
            } else if a == i32::MIN as u32 && b == u32::MAX {
                a
            } else {
                ((a as i32) / (b as i32)) as u32
            }
        }
        DivOp::Divu => {
            if b == 0 {
                u32::MAX
            } else {
                a / b
            }
        }
        DivOp::Rem => {
            if b == 0 {
                a
            } else if a == i32::MIN as u32 && b == u32::MAX {
                0
            } else {
                ((a as i32) % (b as i32)) as u32
            }
        }
        DivOp::Remu => {
            if b == 0 {
                a
            } else {
                a % b
            }
        }
    }
}

/// A multi-cycle unit holding one in-flight operation.
///
/// The functional result is computed at `start`; the latency counter only
/// models the cycle cost. `busy` holds until the counter reaches zero, at
/// which point `result` is valid and the occupying instruction may leave
/// execute.
#[derive(Clone, PartialEq, Eq)]
pub struct MultiCycleUnit {
    latency: u32,
    counter: u32,
    busy: bool,
    result: u32,
    occupant: Option<u32>,
}

impl MultiCycleUnit {
    /// Creates an idle unit with the given latency in cycles.
    pub fn new(latency: u32) -> Self {
        Self {
            latency,
            counter: 0,
            busy: false,
            result: 0,
            occupant: None,
        }
    }

    /// Returns `true` while the unit is counting down.
    pub fn busy(&self) -> bool {
        self.busy && self.counter > 0
    }

    /// Returns the completed result once the latency has elapsed.
    pub fn result(&self) -> Option<u32> {
        if self.busy && self.counter == 0 {
            Some(self.result)
        } else {
            None
        }
    }

    /// Returns the address of the instruction occupying the unit.
    pub fn occupant(&self) -> Option<u32> {
        self.occupant
    }

    /// Starts an operation for the instruction at `pc`.
    ///
    /// Must only be called when a *new* instruction address arrives while
    /// the unit is idle; the execute stage enforces this by comparing the
    /// occupant address.
    pub fn start(&mut self, pc: u32, result: u32) {
        self.busy = true;
        self.counter = self.latency;
        self.result = result;
        self.occupant = Some(pc);
    }

    /// Releases the unit once the occupying instruction has moved on.
    ///
    /// Clearing the occupant lets a later visit to the same address (a
    /// loop iteration) start the unit again.
    pub fn release(&mut self) {
        self.busy = false;
        self.occupant = None;
    }

    /// Advances the latency counter by one cycle (clock edge).
    pub fn tick(&mut self) {
        if self.busy && self.counter > 0 {
            self.counter -= 1;
        }
    }

    /// Returns the unit to its reset state.
    pub fn reset(&mut self) {
        self.counter = 0;
        self.busy = false;
        self.result = 0;
        self.occupant = None;
    }
}
