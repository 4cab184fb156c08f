//! Generic edge-triggered pipeline register.
//!
//! Every inter-stage register shares the same three behaviors, resolved
//! at the clock edge in this priority:
//! 1. **Flush:** the register captures the payload's reset value,
//!    injecting a bubble.
//! 2. **Stall:** the register holds its current contents.
//! 3. **Capture:** the register takes whatever the upstream stage drove
//!    onto its input during the evaluation phase.
//!
//! Flush wins over stall; control flushes must land even on a cycle where
//! a hold was also requested.

/// An edge-triggered register between two pipeline stages.
#[derive(Clone, Default)]
pub struct Latch<T: Clone + Default> {
    current: T,
    input: T,
    stall: bool,
    flush: bool,
}

impl<T: Clone + Default> Latch<T> {
    /// Creates a latch holding the payload's reset value.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value visible to the downstream stage this cycle.
    pub fn output(&self) -> &T {
        &self.current
    }

    /// Drives the value to capture at the next clock edge.
    pub fn set_input(&mut self, value: T) {
        self.input = value;
    }

    /// Requests a hold at the next clock edge.
    pub fn set_stall(&mut self, stall: bool) {
        self.stall = stall;
    }

    /// Requests a bubble at the next clock edge.
    pub fn set_flush(&mut self, flush: bool) {
        self.flush = flush;
    }

    /// Advances the latch by one clock edge and clears the control inputs.
    pub fn tick(&mut self) {
        if self.flush {
            self.current = T::default();
        } else if !self.stall {
            self.current = self.input.clone();
        }
        self.stall = false;
        self.flush = false;
    }

    /// Returns the latch to its reset state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
