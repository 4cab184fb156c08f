//! Return Address Stack (RAS).
//!
//! The RAS is a specialized predictor for function return addresses. It
//! operates as a hardware stack that pushes addresses on function calls
//! and pops them on returns. The stack pointer saturates at both ends:
//! pushing past capacity shifts the oldest entry out, and popping an
//! empty stack is a no-op rather than an error.

/// Return Address Stack structure.
pub struct Ras {
    /// The stack storage.
    stack: Vec<u32>,
    /// Current stack pointer index (0 = empty, `capacity` = full).
    ptr: usize,
    /// Maximum capacity of the stack.
    capacity: usize,
}

impl Ras {
    /// Creates a new Return Address Stack with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            stack: vec![0; capacity],
            ptr: 0,
            capacity,
        }
    }

    /// Pushes a return address onto the stack.
    ///
    /// If the stack is full, every entry shifts down by one and the new
    /// address lands on top; the oldest call address is lost and the
    /// pointer stays saturated at capacity.
    ///
    /// # Arguments
    ///
    /// * `addr` - The return address to push.
    pub fn push(&mut self, addr: u32) {
        if self.ptr < self.capacity {
            self.stack[self.ptr] = addr;
            self.ptr += 1;
        } else {
            for i in 1..self.capacity {
                self.stack[i - 1] = self.stack[i];
            }
            self.stack[self.capacity - 1] = addr;
        }
    }

    /// Pops a return address from the stack.
    ///
    /// # Returns
    ///
    /// The popped return address, or `None` if the stack is empty.
    /// Popping an empty stack leaves it empty.
    pub fn pop(&mut self) -> Option<u32> {
        if self.ptr == 0 {
            None
        } else {
            self.ptr -= 1;
            Some(self.stack[self.ptr])
        }
    }

    /// Peeks at the top of the stack without removing the entry.
    ///
    /// Used to predict the target of a return instruction; the actual pop
    /// is committed separately once the prediction fires.
    ///
    /// # Returns
    ///
    /// The return address at the top of the stack, or `None` if empty.
    pub fn top(&self) -> Option<u32> {
        if self.ptr == 0 {
            None
        } else {
            Some(self.stack[self.ptr - 1])
        }
    }

    /// Empties the stack.
    pub fn reset(&mut self) {
        self.ptr = 0;
    }
}
