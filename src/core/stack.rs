//! Operand stack for the stackvm machine.
//!
//! The stack is a buffer allocated once at its full capacity with an explicit
//! length counter. It never grows: a push at capacity is a
//! [`MachineError::StackOverflow`], a pop on empty is a
//! [`MachineError::StackUnderflow`].

use std::fmt;

use super::config::STACK_CAPACITY;
use super::error::{MachineError, MachineResult};

/// A fixed-capacity, bounds-checked stack of signed integers.
#[derive(Clone, PartialEq, Eq)]
pub struct Stack {
    slots: Box<[i64]>,
    len: usize,
}

impl Stack {
    /// Create an empty stack holding at most [`STACK_CAPACITY`] values.
    pub fn new() -> Self {
        Self::with_capacity(STACK_CAPACITY)
    }

    /// Create an empty stack with the given fixed capacity.
    ///
    /// # Panics
    ///
    /// Panics if the buffer cannot be allocated. The executor validates its
    /// configured capacity against [`MAX_STACK_CAPACITY`](super::MAX_STACK_CAPACITY) first.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Get the current depth of the stack.
    #[inline]
    pub fn depth(&self) -> usize {
        self.len
    }

    /// Maximum number of values this stack can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.slots.len()
    }

    /// Push a value with overflow checking.
    pub fn push(&mut self, value: i64) -> MachineResult<()> {
        if self.is_full() {
            return Err(MachineError::StackOverflow);
        }
        self.slots[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Pop the tail value with underflow checking.
    pub fn pop(&mut self) -> MachineResult<i64> {
        if self.is_empty() {
            return Err(MachineError::StackUnderflow);
        }
        self.len -= 1;
        Ok(self.slots[self.len])
    }

    /// Peek at the tail value without removing it.
    pub fn peek(&self) -> Option<i64> {
        self.as_slice().last().copied()
    }

    /// Live values, bottom first.
    pub fn as_slice(&self) -> &[i64] {
        &self.slots[..self.len]
    }

    /// Drop every value; capacity is unchanged.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Stack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Stack{:?}", self.as_slice())
    }
}
