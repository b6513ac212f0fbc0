//! Runtime limits for the machine.
//!
//! Both limits default to compile-time constants. A [`MachineConfig`] only
//! describes the limits; the executor enforces them.

use serde::{Deserialize, Serialize};

use super::error::{MachineError, MachineResult};

/// Maximum number of values the operand stack may hold.
pub const STACK_CAPACITY: usize = 1024;

/// Largest stack capacity a [`MachineConfig`] may request (8 MiB of slots).
pub const MAX_STACK_CAPACITY: usize = 1 << 20;

/// A run stops silently once more than this many instructions have executed.
pub const EXECUTION_LIMIT: u64 = 100;

/// Configuration for a [`Machine`](crate::vm::Machine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Stack capacity; pushing onto a full stack is a stack overflow.
    pub stack_capacity: usize,
    /// Instruction ceiling per run (resource limit, not an error).
    pub execution_limit: u64,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            stack_capacity: STACK_CAPACITY,
            execution_limit: EXECUTION_LIMIT,
        }
    }
}

impl MachineConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stack capacity.
    pub fn with_stack_capacity(mut self, stack_capacity: usize) -> Self {
        self.stack_capacity = stack_capacity;
        self
    }

    /// Replace the stack capacity, rejecting values above [`MAX_STACK_CAPACITY`].
    pub fn try_with_stack_capacity(self, stack_capacity: usize) -> MachineResult<Self> {
        let config = self.with_stack_capacity(stack_capacity);
        config.validate()?;
        Ok(config)
    }

    /// Check the limits before a run allocates anything.
    pub fn validate(&self) -> MachineResult<()> {
        if self.stack_capacity > MAX_STACK_CAPACITY {
            return Err(MachineError::InvalidConfig);
        }
        Ok(())
    }

    /// Replace the execution limit.
    pub fn with_execution_limit(mut self, execution_limit: u64) -> Self {
        self.execution_limit = execution_limit;
        self
    }
}
