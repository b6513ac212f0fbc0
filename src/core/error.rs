//! Error types for the stackvm machine.
//!
//! The taxonomy is flat and closed: every fault the engine can raise is one
//! of five kinds, none of which carries a payload. A run either yields its
//! complete output or exactly one of these errors. A sixth kind rejects a
//! [`MachineConfig`](super::MachineConfig) before any instruction runs.
//!
//! # Error Codes
//!
//! | Kind | Code |
//! |---|---|
//! | stack underflow | 1001 |
//! | stack overflow | 1002 |
//! | divide by zero | 1003 |
//! | illegal instruction access | 1004 |
//! | label not found | 1005 |
//! | invalid config | 1006 |

/// A fault raised while executing a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum MachineError {
    /// Attempted to pop from an empty stack.
    #[error("stack underflow")]
    StackUnderflow,

    /// Attempted to push onto a stack already at capacity.
    #[error("stack overflow")]
    StackOverflow,

    /// `DIV` or `MOD` with a zero divisor.
    #[error("divide by zero")]
    DivideByZero,

    /// The instruction pointer was outside the program when fetched.
    #[error("illegal instruction access")]
    IllegalInstructionAccess,

    /// A `JUMP` named a label missing from the label table.
    #[error("label not found")]
    LabelNotFound,

    /// The configured stack capacity is above [`MAX_STACK_CAPACITY`](super::MAX_STACK_CAPACITY).
    #[error("invalid machine config")]
    InvalidConfig,
}

/// Result type for machine operations.
pub type MachineResult<T> = Result<T, MachineError>;

impl MachineError {
    /// Get the error code for programmatic handling.
    pub fn code(&self) -> u32 {
        match self {
            MachineError::StackUnderflow => 1001,
            MachineError::StackOverflow => 1002,
            MachineError::DivideByZero => 1003,
            MachineError::IllegalInstructionAccess => 1004,
            MachineError::LabelNotFound => 1005,
            MachineError::InvalidConfig => 1006,
        }
    }

    /// Whether the fault came from the operand stack.
    pub fn is_stack_fault(&self) -> bool {
        matches!(self, MachineError::StackUnderflow | MachineError::StackOverflow)
    }
}
