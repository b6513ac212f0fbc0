//! Core types for the stackvm machine.
//!
//! - **Error**: the flat machine fault taxonomy
//! - **Stack**: fixed-capacity operand stack
//! - **Output**: deferred output records
//! - **Config**: stack capacity and execution limit
//!
//! # Layer 0 - No Internal Dependencies

pub mod config;
pub mod error;
pub mod output;
pub mod stack;

pub use config::{MachineConfig, EXECUTION_LIMIT, MAX_STACK_CAPACITY, STACK_CAPACITY};
pub use error::{MachineError, MachineResult};
pub use output::{Output, OutputRecord};
pub use stack::Stack;
