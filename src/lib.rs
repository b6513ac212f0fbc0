//! A minimal stack-based bytecode virtual machine.
//!
//! Programs are fixed lists of decoded [`Instruction`]s plus a [`LabelTable`].
//! Execution threads a [`MachineState`](vm::MachineState) through composable
//! [`Step`](vm::Step)s and yields the deferred [`Output`] of every `PRINT`, or
//! the first [`MachineError`] raised.
//!
//! ```
//! use stackvm::{run, Instruction::*, LabelTable};
//!
//! let output = run(&[Push(2), Push(3), Add, Print, Halt], &LabelTable::new()).unwrap();
//! assert_eq!(output.values().collect::<Vec<_>>(), vec![5]);
//! ```

// ═══════════════════════════════════════════════════════════════════════════
// Layer 0: Core (No internal dependencies)
// ═══════════════════════════════════════════════════════════════════════════
pub mod core;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 1: Program (depends on core)
// ═══════════════════════════════════════════════════════════════════════════
pub mod program;

// ═══════════════════════════════════════════════════════════════════════════
// Layer 2: VM (depends on core, program)
// ═══════════════════════════════════════════════════════════════════════════
pub mod vm;

pub use core::{
    MachineConfig, MachineError, MachineResult, Output, OutputRecord, Stack, EXECUTION_LIMIT,
    MAX_STACK_CAPACITY, STACK_CAPACITY,
};
pub use program::{Instruction, LabelTable, Program};
pub use vm::{run, Completion, Machine, MachineState, MachineStatus};
