//! Machine state threaded through every step of a run.

use serde::{Deserialize, Serialize};

use crate::core::{Output, Stack};
use crate::program::{Instruction, LabelTable};

/// Status of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineStatus {
    /// Still fetching instructions.
    Running,
    /// A `HALT` was dispatched.
    Halted,
    /// More than the configured number of instructions executed.
    LimitExceeded,
    /// A step failed; the state was discarded.
    Errored,
}

impl MachineStatus {
    /// Whether the run has stopped.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MachineStatus::Running)
    }
}

/// Complete state of the machine during a run.
///
/// Created once per run and dropped when the run ends. The program and label
/// table are borrowed and never change while the run is live.
#[derive(Debug, Clone)]
pub struct MachineState<'p> {
    pub(crate) stack: Stack,
    pub(crate) instruction_pointer: usize,
    pub(crate) program: &'p [Instruction],
    pub(crate) labels: &'p LabelTable,
    pub(crate) halted: bool,
    pub(crate) instructions_executed: u64,
    pub(crate) pending_output: Output,
}

impl<'p> MachineState<'p> {
    /// Fresh state: empty stack, pointer at 0, not halted, nothing executed.
    pub fn new(program: &'p [Instruction], labels: &'p LabelTable, stack_capacity: usize) -> Self {
        Self {
            stack: Stack::with_capacity(stack_capacity),
            instruction_pointer: 0,
            program,
            labels,
            halted: false,
            instructions_executed: 0,
            pending_output: Output::new(),
        }
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn instruction_pointer(&self) -> usize {
        self.instruction_pointer
    }

    pub fn program(&self) -> &'p [Instruction] {
        self.program
    }

    pub fn labels(&self) -> &'p LabelTable {
        self.labels
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn instructions_executed(&self) -> u64 {
        self.instructions_executed
    }

    pub fn pending_output(&self) -> &Output {
        &self.pending_output
    }

    /// Hand the accumulated output to the caller, consuming the state.
    pub fn into_output(self) -> Output {
        self.pending_output
    }
}
