//! Fetch-execute loop.
//!
//! Each cycle fetches the instruction under the pointer, dispatches it, then
//! checks for termination:
//!
//! 1. `halted` set → [`MachineStatus::Halted`]
//! 2. more than `execution_limit` instructions executed →
//!    [`MachineStatus::LimitExceeded`]
//!
//! Both return the accumulated output. Any failing step ends the run with that
//! error and no output at all.

use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::core::{MachineConfig, MachineResult, Output};
use crate::program::{Instruction, LabelTable, Program};

use super::dispatch::dispatch;
use super::primitives::fetch_instruction;
use super::state::{MachineState, MachineStatus};
use super::step::Step;

/// Result of a run that did not fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Output records in program order.
    pub output: Output,
    /// [`MachineStatus::Halted`] or [`MachineStatus::LimitExceeded`].
    pub status: MachineStatus,
    /// Instructions fetched during the run.
    pub instructions_executed: u64,
}

/// The stackvm executor.
///
/// Holds only configuration; each run builds and drops its own state.
#[derive(Debug, Clone, Default)]
pub struct Machine {
    pub config: MachineConfig,
}

impl Machine {
    /// Create a machine with the default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a machine with custom limits.
    pub fn with_config(config: MachineConfig) -> Self {
        Self { config }
    }

    /// Run `program` and return its output.
    pub fn run(&self, program: &Program) -> MachineResult<Output> {
        self.execute(program).map(|completion| completion.output)
    }

    /// Run `program` and report how it terminated.
    pub fn execute(&self, program: &Program) -> MachineResult<Completion> {
        self.execute_with_labels(&program.instructions, &program.labels)
    }

    /// Run a bare instruction list against a label table.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            instructions = instructions.len(),
            labels = labels.len(),
            stack_capacity = self.config.stack_capacity,
            execution_limit = self.config.execution_limit,
        )
    )]
    pub fn execute_with_labels(
        &self,
        instructions: &[Instruction],
        labels: &LabelTable,
    ) -> MachineResult<Completion> {
        if let Err(error) = self.config.validate() {
            debug!(%error, code = error.code(), "config rejected");
            return Err(error);
        }
        let mut state = MachineState::new(instructions, labels, self.config.stack_capacity);

        loop {
            let pointer = state.instruction_pointer;
            state = match cycle().run(state) {
                Ok((state, instruction)) => {
                    trace!(
                        pointer,
                        %instruction,
                        jumped = instruction.transfers_control(),
                        depth = state.stack.depth(),
                        "dispatched"
                    );
                    state
                }
                Err(error) => {
                    debug!(%error, code = error.code(), pointer, status = ?MachineStatus::Errored, "run failed");
                    return Err(error);
                }
            };

            let status = self.status(&state);
            if status.is_terminal() {
                debug!(
                    ?status,
                    instructions_executed = state.instructions_executed,
                    records = state.pending_output.len(),
                    "run finished"
                );
                return Ok(Completion {
                    instructions_executed: state.instructions_executed,
                    output: state.into_output(),
                    status,
                });
            }
        }
    }

    fn status(&self, state: &MachineState<'_>) -> MachineStatus {
        if state.halted {
            MachineStatus::Halted
        } else if state.instructions_executed > self.config.execution_limit {
            MachineStatus::LimitExceeded
        } else {
            MachineStatus::Running
        }
    }
}

/// One fetch-dispatch cycle, yielding the instruction it executed.
fn cycle<'p>() -> impl Step<'p, Output = &'p Instruction> {
    fetch_instruction().and_then(|instruction| dispatch(instruction).map(move |_| instruction))
}

/// Run `program` with the default limits.
///
/// Returns every output record in program order, or the first error raised.
/// Running past the execution limit is not an error.
pub fn run(program: &[Instruction], labels: &LabelTable) -> MachineResult<Output> {
    Machine::new()
        .execute_with_labels(program, labels)
        .map(|completion| completion.output)
}
