//! Machine primitives expressed as steps.
//!
//! These are the only operations the dispatcher uses to touch machine state.

use crate::core::{MachineError, OutputRecord};
use crate::program::Instruction;

use super::state::MachineState;
use super::step::{modify, Step, StepResult};

/// Fetch the instruction under the pointer and count it as executed.
///
/// Fails with [`MachineError::IllegalInstructionAccess`] when the pointer is
/// outside the program; the counter is left untouched in that case.
pub fn fetch_instruction<'p>() -> impl Step<'p, Output = &'p Instruction> {
    |mut state: MachineState<'p>| -> StepResult<'p, &'p Instruction> {
        let program = state.program;
        let instruction = program
            .get(state.instruction_pointer)
            .ok_or(MachineError::IllegalInstructionAccess)?;
        state.instructions_executed += 1;
        Ok((state, instruction))
    }
}

/// Move the pointer to the next instruction.
pub fn advance<'p>() -> impl Step<'p, Output = ()> {
    modify(|state| state.instruction_pointer += 1)
}

/// Move the pointer to `index`. The target is validated by the next fetch.
pub fn jump_to<'p>(index: usize) -> impl Step<'p, Output = ()> {
    modify(move |state| state.instruction_pointer = index)
}

/// Mark the run as halted.
pub fn halt<'p>() -> impl Step<'p, Output = ()> {
    modify(|state| state.halted = true)
}

/// Push `value`, failing with [`MachineError::StackOverflow`] at capacity.
pub fn push_value<'p>(value: i64) -> impl Step<'p, Output = ()> {
    move |mut state: MachineState<'p>| -> StepResult<'p, ()> {
        state.stack.push(value)?;
        Ok((state, ()))
    }
}

/// Pop the tail value, failing with [`MachineError::StackUnderflow`] on empty.
pub fn pop_value<'p>() -> impl Step<'p, Output = i64> {
    |mut state: MachineState<'p>| -> StepResult<'p, i64> {
        let value = state.stack.pop()?;
        Ok((state, value))
    }
}

/// Append `record` after everything already emitted.
pub fn append_output<'p>(record: OutputRecord) -> impl Step<'p, Output = ()> {
    modify(move |state| state.pending_output.append(record))
}

/// Look up a label, failing with [`MachineError::LabelNotFound`].
pub fn resolve_label<'p>(name: &'p str) -> impl Step<'p, Output = usize> {
    move |state: MachineState<'p>| -> StepResult<'p, usize> {
        let target = state
            .labels
            .resolve(name)
            .ok_or(MachineError::LabelNotFound)?;
        Ok((state, target))
    }
}
