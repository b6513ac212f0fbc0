//! Instruction dispatcher.
//!
//! Maps each [`Instruction`] to a sequence of primitive steps. Every
//! instruction except `JUMP` and `HALT` ends by advancing the pointer.
//!
//! Binary arithmetic pops the right operand first: with `[.., x, y]` on the
//! stack, `SUB` leaves `x - y`. `DIV` and `MOD` pop and check the divisor
//! before touching the dividend.

use crate::core::{MachineError, OutputRecord};
use crate::program::Instruction;

use super::primitives::{
    advance, append_output, halt, jump_to, pop_value, push_value, resolve_label,
};
use super::state::MachineState;
use super::step::{Step, StepResult};

/// Build the step that executes `instruction`.
pub fn dispatch<'p>(instruction: &'p Instruction) -> impl Step<'p, Output = ()> {
    move |state: MachineState<'p>| -> StepResult<'p, ()> {
        match instruction {
            Instruction::Push(value) => push_value(*value).then(advance()).run(state),
            Instruction::Pop => pop_value().then(advance()).run(state),
            Instruction::Print => pop_value()
                .and_then(|value| append_output(OutputRecord::Emit(value)))
                .then(advance())
                .run(state),
            Instruction::Dup => pop_value()
                .and_then(|value| push_value(value).then(push_value(value)))
                .then(advance())
                .run(state),
            Instruction::Add => binary(i64::wrapping_add).then(advance()).run(state),
            Instruction::Sub => binary(i64::wrapping_sub).then(advance()).run(state),
            Instruction::Mul => binary(i64::wrapping_mul).then(advance()).run(state),
            Instruction::Div => division(floor_div).then(advance()).run(state),
            Instruction::Mod => division(floor_mod).then(advance()).run(state),
            Instruction::Jump(label) => resolve_label(label)
                .and_then(|target| jump_to(target))
                .run(state),
            Instruction::Halt => halt().run(state),
        }
    }
}

/// Pop y, pop x, push `op(x, y)`.
fn binary<'p>(op: fn(i64, i64) -> i64) -> impl Step<'p, Output = ()> {
    pop_value().and_then(move |y| pop_value().and_then(move |x| push_value(op(x, y))))
}

/// Like [`binary`], but the divisor is rejected before the dividend is popped.
fn division<'p>(op: fn(i64, i64) -> i64) -> impl Step<'p, Output = ()> {
    pop_value()
        .and_then(|divisor| nonzero(divisor))
        .and_then(move |y| pop_value().and_then(move |x| push_value(op(x, y))))
}

fn nonzero<'p>(divisor: i64) -> impl Step<'p, Output = i64> {
    move |state: MachineState<'p>| -> StepResult<'p, i64> {
        if divisor == 0 {
            return Err(MachineError::DivideByZero);
        }
        Ok((state, divisor))
    }
}

/// Division rounding toward negative infinity. Wraps on `i64::MIN / -1`.
pub fn floor_div(x: i64, y: i64) -> i64 {
    let quotient = x.wrapping_div(y);
    if x.wrapping_rem(y) != 0 && ((x < 0) != (y < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

/// Remainder paired with [`floor_div`]; takes the sign of the divisor.
pub fn floor_mod(x: i64, y: i64) -> i64 {
    let remainder = x.wrapping_rem(y);
    if remainder != 0 && ((remainder < 0) != (y < 0)) {
        remainder + y
    } else {
        remainder
    }
}
