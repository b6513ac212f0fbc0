//! Effect-aware state transformer.
//!
//! A [`Step`] consumes the current [`MachineState`] by value and either hands
//! back the next state together with a value, or fails with a
//! [`MachineError`]. Steps compose with [`Step::and_then`]: the second step
//! only runs if the first succeeded, and a failure drops the state it was
//! given, so nothing from a failed step is ever observed by the caller.
//!
//! Every read or write of machine state during a run goes through a step.
//!
//! ```
//! use stackvm::vm::step::{fail, gets, pure, Step};
//! use stackvm::vm::MachineState;
//! use stackvm::{LabelTable, MachineError};
//!
//! let labels = LabelTable::new();
//! let state = MachineState::new(&[], &labels, 4);
//!
//! let pointer = gets(|s| s.instruction_pointer())
//!     .and_then(|ip| pure(ip + 1))
//!     .eval(state.clone());
//! assert_eq!(pointer, Ok(1));
//!
//! let failed = fail::<u8>(MachineError::LabelNotFound)
//!     .map(|v| v + 1)
//!     .eval(state);
//! assert_eq!(failed, Err(MachineError::LabelNotFound));
//! ```

use crate::core::{MachineError, MachineResult};

use super::state::MachineState;

/// Outcome of running a step: the next state and a value, or the first error.
pub type StepResult<'p, T> = MachineResult<(MachineState<'p>, T)>;

/// A composable unit of computation over the machine state.
pub trait Step<'p>: Sized {
    /// Value produced alongside the next state.
    type Output;

    /// Run against `state`.
    fn run(self, state: MachineState<'p>) -> StepResult<'p, Self::Output>;

    /// Run this step, then feed its value to `next` and run the step it builds.
    ///
    /// `next` is never invoked if this step fails.
    fn and_then<F, N>(self, next: F) -> AndThen<Self, F>
    where
        F: FnOnce(Self::Output) -> N,
        N: Step<'p>,
    {
        AndThen { first: self, next }
    }

    /// Run this step, discard its value, then run `next`.
    fn then<N>(self, next: N) -> Then<Self, N>
    where
        N: Step<'p>,
    {
        Then { first: self, second: next }
    }

    /// Transform the produced value.
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        F: FnOnce(Self::Output) -> U,
    {
        Map { step: self, f }
    }

    /// Erase the concrete type, e.g. to return different steps from match arms.
    fn boxed(self) -> BoxedStep<'p, Self::Output>
    where
        Self: 'p,
    {
        BoxedStep {
            run: Box::new(move |state: MachineState<'p>| self.run(state)),
        }
    }

    /// Run and keep only the final state.
    fn exec(self, state: MachineState<'p>) -> MachineResult<MachineState<'p>> {
        self.run(state).map(|(state, _)| state)
    }

    /// Run and keep only the produced value.
    fn eval(self, state: MachineState<'p>) -> MachineResult<Self::Output> {
        self.run(state).map(|(_, value)| value)
    }
}

impl<'p, F, T> Step<'p> for F
where
    F: FnOnce(MachineState<'p>) -> StepResult<'p, T>,
{
    type Output = T;

    #[inline]
    fn run(self, state: MachineState<'p>) -> StepResult<'p, T> {
        self(state)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Constructors
// ═══════════════════════════════════════════════════════════════════════════

/// Yield a copy of the current state, leaving it unchanged.
pub fn get<'p>() -> impl Step<'p, Output = MachineState<'p>> {
    |state: MachineState<'p>| -> StepResult<'p, MachineState<'p>> { Ok((state.clone(), state)) }
}

/// Yield a projection of the current state without copying it.
pub fn gets<'p, F, T>(f: F) -> impl Step<'p, Output = T>
where
    F: FnOnce(&MachineState<'p>) -> T,
{
    move |state: MachineState<'p>| -> StepResult<'p, T> {
        let value = f(&state);
        Ok((state, value))
    }
}

/// Replace the whole state.
pub fn set<'p>(new_state: MachineState<'p>) -> impl Step<'p, Output = ()> {
    move |_: MachineState<'p>| -> StepResult<'p, ()> { Ok((new_state, ())) }
}

/// Update the state in place.
pub fn modify<'p, F>(f: F) -> impl Step<'p, Output = ()>
where
    F: FnOnce(&mut MachineState<'p>),
{
    move |mut state: MachineState<'p>| -> StepResult<'p, ()> {
        f(&mut state);
        Ok((state, ()))
    }
}

/// Abort this and every step composed after it.
pub fn fail<'p, T>(error: MachineError) -> impl Step<'p, Output = T> {
    move |_: MachineState<'p>| -> StepResult<'p, T> { Err(error) }
}

/// Yield `value` without touching the state.
pub fn pure<'p, T>(value: T) -> impl Step<'p, Output = T> {
    move |state: MachineState<'p>| -> StepResult<'p, T> { Ok((state, value)) }
}

// ═══════════════════════════════════════════════════════════════════════════
// Combinators
// ═══════════════════════════════════════════════════════════════════════════

/// Step returned by [`Step::and_then`].
#[must_use = "steps do nothing unless run"]
pub struct AndThen<S, F> {
    first: S,
    next: F,
}

impl<'p, S, F, N> Step<'p> for AndThen<S, F>
where
    S: Step<'p>,
    F: FnOnce(S::Output) -> N,
    N: Step<'p>,
{
    type Output = N::Output;

    fn run(self, state: MachineState<'p>) -> StepResult<'p, N::Output> {
        let (state, value) = self.first.run(state)?;
        (self.next)(value).run(state)
    }
}

/// Step returned by [`Step::then`].
#[must_use = "steps do nothing unless run"]
pub struct Then<A, B> {
    first: A,
    second: B,
}

impl<'p, A, B> Step<'p> for Then<A, B>
where
    A: Step<'p>,
    B: Step<'p>,
{
    type Output = B::Output;

    fn run(self, state: MachineState<'p>) -> StepResult<'p, B::Output> {
        let (state, _) = self.first.run(state)?;
        self.second.run(state)
    }
}

/// Step returned by [`Step::map`].
#[must_use = "steps do nothing unless run"]
pub struct Map<S, F> {
    step: S,
    f: F,
}

impl<'p, S, F, U> Step<'p> for Map<S, F>
where
    S: Step<'p>,
    F: FnOnce(S::Output) -> U,
{
    type Output = U;

    fn run(self, state: MachineState<'p>) -> StepResult<'p, U> {
        let (state, value) = self.step.run(state)?;
        Ok((state, (self.f)(value)))
    }
}

/// Type-erased step returned by [`Step::boxed`].
#[must_use = "steps do nothing unless run"]
pub struct BoxedStep<'p, T> {
    run: Box<dyn FnOnce(MachineState<'p>) -> StepResult<'p, T> + 'p>,
}

impl<'p, T> Step<'p> for BoxedStep<'p, T> {
    type Output = T;

    fn run(self, state: MachineState<'p>) -> StepResult<'p, T> {
        (self.run)(state)
    }
}
