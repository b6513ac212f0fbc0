//! Virtual machine for stackvm programs.
//!
//! - **state**: the machine state threaded through a run
//! - **step**: the effect-aware state transformer every operation is built on
//! - **primitives**: fetch, pointer moves, halt, push/pop, output
//! - **dispatch**: instruction → primitive sequence
//! - **executor**: the fetch-execute loop and the [`run`] entry point

pub mod dispatch;
pub mod executor;
pub mod primitives;
pub mod state;
pub mod step;

pub use executor::{run, Completion, Machine};
pub use state::{MachineState, MachineStatus};
pub use step::{BoxedStep, Step, StepResult};
