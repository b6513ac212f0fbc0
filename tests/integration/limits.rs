//! Integration tests for termination and the execution limit.

use crate::common::*;

use stackvm::*;
use stackvm::Instruction::*;

#[test]
fn halt_reports_halted() {
    let completion = execute(vec![Push(1), Print, Halt], LabelTable::new()).unwrap();

    assert_eq!(completion.status, MachineStatus::Halted);
    assert_eq!(completion.instructions_executed, 3);
}

#[test]
fn infinite_loop_is_cut_off_silently() {
    // Arrange: print forever
    let program = vec![Push(1), Print, jump("top")];

    // Act
    let completion = execute(program, labels(&[("top", 0)])).unwrap();

    // Assert
    assert_eq!(completion.status, MachineStatus::LimitExceeded);
    assert_eq!(completion.instructions_executed, EXECUTION_LIMIT + 1);
    assert_eq!(completion.output.len(), 34);
    assert!(completion.output.values().all(|v| v == 1));
}

#[test]
fn halt_on_the_limit_instruction_still_halts() {
    // 100 pushes then HALT as instruction 101: halted wins over the limit
    let mut program = vec![Push(0); 100];
    program.push(Halt);

    let completion = execute(program, LabelTable::new()).unwrap();
    assert_eq!(completion.status, MachineStatus::Halted);
    assert_eq!(completion.instructions_executed, 101);
}

#[test]
fn exactly_limit_instructions_then_halt() {
    // 99 pushes + HALT = 100 instructions: never reaches the limit
    let mut program = vec![Push(0); 99];
    program.push(Halt);

    let completion = execute(program, LabelTable::new()).unwrap();
    assert_eq!(completion.status, MachineStatus::Halted);
    assert_eq!(completion.instructions_executed, 100);
}

#[test]
fn fault_after_limit_is_never_reached() {
    // The underflow sits at index 101 and is never fetched
    let mut program = vec![Push(0); 101];
    program.push(Pop);
    program.extend(vec![Pop; 200]);

    let completion = execute(program, LabelTable::new()).unwrap();
    assert_eq!(completion.status, MachineStatus::LimitExceeded);
}

#[test]
fn raised_limit_allows_longer_runs() {
    let config = MachineConfig::new().with_execution_limit(1_000);
    let program = vec![Push(1), Print, jump("top")];

    let completion = execute_with(config, program, labels(&[("top", 0)])).unwrap();
    assert_eq!(completion.instructions_executed, 1_001);
    assert_eq!(completion.output.len(), 334);
}

#[test]
fn zero_limit_runs_one_instruction() {
    let config = MachineConfig::new().with_execution_limit(0);
    let completion = execute_with(config, vec![Push(1), Print, Halt], LabelTable::new()).unwrap();

    assert_eq!(completion.status, MachineStatus::LimitExceeded);
    assert_eq!(completion.instructions_executed, 1);
    assert!(completion.output.is_empty());
}
