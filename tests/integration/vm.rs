//! Integration tests for instruction semantics.
//!
//! These tests verify:
//! - Stack operations (PUSH, POP, DUP)
//! - Arithmetic operations (ADD, SUB, MUL, DIV, MOD) and operand order
//! - Control flow (JUMP, HALT)
//! - Output ordering and all-or-nothing failure

use crate::common::*;

use stackvm::*;
use stackvm::Instruction::*;

// =============================================================================
// Stack Operation Tests
// =============================================================================

mod stack_operations {
    use super::*;

    #[test]
    fn pop_discards_top() {
        let result = run_plain(&[Push(1), Push(2), Pop, Print, Halt]);
        assert_output(&result, &[1]);
    }

    #[test]
    fn dup_duplicates_top() {
        let result = run_plain(&[Push(5), Dup, Add, Print, Halt]);
        assert_output(&result, &[10]);
    }

    #[test]
    fn dup_on_empty_underflows() {
        assert_error(&run_plain(&[Dup, Halt]), MachineError::StackUnderflow);
    }

    #[test]
    fn print_on_empty_underflows() {
        assert_error(&run_plain(&[Print, Halt]), MachineError::StackUnderflow);
    }

    #[test]
    fn binary_op_with_one_operand_underflows() {
        for op in [Add, Sub, Mul] {
            assert_error(&run_plain(&[Push(1), op, Halt]), MachineError::StackUnderflow);
        }
    }
}

// =============================================================================
// Arithmetic Operation Tests
// =============================================================================

mod arithmetic {
    use super::*;

    #[test]
    fn sub_subtracts_top_from_second() {
        // 20 - 7 = 13
        assert_output(&run_plain(&[Push(20), Push(7), Sub, Print, Halt]), &[13]);
    }

    #[test]
    fn mul_multiplies_top_two() {
        assert_output(&run_plain(&[Push(6), Push(-7), Mul, Print, Halt]), &[-42]);
    }

    #[test]
    fn div_divides_second_by_top() {
        assert_output(&run_plain(&[Push(100), Push(4), Div, Print, Halt]), &[25]);
    }

    #[test]
    fn div_rounds_toward_negative_infinity() {
        assert_output(&run_plain(&[Push(-7), Push(2), Div, Print, Halt]), &[-4]);
        assert_output(&run_plain(&[Push(7), Push(-2), Div, Print, Halt]), &[-4]);
    }

    #[test]
    fn mod_follows_divisor_sign() {
        assert_output(&run_plain(&[Push(-7), Push(2), Mod, Print, Halt]), &[1]);
        assert_output(&run_plain(&[Push(7), Push(-2), Mod, Print, Halt]), &[-1]);
    }

    #[test]
    fn mod_by_zero_fails_regardless_of_dividend() {
        for dividend in [0, 1, -1, i64::MAX, i64::MIN] {
            let result = run_plain(&[Push(dividend), Push(0), Mod, Halt]);
            assert_error(&result, MachineError::DivideByZero);
        }
    }

    #[test]
    fn zero_divisor_reported_before_missing_dividend() {
        assert_error(&run_plain(&[Push(0), Div, Halt]), MachineError::DivideByZero);
    }

    #[test]
    fn overflow_wraps() {
        let result = run_plain(&[Push(i64::MAX), Push(2), Mul, Print, Halt]);
        assert_output(&result, &[-2]);
    }
}

// =============================================================================
// Control Flow Tests
// =============================================================================

mod control_flow {
    use super::*;

    #[test]
    fn halt_stops_before_later_output() {
        let result = run_plain(&[Push(1), Print, Halt, Push(2), Print, Halt]);
        assert_output(&result, &[1]);
    }

    #[test]
    fn jump_backwards_to_earlier_label() {
        // 0: JUMP start  1: PUSH 9  2: PRINT  3: HALT  4: PUSH 4  5: JUMP back
        let program = vec![jump("start"), Push(9), Print, Halt, Push(4), jump("back")];
        let result = run(&program, &labels(&[("start", 4), ("back", 2)]));
        assert_output(&result, &[4]);
    }

    #[test]
    fn jump_past_end_fails_on_next_fetch() {
        // Arrange: the label exists, so the jump itself succeeds
        let program = vec![Push(1), Print, jump("far"), Halt];

        // Act
        let completion = execute(program, labels(&[("far", 10)]));

        // Assert: the fault is raised by the fetch at index 10
        assert_error(&completion, MachineError::IllegalInstructionAccess);
    }

    #[test]
    fn jump_to_end_fails_on_next_fetch() {
        let program = vec![jump("end")];
        let result = run(&program, &labels(&[("end", 1)]));
        assert_error(&result, MachineError::IllegalInstructionAccess);
    }

    #[test]
    fn falling_off_the_end_is_an_error() {
        assert_error(&run_plain(&[Push(1), Print]), MachineError::IllegalInstructionAccess);
    }

    #[test]
    fn empty_program_is_an_error() {
        assert_error(&run_plain(&[]), MachineError::IllegalInstructionAccess);
    }
}

// =============================================================================
// Output Tests
// =============================================================================

mod output {
    use super::*;

    #[test]
    fn output_in_program_order() {
        let mut program = print_each(&[4, -8, 15, 16]);
        program.push(Halt);
        assert_output(&run_plain(&program), &[4, -8, 15, 16]);
    }

    #[test]
    fn failure_discards_accumulated_output() {
        // Two values are printed before the fault; none are returned
        let mut program = print_each(&[1, 2]);
        program.extend([Pop, Halt]);

        let result = run_plain(&program);
        assert_error(&result, MachineError::StackUnderflow);
    }

    #[test]
    fn records_are_emit_entries() {
        let output = run_plain(&[Push(3), Print, Halt]).unwrap();
        assert_eq!(output.records(), &[OutputRecord::Emit(3)]);
    }
}
