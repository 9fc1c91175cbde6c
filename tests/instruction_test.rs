//! Tests for the shared instruction scaffolding: operand fetching, sizing,
//! breakpoint propagation and text rendering.
//!
//! These run against a scripted state so every fetch and invocation can be
//! observed.

mod common;

use common::{Invocation, MockState, Recorder};
use lib65816::modes::{
    Absolute, AbsoluteLong, AbsoluteLongControlFlow, Immediate16, Immediate8, Implied,
};
use lib65816::{AddressingMode, ExecutionError, Instruction, Long, MemoryAccess, Op};

// ========== Fetching ==========

#[test]
fn test_one_byte_instruction_fetches_nothing() {
    let mut state = MockState::new(&[0x18]);
    let instruction = Op::<Implied, Recorder>::new();

    let cycles = instruction.execute(&mut state).unwrap();

    assert_eq!(cycles, 7, "operator cycles pass through unchanged");
    assert!(state.fetches.is_empty());
    assert_eq!(state.invocations, vec![Invocation::Implied]);
}

#[test]
fn test_two_byte_instruction_fetches_one_byte() {
    let mut state = MockState::new(&[0xC2, 0x30]);
    let instruction = Op::<Immediate8, Recorder>::new();

    instruction.execute(&mut state).unwrap();

    assert_eq!(state.fetches, vec![1]);
    assert_eq!(state.invocations, vec![Invocation::Immediate(0x30)]);
}

#[test]
fn test_three_byte_instruction_fetches_low_then_high() {
    let mut state = MockState::new(&[0xA9, 0xCD, 0xAB]);
    let instruction = Op::<Immediate16, Recorder>::new();

    instruction.execute(&mut state).unwrap();

    assert_eq!(state.fetches, vec![1, 2]);
    assert_eq!(state.invocations, vec![Invocation::Immediate(0xABCD)]);
}

#[test]
fn test_four_byte_instruction_fetches_low_high_bank() {
    let mut state = MockState::new(&[0xAF, 0x56, 0x34, 0x12]);
    let instruction = Op::<AbsoluteLong, Recorder>::new();

    instruction.execute(&mut state).unwrap();

    assert_eq!(state.fetches, vec![1, 2, 3]);
    assert_eq!(
        state.invocations,
        vec![Invocation::Access(MemoryAccess::new(Long::new(0x123456)))]
    );
}

#[test]
fn test_four_byte_control_flow_forwards_target() {
    let mut state = MockState::new(&[0x5C, 0x00, 0x80, 0x01]);
    let instruction = Op::<AbsoluteLongControlFlow, Recorder>::new();

    instruction.execute(&mut state).unwrap();

    assert_eq!(state.fetches, vec![1, 2, 3]);
    assert_eq!(
        state.invocations,
        vec![Invocation::Jump(Long::from_word(0x8000, 0x01))]
    );
}

fn assert_fetches_size_minus_one(instruction: &dyn Instruction<MockState>, program: &[u8]) {
    let mut state = MockState::new(program);
    instruction.execute(&mut state).unwrap();

    let expected: Vec<usize> = (1..instruction.size()).collect();
    assert_eq!(state.fetches, expected, "{}", instruction.mnemonic());
}

#[test]
fn test_fetch_count_is_size_minus_one() {
    assert_fetches_size_minus_one(&Op::<Implied, Recorder>::new(), &[0x18]);
    assert_fetches_size_minus_one(&Op::<Immediate8, Recorder>::new(), &[0xA9, 0x01]);
    assert_fetches_size_minus_one(&Op::<Absolute, Recorder>::new(), &[0xAD, 0x01, 0x02]);
    assert_fetches_size_minus_one(
        &Op::<AbsoluteLong, Recorder>::new(),
        &[0xAF, 0x01, 0x02, 0x03],
    );
}

#[test]
fn test_fault_on_second_fetch_stops_third() {
    let mut state = MockState::new(&[0xAF, 0x56, 0x34, 0x12]);
    state.fault_at = Some(2);
    let instruction = Op::<AbsoluteLong, Recorder>::new();

    assert_eq!(
        instruction.execute(&mut state),
        Err(ExecutionError::DecodeFault {
            address: Long::new(2)
        })
    );
    assert_eq!(state.fetches, vec![1]);
    assert!(state.invocations.is_empty());
}

#[test]
fn test_fault_on_first_fetch_stops_everything() {
    let mut state = MockState::new(&[0xAD, 0x34, 0x12]);
    state.fault_at = Some(1);
    let instruction = Op::<Absolute, Recorder>::new();

    assert!(matches!(
        instruction.execute(&mut state),
        Err(ExecutionError::DecodeFault { .. })
    ));
    assert!(state.fetches.is_empty());
    assert!(state.invocations.is_empty());
}

#[test]
fn test_memory_fault_from_state_propagates() {
    let mut state = MockState::new(&[0xAD, 0x34, 0x12]);
    state.data_bank = 0x7E;
    state.unmapped_bank = Some(0x7E);
    let instruction = Op::<Absolute, Recorder>::new();

    assert_eq!(
        instruction.execute(&mut state),
        Err(ExecutionError::MemoryFault {
            address: Long::from_word(0x1234, 0x7E)
        })
    );
    assert_eq!(state.fetches, vec![1, 2]);
    assert!(state.invocations.is_empty());
}

// ========== Absolute Addressing ==========

#[test]
fn test_absolute_resolves_in_data_bank() {
    let mut state = MockState::new(&[0xAD, 0x34, 0x12]);
    state.data_bank = 0x01;
    let instruction = Op::<Absolute, Recorder>::new();

    let cycles = instruction.execute(&mut state).unwrap();

    assert_eq!(cycles, 1, "operator cycles pass through unchanged");
    assert_eq!(
        state.invocations,
        vec![Invocation::Access(MemoryAccess::new(Long::from_word(0x1234, 0x01)))]
    );
}

#[test]
fn test_absolute_operator_invoked_once_per_execute() {
    let mut state = MockState::new(&[0xAD, 0x34, 0x12]);
    let instruction = Op::<Absolute, Recorder>::new();

    instruction.execute(&mut state).unwrap();
    state.cursor = 1;
    instruction.execute(&mut state).unwrap();

    assert_eq!(state.invocations.len(), 2);
    assert_eq!(state.invocations[0], state.invocations[1]);
}

// ========== Size ==========

#[test]
fn test_sizes() {
    assert_eq!(Instruction::<MockState>::size(&Op::<Implied, Recorder>::new()), 1);
    assert_eq!(Instruction::<MockState>::size(&Op::<Immediate8, Recorder>::new()), 2);
    assert_eq!(Instruction::<MockState>::size(&Op::<Absolute, Recorder>::new()), 3);
    assert_eq!(Instruction::<MockState>::size(&Op::<AbsoluteLong, Recorder>::new()), 4);
}

#[test]
fn test_size_is_unaffected_by_execution() {
    let mut state = MockState::new(&[0xAD, 0x34, 0x12]);
    let instruction: &dyn Instruction<MockState> = &Op::<Absolute, Recorder>::new();

    let before = instruction.size();
    instruction.execute(&mut state).unwrap();
    assert_eq!(instruction.size(), before);
    assert_eq!(state.fetches.len(), 2, "size() must not fetch");
}

// ========== Breakpoints ==========

#[test]
fn test_apply_breakpoints_covers_every_offset() {
    let mut state = MockState::new(&[0xAF, 0x56, 0x34, 0x12]);
    let instruction = Op::<AbsoluteLong, Recorder>::new();

    instruction.apply_breakpoints(&mut state);

    assert_eq!(state.breakpoints, vec![0, 1, 2, 3]);
    assert!(instruction.has_breakpoint(&state));
    assert!(state.fetches.is_empty());
}

#[test]
fn test_one_byte_instruction_single_breakpoint() {
    let mut state = MockState::new(&[0x18]);
    let instruction = Op::<Implied, Recorder>::new();

    assert!(!instruction.has_breakpoint(&state));
    instruction.apply_breakpoints(&mut state);

    assert_eq!(state.breakpoints, vec![0]);
}

// ========== Text ==========

#[test]
fn test_absolute_opcode_to_string() {
    let state = MockState::new(&[0xAD, 0x34, 0x12]);
    let instruction: &dyn Instruction<MockState> = &Op::<Absolute, Recorder>::new();

    assert_eq!(instruction.operand_to_string(&state), "1234");
    assert_eq!(instruction.opcode_to_string(&state), "LDA $1234");
    assert_eq!(instruction.addressing_mode(), AddressingMode::Absolute);
}

#[test]
fn test_implied_opcode_to_string_has_no_operand() {
    let state = MockState::new(&[0x18]);
    let instruction = Op::<Implied, Recorder>::new();

    assert_eq!(instruction.operand_to_string(&state), "");
    assert_eq!(instruction.opcode_to_string(&state), "LDA");
}

#[test]
fn test_long_operand_renders_bank_first() {
    let state = MockState::new(&[0xAF, 0x56, 0x34, 0x12]);
    let instruction = Op::<AbsoluteLong, Recorder>::new();

    assert_eq!(instruction.opcode_to_string(&state), "LDA $123456");
}

#[test]
fn test_unreadable_operand_bytes_render_as_question_marks() {
    let state = MockState::new(&[0xAD, 0x34]);
    let instruction = Op::<Absolute, Recorder>::new();

    assert_eq!(instruction.opcode_to_string(&state), "LDA $??34");
}

#[test]
fn test_disassemble_lists_bytes_in_memory_order() {
    let state = MockState::new(&[0xAD, 0x34, 0x12]);
    let instruction = Op::<Absolute, Recorder>::new();

    let disassembly = instruction.disassemble(&state);
    assert_eq!(disassembly.bytes, "AD 34 12");
    assert_eq!(disassembly.text, "LDA $1234");
    assert!(state.fetches.is_empty());
}
