//! Property-based tests for the instruction framework.
//!
//! These verify that operand fetching, sizing and address resolution hold for
//! arbitrary operand bytes and register contents.

mod common;

use common::{Invocation, MockState, Recorder};
use lib65816::modes::{Absolute, AbsoluteLong};
use lib65816::{
    decode, Cpu, CpuContext, FlatMemory, IndexRegister, Instruction, Long, MachineState,
    MemoryAccess, MemoryBus, Op, StepOutcome,
};
use proptest::prelude::*;

/// Helper function to create a CPU with reset vector at 0x8000
fn setup_cpu() -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::with_banks(2);
    memory.write(Long::new(0xFFFC), 0x00).unwrap();
    memory.write(Long::new(0xFFFD), 0x80).unwrap();
    Cpu::new(memory)
}

proptest! {
    /// Property: an absolute operand resolves to high:low in the data bank
    #[test]
    fn prop_absolute_resolves_operand_bytes(low in any::<u8>(), high in any::<u8>(), bank in any::<u8>()) {
        let mut state = MockState::new(&[0xAD, low, high]);
        state.data_bank = bank;

        Op::<Absolute, Recorder>::new().execute(&mut state).unwrap();

        let expected = MemoryAccess::new(Long::from_bytes(low, high, bank));
        prop_assert_eq!(state.invocations, vec![Invocation::Access(expected)]);
    }

    /// Property: resolving the same operand bytes twice gives the same access
    #[test]
    fn prop_memory_access_is_pure(low in any::<u8>(), high in any::<u8>(), bank in 0u8..2) {
        let mut cpu = setup_cpu();
        cpu.state_mut().set_data_bank(bank);
        let state = cpu.state();

        let first = state.memory_access(low, high);
        let second = state.memory_access(low, high);
        prop_assert_eq!(first, second);
        prop_assert_eq!(
            first.unwrap().address(),
            Long::from_bytes(low, high, bank)
        );
    }

    /// Property: a long operand is fetched low, high, bank and forwarded intact
    #[test]
    fn prop_long_operand_forwarded(low in any::<u8>(), high in any::<u8>(), bank in any::<u8>()) {
        let mut state = MockState::new(&[0xAF, low, high, bank]);

        Op::<AbsoluteLong, Recorder>::new().execute(&mut state).unwrap();

        prop_assert_eq!(&state.fetches, &vec![1, 2, 3]);
        prop_assert_eq!(
            state.invocations,
            vec![Invocation::Access(MemoryAccess::new(Long::from_bytes(low, high, bank)))]
        );
    }

    /// Property: every decodable opcode fetches exactly size - 1 operand bytes
    /// and its size does not change across execution
    #[test]
    fn prop_execute_advances_by_size(
        opcode in any::<u8>(),
        operand in any::<[u8; 3]>(),
        x in any::<u8>(),
        y in any::<u8>(),
    ) {
        let mut cpu = setup_cpu();
        let state = cpu.state_mut();
        state
            .memory_mut()
            .load(Long::new(0x8000), &[opcode, operand[0], operand[1], operand[2]])
            .unwrap();
        state.set_index(IndexRegister::X, u16::from(x));
        state.set_index(IndexRegister::Y, u16::from(y));

        let Some(decoded) = decode(opcode, cpu.state()) else {
            return Ok(());
        };
        let size = decoded.instruction.size();
        prop_assert!((1..=4).contains(&size));

        // Control flow and block moves relocate the program counter themselves
        let relocates = matches!(
            decoded.instruction.mnemonic(),
            "JMP" | "JML" | "JSR" | "RTS" | "BRA" | "BRL" | "BEQ" | "BNE" | "MVN" | "MVP"
        );

        if let Ok(StepOutcome::Executed { .. }) = cpu.step() {
            if !relocates {
                prop_assert_eq!(
                    u32::from(cpu.state().program_counter()),
                    0x8000 + size as u32
                );
            }
        }
        prop_assert_eq!(decoded.instruction.size(), size);
    }

    /// Property: breakpoints land on exactly the bytes of the instruction
    #[test]
    fn prop_breakpoints_cover_instruction(opcode in any::<u8>()) {
        let mut cpu = setup_cpu();
        cpu.state_mut()
            .memory_mut()
            .write(Long::new(0x8000), opcode)
            .unwrap();

        if let Ok(size) = cpu.break_on_next_instruction() {
            let set: Vec<Long> = cpu.state().breakpoints().collect();
            let expected: Vec<Long> = (0..size as u32).map(|i| Long::new(0x8000 + i)).collect();
            prop_assert_eq!(set, expected);
        } else {
            prop_assert_eq!(cpu.state().breakpoints().count(), 0);
        }
    }
}
