//! Tests for jumps, subroutines, branches, status flag operators and block
//! moves.

use lib65816::{
    Cpu, CpuContext, FlatMemory, IndexRegister, Long, MemoryBus, StatusFlags, StepOutcome,
};

/// Helper function to create a CPU with reset vector at 0x8000 and `program` loaded there
fn setup_cpu(program: &[u8]) -> Cpu<FlatMemory> {
    let mut memory = FlatMemory::with_banks(2);
    memory.write(Long::new(0xFFFC), 0x00).unwrap();
    memory.write(Long::new(0xFFFD), 0x80).unwrap();
    memory.load(Long::new(0x8000), program).unwrap();
    Cpu::new(memory)
}

fn step_cycles(cpu: &mut Cpu<FlatMemory>) -> u32 {
    match cpu.step().unwrap() {
        StepOutcome::Executed { cycles, .. } => cycles,
        StepOutcome::Breakpoint { address } => panic!("unexpected breakpoint at {}", address),
    }
}

fn pc(cpu: &Cpu<FlatMemory>) -> Long {
    cpu.state().program_address()
}

// ========== Jumps ==========

#[test]
fn test_jmp_absolute_stays_in_program_bank() {
    let mut cpu = setup_cpu(&[0x4C, 0x34, 0x12]); // JMP $1234

    assert_eq!(step_cycles(&mut cpu), 3);
    assert_eq!(pc(&cpu), Long::from_word(0x1234, 0x00));
}

#[test]
fn test_jml_absolute_long_changes_bank() {
    let mut cpu = setup_cpu(&[0x5C, 0x00, 0x90, 0x01]); // JML $019000

    assert_eq!(step_cycles(&mut cpu), 4);
    assert_eq!(pc(&cpu), Long::from_word(0x9000, 0x01));
}

#[test]
fn test_jmp_absolute_indirect() {
    let mut cpu = setup_cpu(&[0x6C, 0x00, 0x30]); // JMP ($3000)
    cpu.state_mut()
        .memory_mut()
        .load(Long::new(0x3000), &[0x78, 0x56])
        .unwrap();

    assert_eq!(step_cycles(&mut cpu), 5);
    assert_eq!(pc(&cpu), Long::from_word(0x5678, 0x00));
}

#[test]
fn test_jmp_absolute_indexed_indirect() {
    let mut cpu = setup_cpu(&[0x7C, 0x00, 0x90]); // JMP ($9000,X)
    cpu.state_mut().set_index(IndexRegister::X, 0x04);
    cpu.state_mut()
        .memory_mut()
        .load(Long::new(0x9004), &[0x00, 0xA0])
        .unwrap();

    assert_eq!(step_cycles(&mut cpu), 6);
    assert_eq!(pc(&cpu), Long::from_word(0xA000, 0x00));
}

#[test]
fn test_jml_absolute_indirect_long() {
    let mut cpu = setup_cpu(&[0xDC, 0x00, 0x30]); // JML [$3000]
    cpu.state_mut()
        .memory_mut()
        .load(Long::new(0x3000), &[0x00, 0x80, 0x01])
        .unwrap();

    assert_eq!(step_cycles(&mut cpu), 6);
    assert_eq!(pc(&cpu), Long::from_word(0x8000, 0x01));
}

// ========== Subroutines ==========

#[test]
fn test_jsr_pushes_last_byte_address() {
    let mut cpu = setup_cpu(&[0x20, 0x00, 0x90]); // JSR $9000

    assert_eq!(step_cycles(&mut cpu), 6);
    assert_eq!(pc(&cpu), Long::from_word(0x9000, 0x00));
    assert_eq!(cpu.state().stack_pointer(), 0x01FD);

    let memory = cpu.state().memory();
    assert_eq!(memory.read(Long::new(0x01FF)), Ok(0x80));
    assert_eq!(memory.read(Long::new(0x01FE)), Ok(0x02));
}

#[test]
fn test_jsr_rts_round_trip() {
    let mut cpu = setup_cpu(&[0x20, 0x00, 0x90, 0xEA]); // JSR $9000; NOP
    cpu.state_mut()
        .memory_mut()
        .write(Long::new(0x9000), 0x60) // RTS
        .unwrap();

    cpu.step().unwrap();
    assert_eq!(step_cycles(&mut cpu), 6);
    assert_eq!(pc(&cpu), Long::from_word(0x8003, 0x00));
    assert_eq!(cpu.state().stack_pointer(), 0x01FF);
}

// ========== Branches ==========

#[test]
fn test_beq_not_taken() {
    let mut cpu = setup_cpu(&[0xF0, 0x10]); // BEQ +16

    assert_eq!(step_cycles(&mut cpu), 2);
    assert_eq!(pc(&cpu), Long::new(0x8002));
}

#[test]
fn test_beq_taken_forward() {
    let mut cpu = setup_cpu(&[0xF0, 0x10]); // BEQ +16
    cpu.state_mut().set_flag(StatusFlags::ZERO, true);

    assert_eq!(step_cycles(&mut cpu), 3);
    assert_eq!(pc(&cpu), Long::new(0x8012));
}

#[test]
fn test_bne_taken_backward_across_page_in_emulation() {
    let mut cpu = setup_cpu(&[0xD0, 0xFC]); // BNE -4

    assert_eq!(step_cycles(&mut cpu), 4);
    assert_eq!(pc(&cpu), Long::new(0x7FFE));
}

#[test]
fn test_bne_page_cross_is_free_in_native_mode() {
    let mut cpu = setup_cpu(&[0xD0, 0xFC]); // BNE -4
    cpu.state_mut().set_emulation(false);

    assert_eq!(step_cycles(&mut cpu), 3);
    assert_eq!(pc(&cpu), Long::new(0x7FFE));
}

#[test]
fn test_bra_always_taken() {
    let mut cpu = setup_cpu(&[0x80, 0x02, 0x00, 0x00, 0xEA]); // BRA +2

    assert_eq!(step_cycles(&mut cpu), 3);
    assert_eq!(pc(&cpu), Long::new(0x8004));
}

#[test]
fn test_brl_wraps_within_bank() {
    let mut cpu = setup_cpu(&[0x82, 0x00, 0x80]); // BRL -32768

    assert_eq!(step_cycles(&mut cpu), 4);
    assert_eq!(pc(&cpu), Long::new(0x0003));
}

// ========== Status Flags ==========

#[test]
fn test_clc_sec() {
    let mut cpu = setup_cpu(&[0x38, 0x18]); // SEC; CLC

    assert_eq!(step_cycles(&mut cpu), 2);
    assert!(cpu.state().flag(StatusFlags::CARRY));
    assert_eq!(step_cycles(&mut cpu), 2);
    assert!(!cpu.state().flag(StatusFlags::CARRY));
}

#[test]
fn test_clc_xce_enters_native_mode() {
    let mut cpu = setup_cpu(&[0x18, 0xFB]); // CLC; XCE

    cpu.step().unwrap();
    assert_eq!(step_cycles(&mut cpu), 2);

    assert!(!cpu.state().emulation());
    assert!(cpu.state().flag(StatusFlags::CARRY), "old emulation bit lands in carry");
    assert!(cpu.state().flag(StatusFlags::MEMORY_8BIT));
    assert!(cpu.state().flag(StatusFlags::INDEX_8BIT));
}

#[test]
fn test_rep_sep_change_register_widths() {
    // CLC; XCE; REP #$30; LDA #$1234; SEP #$20
    let mut cpu = setup_cpu(&[0x18, 0xFB, 0xC2, 0x30, 0xA9, 0x34, 0x12, 0xE2, 0x20]);

    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(step_cycles(&mut cpu), 3);
    assert!(cpu.state().is_16bit_accumulator());
    assert!(cpu.state().is_16bit_index());

    assert_eq!(step_cycles(&mut cpu), 3);
    assert_eq!(cpu.state().accumulator(), 0x1234);

    cpu.step().unwrap();
    assert!(!cpu.state().is_16bit_accumulator());
    assert!(cpu.state().is_16bit_index());
}

#[test]
fn test_rep_cannot_widen_registers_in_emulation_mode() {
    let mut cpu = setup_cpu(&[0xC2, 0x31]); // REP #$31
    cpu.state_mut().set_flag(StatusFlags::CARRY, true);

    cpu.step().unwrap();

    assert!(!cpu.state().flag(StatusFlags::CARRY));
    assert!(cpu.state().flag(StatusFlags::MEMORY_8BIT));
    assert!(cpu.state().flag(StatusFlags::INDEX_8BIT));
}

#[test]
fn test_sep_index_truncates_index_registers() {
    let mut cpu = setup_cpu(&[0xE2, 0x10]); // SEP #$10
    let state = cpu.state_mut();
    state.set_emulation(false);
    state.set_flags(StatusFlags::empty());
    state.set_index(IndexRegister::X, 0x1234);

    cpu.step().unwrap();

    assert_eq!(cpu.state().index(IndexRegister::X), 0x0034);
}

// ========== Misc ==========

#[test]
fn test_nop_and_wdm() {
    let mut cpu = setup_cpu(&[0xEA, 0x42, 0x99]); // NOP; WDM #$99

    assert_eq!(step_cycles(&mut cpu), 2);
    assert_eq!(pc(&cpu), Long::new(0x8001));
    assert_eq!(step_cycles(&mut cpu), 2);
    assert_eq!(pc(&cpu), Long::new(0x8003));
}

// ========== Block Moves ==========

#[test]
fn test_mvn_copies_block_upwards() {
    let mut cpu = setup_cpu(&[0x54, 0x01, 0x00, 0xEA]); // MVN $00,$01
    let state = cpu.state_mut();
    state.set_emulation(false);
    state.set_flags(StatusFlags::empty());
    state.set_accumulator(0x0002);
    state.set_index(IndexRegister::X, 0x2000);
    state.set_index(IndexRegister::Y, 0x3000);
    state
        .memory_mut()
        .load(Long::new(0x2000), &[0x11, 0x22, 0x33])
        .unwrap();

    // One byte per step, repeating until C wraps past zero
    for _ in 0..3 {
        assert_eq!(step_cycles(&mut cpu), 7);
    }

    let state = cpu.state();
    assert_eq!(state.accumulator(), 0xFFFF);
    assert_eq!(state.index(IndexRegister::X), 0x2003);
    assert_eq!(state.index(IndexRegister::Y), 0x3003);
    assert_eq!(state.data_bank(), 0x01);
    assert_eq!(state.program_address(), Long::new(0x8003));
    for (i, byte) in [0x11, 0x22, 0x33].into_iter().enumerate() {
        assert_eq!(
            state.memory().read(Long::from_word(0x3000 + i as u16, 0x01)),
            Ok(byte)
        );
    }
}

#[test]
fn test_mvn_repeats_by_rewinding_program_counter() {
    let mut cpu = setup_cpu(&[0x54, 0x00, 0x00]); // MVN $00,$00
    cpu.state_mut().set_accumulator(0x0001);

    cpu.step().unwrap();

    assert_eq!(cpu.state().program_address(), Long::new(0x8000));
    assert_eq!(cpu.state().accumulator(), 0x0000);
}

#[test]
fn test_mvp_copies_block_downwards() {
    let mut cpu = setup_cpu(&[0x44, 0x00, 0x00]); // MVP $00,$00
    let state = cpu.state_mut();
    state.set_emulation(false);
    state.set_flags(StatusFlags::empty());
    state.set_accumulator(0x0001);
    state.set_index(IndexRegister::X, 0x2001);
    state.set_index(IndexRegister::Y, 0x3001);
    state
        .memory_mut()
        .load(Long::new(0x2000), &[0xAA, 0xBB])
        .unwrap();

    cpu.step().unwrap();
    cpu.step().unwrap();

    let state = cpu.state();
    assert_eq!(state.index(IndexRegister::X), 0x1FFF);
    assert_eq!(state.index(IndexRegister::Y), 0x2FFF);
    assert_eq!(state.memory().read(Long::new(0x3000)), Ok(0xAA));
    assert_eq!(state.memory().read(Long::new(0x3001)), Ok(0xBB));
    assert_eq!(state.program_address(), Long::new(0x8003));
}
