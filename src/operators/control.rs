//! # Control Flow Operators
//!
//! This module implements control flow operations:
//! - JMP: Jump within the program bank (or through a pointer)
//! - JML: Jump Long
//! - JSR: Jump to Subroutine
//! - RTS: Return from Subroutine
//! - NOP: No Operation
//! - WDM: Reserved two-byte no-op
//!
//! Jump targets arrive already resolved by the addressing mode, bank included.

use crate::address::Long;
use crate::operator::{ImmediateOperator, ImpliedOperator, JumpOperator, Operator};
use crate::state::{CpuContext, MachineState};
use crate::ExecutionError;

/// JMP (Jump)
pub struct Jmp;

/// JML (Jump Long)
///
/// Loads both the program counter and the program bank.
pub struct Jml;

/// JSR (Jump to Subroutine)
///
/// Pushes the address of the last byte of the JSR (return address - 1), high
/// byte first, then jumps. The target stays in the program bank.
pub struct Jsr;

/// RTS (Return from Subroutine)
///
/// Pulls the return address and adds one; the program bank is unchanged.
pub struct Rts;

/// NOP (No Operation)
pub struct Nop;

/// WDM (William D. Mensch)
///
/// Reserved for future expansion; skips its signature byte.
pub struct Wdm;

impl Operator for Jmp {
    const MNEMONIC: &'static str = "JMP";
}

impl Operator for Jml {
    const MNEMONIC: &'static str = "JML";
}

impl Operator for Jsr {
    const MNEMONIC: &'static str = "JSR";
}

impl Operator for Rts {
    const MNEMONIC: &'static str = "RTS";
}

impl Operator for Nop {
    const MNEMONIC: &'static str = "NOP";
}

impl Operator for Wdm {
    const MNEMONIC: &'static str = "WDM";
}

impl<S: CpuContext> JumpOperator<S> for Jmp {
    fn invoke(state: &mut S, target: Long) -> Result<u32, ExecutionError> {
        state.set_program_address(target);
        Ok(0)
    }
}

impl<S: CpuContext> JumpOperator<S> for Jml {
    fn invoke(state: &mut S, target: Long) -> Result<u32, ExecutionError> {
        state.set_program_address(target);
        Ok(0)
    }
}

impl<S: CpuContext> JumpOperator<S> for Jsr {
    fn invoke(state: &mut S, target: Long) -> Result<u32, ExecutionError> {
        let return_address = state.program_counter().wrapping_sub(1);
        state.push_word(return_address)?;
        state.set_program_address(target);
        Ok(0)
    }
}

impl<S: CpuContext> ImpliedOperator<S> for Rts {
    fn invoke(state: &mut S) -> Result<u32, ExecutionError> {
        let return_address = state.pull_word()?.wrapping_add(1);
        let bank = state.program_bank();
        state.set_program_address(Long::from_word(return_address, bank));
        Ok(0)
    }
}

impl<S: MachineState> ImpliedOperator<S> for Nop {
    fn invoke(_state: &mut S) -> Result<u32, ExecutionError> {
        Ok(0)
    }
}

impl<S: MachineState> ImmediateOperator<S> for Wdm {
    fn invoke(_state: &mut S, _value: u16) -> Result<u32, ExecutionError> {
        Ok(0)
    }
}
