//! # Branch Operators
//!
//! This module implements relative branch operations:
//! - BRA: Branch Always
//! - BRL: Branch Always Long
//! - BEQ: Branch if Equal (Z = 1)
//! - BNE: Branch if Not Equal (Z = 0)
//!
//! Displacements are relative to the address after the instruction and the
//! target wraps within the program bank.
//!
//! Cycle timing for 8-bit branches:
//! - base cost if not taken
//! - +1 if taken
//! - +1 more if taken across a page boundary in emulation mode

use crate::address::Long;
use crate::operator::{BranchOperator, Operator};
use crate::state::{CpuContext, StatusFlags};
use crate::ExecutionError;

/// BRA (Branch Always)
pub struct Bra;

/// BRL (Branch Always Long)
///
/// Always taken; its fixed cost is all in the base cycles.
pub struct Brl;

/// BEQ (Branch if Equal)
pub struct Beq;

/// BNE (Branch if Not Equal)
pub struct Bne;

impl Operator for Bra {
    const MNEMONIC: &'static str = "BRA";
}

impl Operator for Brl {
    const MNEMONIC: &'static str = "BRL";
}

impl Operator for Beq {
    const MNEMONIC: &'static str = "BEQ";
}

impl Operator for Bne {
    const MNEMONIC: &'static str = "BNE";
}

/// Moves the program counter by `displacement`, returning the fall-through
/// address and the target.
fn jump_relative<S: CpuContext>(state: &mut S, displacement: i16) -> (Long, Long) {
    let bank = state.program_bank();
    let next = Long::from_word(state.program_counter(), bank);
    let target = next.wrapping_add_in_bank(displacement as u16);
    state.set_program_address(target);
    (next, target)
}

fn branch_if<S: CpuContext>(state: &mut S, displacement: i16, taken: bool) -> u32 {
    if !taken {
        return 0;
    }
    let (next, target) = jump_relative(state, displacement);
    if state.emulation() && next.page_differs(target) {
        2
    } else {
        1
    }
}

impl<S: CpuContext> BranchOperator<S> for Bra {
    fn invoke(state: &mut S, displacement: i16) -> Result<u32, ExecutionError> {
        Ok(branch_if(state, displacement, true))
    }
}

impl<S: CpuContext> BranchOperator<S> for Brl {
    fn invoke(state: &mut S, displacement: i16) -> Result<u32, ExecutionError> {
        jump_relative(state, displacement);
        Ok(0)
    }
}

impl<S: CpuContext> BranchOperator<S> for Beq {
    fn invoke(state: &mut S, displacement: i16) -> Result<u32, ExecutionError> {
        let taken = state.flag(StatusFlags::ZERO);
        Ok(branch_if(state, displacement, taken))
    }
}

impl<S: CpuContext> BranchOperator<S> for Bne {
    fn invoke(state: &mut S, displacement: i16) -> Result<u32, ExecutionError> {
        let taken = !state.flag(StatusFlags::ZERO);
        Ok(branch_if(state, displacement, taken))
    }
}
