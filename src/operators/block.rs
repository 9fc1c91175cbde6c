//! # Block Move Operators
//!
//! - MVN: Move Negative (X and Y increment)
//! - MVP: Move Positive (X and Y decrement)
//!
//! Each invocation copies one byte from `source_bank:X` to
//! `destination_bank:Y`, steps both index registers and leaves the data bank
//! register pointing at the destination bank. Repetition and the byte count
//! in C are handled by [`BlockMove`](crate::modes::BlockMove).

use crate::address::Long;
use crate::operator::{BlockMoveOperator, Operator};
use crate::state::{CpuContext, IndexRegister};
use crate::ExecutionError;

/// MVN (Block Move Negative)
pub struct Mvn;

/// MVP (Block Move Positive)
pub struct Mvp;

impl Operator for Mvn {
    const MNEMONIC: &'static str = "MVN";
}

impl Operator for Mvp {
    const MNEMONIC: &'static str = "MVP";
}

fn move_byte<S: CpuContext>(
    state: &mut S,
    source_bank: u8,
    destination_bank: u8,
    step: u16,
) -> Result<u32, ExecutionError> {
    let x = state.index(IndexRegister::X);
    let y = state.index(IndexRegister::Y);
    let byte = state.read_byte(Long::from_word(x, source_bank))?;
    state.write_byte(Long::from_word(y, destination_bank), byte)?;
    state.set_index(IndexRegister::X, x.wrapping_add(step));
    state.set_index(IndexRegister::Y, y.wrapping_add(step));
    state.set_data_bank(destination_bank);
    Ok(0)
}

impl<S: CpuContext> BlockMoveOperator<S> for Mvn {
    fn invoke(state: &mut S, source_bank: u8, destination_bank: u8) -> Result<u32, ExecutionError> {
        move_byte(state, source_bank, destination_bank, 1)
    }
}

impl<S: CpuContext> BlockMoveOperator<S> for Mvp {
    fn invoke(state: &mut S, source_bank: u8, destination_bank: u8) -> Result<u32, ExecutionError> {
        move_byte(state, source_bank, destination_bank, 0xFFFF)
    }
}
