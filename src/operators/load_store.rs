//! # Load and Store Operators
//!
//! This module implements load and store operations:
//! - LDA: Load Accumulator
//! - LDX: Load X Register
//! - LDY: Load Y Register
//! - STA: Store Accumulator
//! - STX: Store X Register
//! - STY: Store Y Register
//! - STZ: Store Zero
//!
//! Operand width follows the m flag for the accumulator and the x flag for
//! the index registers. A 16-bit operand costs one extra cycle.

use crate::address::MemoryAccess;
use crate::operator::{AccessOperator, ImmediateOperator, Operator};
use crate::state::{CpuContext, IndexRegister};
use crate::ExecutionError;

/// LDA (Load Accumulator)
///
/// # Flag Behavior
///
/// - Zero (Z): Set if the loaded value is 0
/// - Negative (N): Set if the top bit of the loaded value is set
/// - Other flags: Not affected
///
/// With an 8-bit accumulator the hidden B byte is preserved.
pub struct Lda;

/// LDX (Load X Register)
///
/// Sets Z and N from the loaded value.
pub struct Ldx;

/// LDY (Load Y Register)
///
/// Sets Z and N from the loaded value.
pub struct Ldy;

/// STA (Store Accumulator)
///
/// No flags are affected.
pub struct Sta;

/// STX (Store X Register)
pub struct Stx;

/// STY (Store Y Register)
pub struct Sty;

/// STZ (Store Zero)
///
/// Stores zero at accumulator width.
pub struct Stz;

impl Operator for Lda {
    const MNEMONIC: &'static str = "LDA";
}

impl Operator for Ldx {
    const MNEMONIC: &'static str = "LDX";
}

impl Operator for Ldy {
    const MNEMONIC: &'static str = "LDY";
}

impl Operator for Sta {
    const MNEMONIC: &'static str = "STA";
    const PAGE_CROSS_PENALTY: bool = false;
}

impl Operator for Stx {
    const MNEMONIC: &'static str = "STX";
    const PAGE_CROSS_PENALTY: bool = false;
}

impl Operator for Sty {
    const MNEMONIC: &'static str = "STY";
    const PAGE_CROSS_PENALTY: bool = false;
}

impl Operator for Stz {
    const MNEMONIC: &'static str = "STZ";
    const PAGE_CROSS_PENALTY: bool = false;
}

fn load_accumulator<S: CpuContext>(state: &mut S, value: u16) -> u32 {
    let wide = state.is_16bit_accumulator();
    if wide {
        state.set_accumulator(value);
    } else {
        let high = state.accumulator() & 0xFF00;
        state.set_accumulator(high | (value & 0x00FF));
    }
    state.update_sign_flags(value, wide);
    u32::from(wide)
}

fn load_index<S: CpuContext>(state: &mut S, register: IndexRegister, value: u16) -> u32 {
    let wide = state.is_16bit_index();
    let value = if wide { value } else { value & 0x00FF };
    state.set_index(register, value);
    state.update_sign_flags(value, wide);
    u32::from(wide)
}

fn store_index<S: CpuContext>(
    state: &mut S,
    register: IndexRegister,
    access: MemoryAccess,
) -> Result<u32, ExecutionError> {
    let wide = state.is_16bit_index();
    let value = state.index(register);
    state.write_access(access, value, wide)?;
    Ok(u32::from(wide))
}

impl<S: CpuContext> AccessOperator<S> for Lda {
    fn invoke(state: &mut S, access: MemoryAccess) -> Result<u32, ExecutionError> {
        let value = state.read_access(access, state.is_16bit_accumulator())?;
        Ok(load_accumulator(state, value))
    }
}

impl<S: CpuContext> ImmediateOperator<S> for Lda {
    fn invoke(state: &mut S, value: u16) -> Result<u32, ExecutionError> {
        Ok(load_accumulator(state, value))
    }
}

impl<S: CpuContext> AccessOperator<S> for Ldx {
    fn invoke(state: &mut S, access: MemoryAccess) -> Result<u32, ExecutionError> {
        let value = state.read_access(access, state.is_16bit_index())?;
        Ok(load_index(state, IndexRegister::X, value))
    }
}

impl<S: CpuContext> ImmediateOperator<S> for Ldx {
    fn invoke(state: &mut S, value: u16) -> Result<u32, ExecutionError> {
        Ok(load_index(state, IndexRegister::X, value))
    }
}

impl<S: CpuContext> AccessOperator<S> for Ldy {
    fn invoke(state: &mut S, access: MemoryAccess) -> Result<u32, ExecutionError> {
        let value = state.read_access(access, state.is_16bit_index())?;
        Ok(load_index(state, IndexRegister::Y, value))
    }
}

impl<S: CpuContext> ImmediateOperator<S> for Ldy {
    fn invoke(state: &mut S, value: u16) -> Result<u32, ExecutionError> {
        Ok(load_index(state, IndexRegister::Y, value))
    }
}

impl<S: CpuContext> AccessOperator<S> for Sta {
    fn invoke(state: &mut S, access: MemoryAccess) -> Result<u32, ExecutionError> {
        let wide = state.is_16bit_accumulator();
        let value = state.accumulator();
        state.write_access(access, value, wide)?;
        Ok(u32::from(wide))
    }
}

impl<S: CpuContext> AccessOperator<S> for Stx {
    fn invoke(state: &mut S, access: MemoryAccess) -> Result<u32, ExecutionError> {
        store_index(state, IndexRegister::X, access)
    }
}

impl<S: CpuContext> AccessOperator<S> for Sty {
    fn invoke(state: &mut S, access: MemoryAccess) -> Result<u32, ExecutionError> {
        store_index(state, IndexRegister::Y, access)
    }
}

impl<S: CpuContext> AccessOperator<S> for Stz {
    fn invoke(state: &mut S, access: MemoryAccess) -> Result<u32, ExecutionError> {
        let wide = state.is_16bit_accumulator();
        state.write_access(access, 0, wide)?;
        Ok(u32::from(wide))
    }
}
