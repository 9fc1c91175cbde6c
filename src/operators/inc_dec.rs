//! # Increment and Decrement Operators
//!
//! This module implements increment and decrement operations:
//! - INC: Increment Memory or Accumulator
//! - DEC: Decrement Memory or Accumulator
//!
//! Both update Z and N from the result at accumulator width. A 16-bit
//! read-modify-write costs two extra cycles.

use crate::address::MemoryAccess;
use crate::operator::{AccessOperator, AccumulatorOperator, Operator};
use crate::state::CpuContext;
use crate::ExecutionError;

/// INC (Increment)
pub struct Inc;

/// DEC (Decrement)
pub struct Dec;

impl Operator for Inc {
    const MNEMONIC: &'static str = "INC";
    const PAGE_CROSS_PENALTY: bool = false;
}

impl Operator for Dec {
    const MNEMONIC: &'static str = "DEC";
    const PAGE_CROSS_PENALTY: bool = false;
}

fn modify_memory<S: CpuContext>(
    state: &mut S,
    access: MemoryAccess,
    delta: u16,
) -> Result<u32, ExecutionError> {
    let wide = state.is_16bit_accumulator();
    let result = state.read_access(access, wide)?.wrapping_add(delta);
    state.write_access(access, result, wide)?;
    state.update_sign_flags(result, wide);
    Ok(if wide { 2 } else { 0 })
}

fn modify_accumulator<S: CpuContext>(state: &mut S, delta: u16) -> u32 {
    let wide = state.is_16bit_accumulator();
    let a = state.accumulator();
    let result = if wide {
        a.wrapping_add(delta)
    } else {
        (a & 0xFF00) | (a.wrapping_add(delta) & 0x00FF)
    };
    state.set_accumulator(result);
    state.update_sign_flags(result, wide);
    if wide {
        2
    } else {
        0
    }
}

impl<S: CpuContext> AccessOperator<S> for Inc {
    fn invoke(state: &mut S, access: MemoryAccess) -> Result<u32, ExecutionError> {
        modify_memory(state, access, 1)
    }
}

impl<S: CpuContext> AccumulatorOperator<S> for Inc {
    fn invoke(state: &mut S) -> Result<u32, ExecutionError> {
        Ok(modify_accumulator(state, 1))
    }
}

impl<S: CpuContext> AccessOperator<S> for Dec {
    fn invoke(state: &mut S, access: MemoryAccess) -> Result<u32, ExecutionError> {
        modify_memory(state, access, 0xFFFF)
    }
}

impl<S: CpuContext> AccumulatorOperator<S> for Dec {
    fn invoke(state: &mut S) -> Result<u32, ExecutionError> {
        Ok(modify_accumulator(state, 0xFFFF))
    }
}
