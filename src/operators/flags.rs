//! # Status Flag Operators
//!
//! This module implements instructions that directly modify the status register:
//! - CLC: Clear Carry Flag
//! - SEC: Set Carry Flag
//! - REP: Reset Processor Status Bits
//! - SEP: Set Processor Status Bits
//! - XCE: Exchange Carry and Emulation Flags
//!
//! In emulation mode m and x stay forced to 1 whatever REP writes.

use crate::operator::{ImmediateOperator, ImpliedOperator, Operator};
use crate::state::{CpuContext, StatusFlags};
use crate::ExecutionError;

/// CLC (Clear Carry Flag)
pub struct Clc;

/// SEC (Set Carry Flag)
pub struct Sec;

/// REP (Reset Processor Status Bits)
///
/// Clears every status bit set in the immediate byte.
pub struct Rep;

/// SEP (Set Processor Status Bits)
///
/// Sets every status bit set in the immediate byte. Setting x truncates
/// X and Y to 8 bits.
pub struct Sep;

/// XCE (Exchange Carry and Emulation Flags)
///
/// The only way in or out of emulation mode: `CLC; XCE` enters native mode.
pub struct Xce;

impl Operator for Clc {
    const MNEMONIC: &'static str = "CLC";
}

impl Operator for Sec {
    const MNEMONIC: &'static str = "SEC";
}

impl Operator for Rep {
    const MNEMONIC: &'static str = "REP";
}

impl Operator for Sep {
    const MNEMONIC: &'static str = "SEP";
}

impl Operator for Xce {
    const MNEMONIC: &'static str = "XCE";
}

impl<S: CpuContext> ImpliedOperator<S> for Clc {
    fn invoke(state: &mut S) -> Result<u32, ExecutionError> {
        state.set_flag(StatusFlags::CARRY, false);
        Ok(0)
    }
}

impl<S: CpuContext> ImpliedOperator<S> for Sec {
    fn invoke(state: &mut S) -> Result<u32, ExecutionError> {
        state.set_flag(StatusFlags::CARRY, true);
        Ok(0)
    }
}

impl<S: CpuContext> ImmediateOperator<S> for Rep {
    fn invoke(state: &mut S, value: u16) -> Result<u32, ExecutionError> {
        let mask = StatusFlags::from_bits_truncate(value as u8);
        state.set_flags(state.flags() - mask);
        Ok(0)
    }
}

impl<S: CpuContext> ImmediateOperator<S> for Sep {
    fn invoke(state: &mut S, value: u16) -> Result<u32, ExecutionError> {
        let mask = StatusFlags::from_bits_truncate(value as u8);
        state.set_flags(state.flags() | mask);
        Ok(0)
    }
}

impl<S: CpuContext> ImpliedOperator<S> for Xce {
    fn invoke(state: &mut S) -> Result<u32, ExecutionError> {
        let carry = state.flag(StatusFlags::CARRY);
        let emulation = state.emulation();
        state.set_flag(StatusFlags::CARRY, emulation);
        state.set_emulation(carry);
        Ok(0)
    }
}
