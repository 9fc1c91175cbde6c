use std::marker::PhantomData;

use super::{direct_page_penalty, Index};
use crate::address::{Long, Wrapping};
use crate::addressing::AddressingMode;
use crate::instruction::{AddressMode, ByteOperand};
use crate::operator::AccessOperator;
use crate::state::{CpuContext, IndexRegister};
use crate::ExecutionError;

/// Direct page: `LDA $80`
pub struct Direct;

impl<S, O> AddressMode<S, O> for Direct
where
    S: CpuContext,
    O: AccessOperator<S>,
{
    type Operand = ByteOperand;

    const MODE: AddressingMode = AddressingMode::Direct;

    fn invoke_operator(state: &mut S, operand: ByteOperand) -> Result<u32, ExecutionError> {
        let penalty = direct_page_penalty(state);
        let access = state.direct_access(operand.low, 0)?;
        Ok(O::invoke(state, access)? + penalty)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("${}", operand)
    }
}

/// Direct page indexed: `LDA $80,X` / `LDX $80,Y`
pub struct DirectIndexed<I>(PhantomData<I>);

impl<S, O, I> AddressMode<S, O> for DirectIndexed<I>
where
    S: CpuContext,
    O: AccessOperator<S>,
    I: Index,
{
    type Operand = ByteOperand;

    const MODE: AddressingMode = I::DIRECT_MODE;

    fn invoke_operator(state: &mut S, operand: ByteOperand) -> Result<u32, ExecutionError> {
        let penalty = direct_page_penalty(state);
        let access = state.direct_access(operand.low, state.index(I::REGISTER))?;
        Ok(O::invoke(state, access)? + penalty)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("${},{}", operand, I::REGISTER.name())
    }
}

/// Direct page indirect: `LDA ($80)`
pub struct DirectIndirect;

impl<S, O> AddressMode<S, O> for DirectIndirect
where
    S: CpuContext,
    O: AccessOperator<S>,
{
    type Operand = ByteOperand;

    const MODE: AddressingMode = AddressingMode::DirectIndirect;

    fn invoke_operator(state: &mut S, operand: ByteOperand) -> Result<u32, ExecutionError> {
        let penalty = direct_page_penalty(state);
        let pointer = state.direct_access(operand.low, 0)?;
        let offset = state.read_access(pointer, true)?;
        let access = state.resolve(Long::from_word(offset, state.data_bank()), Wrapping::Full)?;
        Ok(O::invoke(state, access)? + penalty)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("(${})", operand)
    }
}

/// Direct page indexed indirect: `LDA ($80,X)`
pub struct DirectIndexedIndirectX;

impl<S, O> AddressMode<S, O> for DirectIndexedIndirectX
where
    S: CpuContext,
    O: AccessOperator<S>,
{
    type Operand = ByteOperand;

    const MODE: AddressingMode = AddressingMode::DirectIndexedIndirectX;

    fn invoke_operator(state: &mut S, operand: ByteOperand) -> Result<u32, ExecutionError> {
        let penalty = direct_page_penalty(state);
        let pointer = state.direct_access(operand.low, state.index(IndexRegister::X))?;
        let offset = state.read_access(pointer, true)?;
        let access = state.resolve(Long::from_word(offset, state.data_bank()), Wrapping::Full)?;
        Ok(O::invoke(state, access)? + penalty)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("(${},X)", operand)
    }
}

/// Direct page indirect indexed: `LDA ($80),Y`
pub struct DirectIndirectIndexedY;

impl<S, O> AddressMode<S, O> for DirectIndirectIndexedY
where
    S: CpuContext,
    O: AccessOperator<S>,
{
    type Operand = ByteOperand;

    const MODE: AddressingMode = AddressingMode::DirectIndirectIndexedY;

    fn invoke_operator(state: &mut S, operand: ByteOperand) -> Result<u32, ExecutionError> {
        let mut penalty = direct_page_penalty(state);
        let pointer = state.direct_access(operand.low, 0)?;
        let base = Long::from_word(state.read_access(pointer, true)?, state.data_bank());
        let address = base.wrapping_add(u32::from(state.index(IndexRegister::Y)));
        let access = state.resolve(address, Wrapping::Full)?;
        penalty += u32::from(O::PAGE_CROSS_PENALTY && base.page_differs(address));
        Ok(O::invoke(state, access)? + penalty)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("(${}),Y", operand)
    }
}

/// Direct page indirect long: `LDA [$80]`
pub struct DirectIndirectLong;

impl<S, O> AddressMode<S, O> for DirectIndirectLong
where
    S: CpuContext,
    O: AccessOperator<S>,
{
    type Operand = ByteOperand;

    const MODE: AddressingMode = AddressingMode::DirectIndirectLong;

    fn invoke_operator(state: &mut S, operand: ByteOperand) -> Result<u32, ExecutionError> {
        let penalty = direct_page_penalty(state);
        let pointer = state.direct_access(operand.low, 0)?;
        let address = state.read_long_pointer(pointer)?;
        let access = state.resolve(address, Wrapping::Full)?;
        Ok(O::invoke(state, access)? + penalty)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("[${}]", operand)
    }
}

/// Direct page indirect long indexed: `LDA [$80],Y`
pub struct DirectIndirectLongIndexedY;

impl<S, O> AddressMode<S, O> for DirectIndirectLongIndexedY
where
    S: CpuContext,
    O: AccessOperator<S>,
{
    type Operand = ByteOperand;

    const MODE: AddressingMode = AddressingMode::DirectIndirectLongIndexedY;

    fn invoke_operator(state: &mut S, operand: ByteOperand) -> Result<u32, ExecutionError> {
        let penalty = direct_page_penalty(state);
        let pointer = state.direct_access(operand.low, 0)?;
        let address = state
            .read_long_pointer(pointer)?
            .wrapping_add(u32::from(state.index(IndexRegister::Y)));
        let access = state.resolve(address, Wrapping::Full)?;
        Ok(O::invoke(state, access)? + penalty)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("[${}],Y", operand)
    }
}
