use std::marker::PhantomData;

use super::Index;
use crate::address::{Long, Wrapping};
use crate::addressing::AddressingMode;
use crate::instruction::{AddressMode, LongOperand, WordOperand};
use crate::operator::{AccessOperator, JumpOperator};
use crate::state::{CpuContext, IndexRegister, MachineState};
use crate::ExecutionError;

/// Absolute: `LDA $1234`
///
/// The state supplies the bank, so this mode works against any
/// [`MachineState`].
pub struct Absolute;

impl<S, O> AddressMode<S, O> for Absolute
where
    S: MachineState,
    O: AccessOperator<S>,
{
    type Operand = WordOperand;

    const MODE: AddressingMode = AddressingMode::Absolute;

    fn invoke_operator(state: &mut S, operand: WordOperand) -> Result<u32, ExecutionError> {
        let access = state.memory_access(operand.low, operand.high)?;
        O::invoke(state, access)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("${}", operand)
    }
}

/// Absolute indexed: `LDA $1234,X` / `LDA $1234,Y`
///
/// Indexing carries into the bank byte.
pub struct AbsoluteIndexed<I>(PhantomData<I>);

impl<S, O, I> AddressMode<S, O> for AbsoluteIndexed<I>
where
    S: CpuContext,
    O: AccessOperator<S>,
    I: Index,
{
    type Operand = WordOperand;

    const MODE: AddressingMode = I::ABSOLUTE_MODE;

    fn invoke_operator(state: &mut S, operand: WordOperand) -> Result<u32, ExecutionError> {
        let base = Long::from_bytes(operand.low, operand.high, state.data_bank());
        let address = base.wrapping_add(u32::from(state.index(I::REGISTER)));
        let access = state.resolve(address, Wrapping::Full)?;
        let penalty = u32::from(O::PAGE_CROSS_PENALTY && base.page_differs(address));
        Ok(O::invoke(state, access)? + penalty)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("${},{}", operand, I::REGISTER.name())
    }
}

/// Absolute long: `LDA $7E1234`
pub struct AbsoluteLong;

impl<S, O> AddressMode<S, O> for AbsoluteLong
where
    S: MachineState,
    O: AccessOperator<S>,
{
    type Operand = LongOperand;

    const MODE: AddressingMode = AddressingMode::AbsoluteLong;

    fn invoke_operator(state: &mut S, operand: LongOperand) -> Result<u32, ExecutionError> {
        let access = state.memory_access_long(operand.low, operand.high, operand.bank)?;
        O::invoke(state, access)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("${}", operand)
    }
}

/// Absolute long indexed: `LDA $7E1234,X`
pub struct AbsoluteLongIndexedX;

impl<S, O> AddressMode<S, O> for AbsoluteLongIndexedX
where
    S: CpuContext,
    O: AccessOperator<S>,
{
    type Operand = LongOperand;

    const MODE: AddressingMode = AddressingMode::AbsoluteLongIndexedX;

    fn invoke_operator(state: &mut S, operand: LongOperand) -> Result<u32, ExecutionError> {
        let address = operand
            .long()
            .wrapping_add(u32::from(state.index(IndexRegister::X)));
        let access = state.resolve(address, Wrapping::Full)?;
        O::invoke(state, access)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("${},X", operand)
    }
}

/// Absolute jump target: `JMP $8000`
///
/// The target stays in the program bank.
pub struct AbsoluteControlFlow;

impl<S, O> AddressMode<S, O> for AbsoluteControlFlow
where
    S: CpuContext,
    O: JumpOperator<S>,
{
    type Operand = WordOperand;

    const MODE: AddressingMode = AddressingMode::Absolute;

    fn invoke_operator(state: &mut S, operand: WordOperand) -> Result<u32, ExecutionError> {
        let target = Long::from_word(operand.word(), state.program_bank());
        O::invoke(state, target)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("${}", operand)
    }
}

/// Absolute long jump target: `JML $018000`
pub struct AbsoluteLongControlFlow;

impl<S, O> AddressMode<S, O> for AbsoluteLongControlFlow
where
    S: MachineState,
    O: JumpOperator<S>,
{
    type Operand = LongOperand;

    const MODE: AddressingMode = AddressingMode::AbsoluteLong;

    fn invoke_operator(state: &mut S, operand: LongOperand) -> Result<u32, ExecutionError> {
        O::invoke(state, operand.long())
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("${}", operand)
    }
}

/// Absolute indirect: `JMP ($FFFC)`
///
/// The pointer lives in bank 0; the target is in the program bank.
pub struct AbsoluteIndirect;

impl<S, O> AddressMode<S, O> for AbsoluteIndirect
where
    S: CpuContext,
    O: JumpOperator<S>,
{
    type Operand = WordOperand;

    const MODE: AddressingMode = AddressingMode::AbsoluteIndirect;

    fn invoke_operator(state: &mut S, operand: WordOperand) -> Result<u32, ExecutionError> {
        let pointer = state.resolve(Long::from_word(operand.word(), 0), Wrapping::Bank)?;
        let offset = state.read_access(pointer, true)?;
        let target = Long::from_word(offset, state.program_bank());
        O::invoke(state, target)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("(${})", operand)
    }
}

/// Absolute indexed indirect: `JMP ($1234,X)`
///
/// Pointer and target both live in the program bank.
pub struct AbsoluteIndexedIndirect;

impl<S, O> AddressMode<S, O> for AbsoluteIndexedIndirect
where
    S: CpuContext,
    O: JumpOperator<S>,
{
    type Operand = WordOperand;

    const MODE: AddressingMode = AddressingMode::AbsoluteIndexedIndirect;

    fn invoke_operator(state: &mut S, operand: WordOperand) -> Result<u32, ExecutionError> {
        let bank = state.program_bank();
        let offset = operand
            .word()
            .wrapping_add(state.index(IndexRegister::X));
        let pointer = state.resolve(Long::from_word(offset, bank), Wrapping::Bank)?;
        let target = Long::from_word(state.read_access(pointer, true)?, bank);
        O::invoke(state, target)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("(${},X)", operand)
    }
}

/// Absolute indirect long: `JML [$1234]`
pub struct AbsoluteIndirectLong;

impl<S, O> AddressMode<S, O> for AbsoluteIndirectLong
where
    S: CpuContext,
    O: JumpOperator<S>,
{
    type Operand = WordOperand;

    const MODE: AddressingMode = AddressingMode::AbsoluteIndirectLong;

    fn invoke_operator(state: &mut S, operand: WordOperand) -> Result<u32, ExecutionError> {
        let pointer = state.resolve(Long::from_word(operand.word(), 0), Wrapping::Bank)?;
        let target = state.read_long_pointer(pointer)?;
        O::invoke(state, target)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("[${}]", operand)
    }
}
