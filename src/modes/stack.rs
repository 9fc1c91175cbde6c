use crate::address::{Long, Wrapping};
use crate::addressing::AddressingMode;
use crate::instruction::{AddressMode, ByteOperand};
use crate::operator::AccessOperator;
use crate::state::{CpuContext, IndexRegister};
use crate::ExecutionError;

/// Stack relative: `LDA $03,S`
pub struct StackRelative;

impl<S, O> AddressMode<S, O> for StackRelative
where
    S: CpuContext,
    O: AccessOperator<S>,
{
    type Operand = ByteOperand;

    const MODE: AddressingMode = AddressingMode::StackRelative;

    fn invoke_operator(state: &mut S, operand: ByteOperand) -> Result<u32, ExecutionError> {
        let offset = state.stack_pointer().wrapping_add(u16::from(operand.low));
        let access = state.resolve(Long::from_word(offset, 0), Wrapping::Bank)?;
        O::invoke(state, access)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("${},S", operand)
    }
}

/// Stack relative indirect indexed: `LDA ($03,S),Y`
pub struct StackRelativeIndirectIndexedY;

impl<S, O> AddressMode<S, O> for StackRelativeIndirectIndexedY
where
    S: CpuContext,
    O: AccessOperator<S>,
{
    type Operand = ByteOperand;

    const MODE: AddressingMode = AddressingMode::StackRelativeIndirectIndexedY;

    fn invoke_operator(state: &mut S, operand: ByteOperand) -> Result<u32, ExecutionError> {
        let offset = state.stack_pointer().wrapping_add(u16::from(operand.low));
        let pointer = state.resolve(Long::from_word(offset, 0), Wrapping::Bank)?;
        let base = Long::from_word(state.read_access(pointer, true)?, state.data_bank());
        let address = base.wrapping_add(u32::from(state.index(IndexRegister::Y)));
        let access = state.resolve(address, Wrapping::Full)?;
        O::invoke(state, access)
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("(${},S),Y", operand)
    }
}
