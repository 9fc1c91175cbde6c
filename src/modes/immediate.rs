use crate::addressing::AddressingMode;
use crate::instruction::{AddressMode, ByteOperand, WordOperand};
use crate::operator::ImmediateOperator;
use crate::state::MachineState;
use crate::ExecutionError;

/// 8-bit immediate: `LDA #$12`
///
/// Chosen by the decoder when the register the operator works on is 8 bits wide.
pub struct Immediate8;

impl<S, O> AddressMode<S, O> for Immediate8
where
    S: MachineState,
    O: ImmediateOperator<S>,
{
    type Operand = ByteOperand;

    const MODE: AddressingMode = AddressingMode::Immediate;

    fn invoke_operator(state: &mut S, operand: ByteOperand) -> Result<u32, ExecutionError> {
        O::invoke(state, u16::from(operand.low))
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("#${}", operand)
    }
}

/// 16-bit immediate: `LDA #$1234`
pub struct Immediate16;

impl<S, O> AddressMode<S, O> for Immediate16
where
    S: MachineState,
    O: ImmediateOperator<S>,
{
    type Operand = WordOperand;

    const MODE: AddressingMode = AddressingMode::Immediate;

    fn invoke_operator(state: &mut S, operand: WordOperand) -> Result<u32, ExecutionError> {
        O::invoke(state, operand.word())
    }

    fn format_operand(_state: &S, operand: &str) -> String {
        format!("#${}", operand)
    }
}
