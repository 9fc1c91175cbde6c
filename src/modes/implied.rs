use crate::addressing::AddressingMode;
use crate::instruction::{AddressMode, NoOperand};
use crate::operator::{AccumulatorOperator, ImpliedOperator};
use crate::state::{CpuContext, MachineState};
use crate::ExecutionError;

/// Implied: `CLC`
pub struct Implied;

impl<S, O> AddressMode<S, O> for Implied
where
    S: MachineState,
    O: ImpliedOperator<S>,
{
    type Operand = NoOperand;

    const MODE: AddressingMode = AddressingMode::Implied;

    fn invoke_operator(state: &mut S, _operand: NoOperand) -> Result<u32, ExecutionError> {
        O::invoke(state)
    }

    fn format_operand(_state: &S, _operand: &str) -> String {
        String::new()
    }
}

/// Accumulator: `INC A`
pub struct Accumulator;

impl<S, O> AddressMode<S, O> for Accumulator
where
    S: CpuContext,
    O: AccumulatorOperator<S>,
{
    type Operand = NoOperand;

    const MODE: AddressingMode = AddressingMode::Accumulator;

    fn invoke_operator(state: &mut S, _operand: NoOperand) -> Result<u32, ExecutionError> {
        let wide = state.is_16bit_accumulator();
        let cycles = O::invoke(state)?;
        if wide {
            Ok(cycles.saturating_sub(2))
        } else {
            Ok(cycles)
        }
    }

    fn format_operand(_state: &S, _operand: &str) -> String {
        "A".to_string()
    }
}
