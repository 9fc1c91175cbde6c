use crate::addressing::AddressingMode;
use crate::instruction::{AddressMode, ByteOperand, WordOperand};
use crate::operator::BranchOperator;
use crate::state::CpuContext;
use crate::ExecutionError;

/// Formats a branch as its target offset, falling back to the raw
/// displacement when the operand bytes can't be read.
fn branch_target<S: CpuContext>(
    state: &S,
    size: u16,
    displacement: Option<i16>,
    raw: &str,
) -> String {
    match displacement {
        Some(displacement) => {
            let target = state
                .instruction_start()
                .offset()
                .wrapping_add(size)
                .wrapping_add(displacement as u16);
            format!("${:04X}", target)
        }
        None => format!("${}", raw),
    }
}

/// Program counter relative: `BEQ $8010`
///
/// The displacement is relative to the address after the instruction.
pub struct ProgramCounterRelative;

impl<S, O> AddressMode<S, O> for ProgramCounterRelative
where
    S: CpuContext,
    O: BranchOperator<S>,
{
    type Operand = ByteOperand;

    const MODE: AddressingMode = AddressingMode::ProgramCounterRelative;

    fn invoke_operator(state: &mut S, operand: ByteOperand) -> Result<u32, ExecutionError> {
        O::invoke(state, i16::from(operand.low as i8))
    }

    fn format_operand(state: &S, operand: &str) -> String {
        let displacement = state
            .inspect_program_byte(1)
            .ok()
            .map(|low| i16::from(low as i8));
        branch_target(state, 2, displacement, operand)
    }
}

/// Program counter relative long: `BRL $9000`
pub struct ProgramCounterRelativeLong;

impl<S, O> AddressMode<S, O> for ProgramCounterRelativeLong
where
    S: CpuContext,
    O: BranchOperator<S>,
{
    type Operand = WordOperand;

    const MODE: AddressingMode = AddressingMode::ProgramCounterRelativeLong;

    fn invoke_operator(state: &mut S, operand: WordOperand) -> Result<u32, ExecutionError> {
        O::invoke(state, operand.word() as i16)
    }

    fn format_operand(state: &S, operand: &str) -> String {
        let displacement = match (state.inspect_program_byte(1), state.inspect_program_byte(2)) {
            (Ok(low), Ok(high)) => Some(i16::from_le_bytes([low, high])),
            _ => None,
        };
        branch_target(state, 3, displacement, operand)
    }
}
