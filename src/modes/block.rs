use crate::addressing::AddressingMode;
use crate::instruction::{AddressMode, WordOperand};
use crate::operator::BlockMoveOperator;
use crate::state::CpuContext;
use crate::ExecutionError;

/// Block move: `MVN $7E,$7F`
///
/// Encoded as opcode, destination bank, source bank. Each execution moves
/// one byte and decrements the 16-bit accumulator; until it wraps past zero
/// the program counter is rewound so the instruction runs again.
pub struct BlockMove;

impl<S, O> AddressMode<S, O> for BlockMove
where
    S: CpuContext,
    O: BlockMoveOperator<S>,
{
    type Operand = WordOperand;

    const MODE: AddressingMode = AddressingMode::BlockMove;

    fn invoke_operator(state: &mut S, operand: WordOperand) -> Result<u32, ExecutionError> {
        let remaining = state.accumulator();
        let cycles = O::invoke(state, operand.high, operand.low)?;
        state.set_accumulator(remaining.wrapping_sub(1));
        if remaining != 0 {
            let start = state.instruction_start();
            state.set_program_address(start);
        }
        Ok(cycles)
    }

    /// Operand text arrives highest offset first, i.e. source then destination.
    fn format_operand(_state: &S, operand: &str) -> String {
        match (operand.get(0..2), operand.get(2..4)) {
            (Some(source), Some(destination)) => format!("${},${}", source, destination),
            _ => format!("${}", operand),
        }
    }
}
