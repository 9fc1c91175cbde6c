//! # Operator Capabilities
//!
//! An operator is the opcode-specific effect of an instruction, e.g. "load
//! accumulator". Operators are zero-sized strategy types: nothing is stored in
//! them and all behavior is associated functions, so one type serves every
//! instance of every opcode it appears in.
//!
//! Which capability an operator needs depends on what the addressing mode
//! resolves the operand bytes into. An operator implements one capability per
//! kind of mode it can be paired with; `LDA` implements both
//! [`AccessOperator`] and [`ImmediateOperator`], for example.
//!
//! Every invocation returns the cycles the operator adds on top of the
//! opcode's base cost (typically 1 for a 16-bit memory operand).

use crate::address::{Long, MemoryAccess};
use crate::ExecutionError;

/// Common to all operators.
pub trait Operator {
    /// Assembler mnemonic, e.g. `"LDA"`.
    const MNEMONIC: &'static str;

    /// Whether indexing across a page boundary costs an extra cycle.
    ///
    /// Stores and read-modify-write operators always take the fix-up cycle,
    /// so it is already part of their base cost.
    const PAGE_CROSS_PENALTY: bool = true;
}

/// Invoked with no operand.
pub trait ImpliedOperator<S>: Operator {
    fn invoke(state: &mut S) -> Result<u32, ExecutionError>;
}

/// Invoked on the accumulator in place of a memory location.
pub trait AccumulatorOperator<S>: Operator {
    fn invoke(state: &mut S) -> Result<u32, ExecutionError>;
}

/// Invoked with a resolved effective address.
pub trait AccessOperator<S>: Operator {
    fn invoke(state: &mut S, access: MemoryAccess) -> Result<u32, ExecutionError>;
}

/// Invoked with the raw operand value; no address resolution.
pub trait ImmediateOperator<S>: Operator {
    fn invoke(state: &mut S, value: u16) -> Result<u32, ExecutionError>;
}

/// Invoked with a resolved control-flow target.
pub trait JumpOperator<S>: Operator {
    fn invoke(state: &mut S, target: Long) -> Result<u32, ExecutionError>;
}

/// Invoked with a sign-extended branch displacement.
pub trait BranchOperator<S>: Operator {
    fn invoke(state: &mut S, displacement: i16) -> Result<u32, ExecutionError>;
}

/// Invoked once per byte moved by MVN/MVP.
pub trait BlockMoveOperator<S>: Operator {
    fn invoke(state: &mut S, source_bank: u8, destination_bank: u8)
        -> Result<u32, ExecutionError>;
}
