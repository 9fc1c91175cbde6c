//! # Addressing Mode Implementations
//!
//! Each type here is a zero-sized addressing mode that implements
//! [`AddressMode`](crate::instruction::AddressMode) for every operator with
//! the matching capability. Pair one with an operator in
//! [`Op`](crate::instruction::Op) to get an instruction.
//!
//! Modes only need what they use from the state: [`Absolute`], [`AbsoluteLong`],
//! [`AbsoluteLongControlFlow`], [`Implied`] and the immediates work against any
//! [`MachineState`](crate::state::MachineState); the rest need a
//! [`CpuContext`](crate::state::CpuContext) for registers.
//!
//! ## Cycle penalties
//!
//! - Direct page modes: +1 when the low byte of the direct page register is non-zero
//! - Indexed absolute and indirect-indexed modes: +1 when indexing crosses a page
//! - Accumulator: the two extra cycles a 16-bit read-modify-write costs in memory
//!   are not spent on the accumulator

mod absolute;
mod block;
mod direct;
mod immediate;
mod implied;
mod relative;
mod stack;

pub use absolute::{
    Absolute, AbsoluteControlFlow, AbsoluteIndexed, AbsoluteIndexedIndirect,
    AbsoluteIndirect, AbsoluteIndirectLong, AbsoluteLong, AbsoluteLongControlFlow,
    AbsoluteLongIndexedX,
};
pub use block::BlockMove;
pub use direct::{
    Direct, DirectIndexed, DirectIndexedIndirectX, DirectIndirect, DirectIndirectIndexedY,
    DirectIndirectLong, DirectIndirectLongIndexedY,
};
pub use immediate::{Immediate16, Immediate8};
pub use implied::{Accumulator, Implied};
pub use relative::{ProgramCounterRelative, ProgramCounterRelativeLong};
pub use stack::{StackRelative, StackRelativeIndirectIndexedY};

use crate::addressing::AddressingMode;
use crate::state::{CpuContext, IndexRegister};

/// Selects the index register of an indexed mode at the type level.
pub trait Index {
    const REGISTER: IndexRegister;
    const DIRECT_MODE: AddressingMode;
    const ABSOLUTE_MODE: AddressingMode;
}

/// The X index register.
pub struct X;

/// The Y index register.
pub struct Y;

impl Index for X {
    const REGISTER: IndexRegister = IndexRegister::X;
    const DIRECT_MODE: AddressingMode = AddressingMode::DirectIndexedX;
    const ABSOLUTE_MODE: AddressingMode = AddressingMode::AbsoluteIndexedX;
}

impl Index for Y {
    const REGISTER: IndexRegister = IndexRegister::Y;
    const DIRECT_MODE: AddressingMode = AddressingMode::DirectIndexedY;
    const ABSOLUTE_MODE: AddressingMode = AddressingMode::AbsoluteIndexedY;
}

/// One cycle when the direct page register is not page aligned.
fn direct_page_penalty<S: CpuContext>(state: &S) -> u32 {
    u32::from(state.direct_page() & 0xFF != 0)
}
