//! # Opcode Decoder
//!
//! Maps an opcode byte to a boxed [`Instruction`] and its base cycle count.
//!
//! Immediate operands of the accumulator and index instructions change width
//! with the m and x flags, so decoding consults the state: `A9` decodes to a
//! 2-byte `LDA` with an 8-bit accumulator and to a 3-byte `LDA` with a 16-bit
//! one.
//!
//! Base cycles are the 8-bit, no-penalty cost. Everything else (16-bit
//! operands, direct page alignment, page crossings, taken branches) is
//! reported by the instruction when it executes.

use std::fmt;

use crate::instruction::{Instruction, Op};
use crate::modes::{
    Absolute, AbsoluteControlFlow, AbsoluteIndexed, AbsoluteIndexedIndirect, AbsoluteIndirect,
    AbsoluteIndirectLong, AbsoluteLong, AbsoluteLongControlFlow, AbsoluteLongIndexedX,
    Accumulator, BlockMove, Direct, DirectIndexed, DirectIndexedIndirectX, DirectIndirect,
    DirectIndirectIndexedY, DirectIndirectLong, DirectIndirectLongIndexedY, Immediate16,
    Immediate8, Implied, ProgramCounterRelative, ProgramCounterRelativeLong, StackRelative,
    StackRelativeIndirectIndexedY, X, Y,
};
use crate::operators::block::{Mvn, Mvp};
use crate::operators::branches::{Beq, Bne, Bra, Brl};
use crate::operators::control::{Jml, Jmp, Jsr, Nop, Rts, Wdm};
use crate::operators::flags::{Clc, Rep, Sec, Sep, Xce};
use crate::operators::inc_dec::{Dec, Inc};
use crate::operators::load_store::{Lda, Ldx, Ldy, Sta, Stx, Sty, Stz};
use crate::state::{CpuContext, MachineState};

/// A decoded opcode.
pub struct Decoded<S: MachineState> {
    pub instruction: Box<dyn Instruction<S>>,
    /// Cycles the opcode costs before any penalty the instruction reports.
    pub base_cycles: u32,
}

impl<S: MachineState> fmt::Debug for Decoded<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoded")
            .field("mnemonic", &self.instruction.mnemonic())
            .field("mode", &self.instruction.addressing_mode().syntax())
            .field("size", &self.instruction.size())
            .field("base_cycles", &self.base_cycles)
            .finish()
    }
}

/// Decodes `opcode` for the current register widths.
///
/// Returns `None` for opcodes without an implementation.
///
/// # Examples
///
/// ```
/// use lib65816::{decode, AddressingMode, CpuState, FlatMemory};
///
/// let state = CpuState::new(FlatMemory::with_banks(1));
/// let decoded = decode(0xAD, &state).unwrap();
/// assert_eq!(decoded.instruction.mnemonic(), "LDA");
/// assert_eq!(decoded.instruction.addressing_mode(), AddressingMode::Absolute);
/// assert_eq!(decoded.instruction.size(), 3);
/// assert_eq!(decoded.base_cycles, 4);
///
/// assert!(decode(0x00, &state).is_none());
/// ```
pub fn decode<S: CpuContext>(opcode: u8, state: &S) -> Option<Decoded<S>> {
    macro_rules! op {
        ($cycles:expr, $mode:ty, $operator:ty) => {
            Decoded {
                instruction: Box::new(Op::<$mode, $operator>::new()),
                base_cycles: $cycles,
            }
        };
    }

    macro_rules! immediate {
        ($cycles:expr, $wide:expr, $operator:ty) => {
            if $wide {
                op!($cycles, Immediate16, $operator)
            } else {
                op!($cycles, Immediate8, $operator)
            }
        };
    }

    let m16 = state.is_16bit_accumulator();
    let x16 = state.is_16bit_index();

    let decoded = match opcode {
        // Loads
        0xA9 => immediate!(2, m16, Lda),
        0xA5 => op!(3, Direct, Lda),
        0xB5 => op!(4, DirectIndexed<X>, Lda),
        0xB2 => op!(5, DirectIndirect, Lda),
        0xA1 => op!(6, DirectIndexedIndirectX, Lda),
        0xB1 => op!(5, DirectIndirectIndexedY, Lda),
        0xA7 => op!(6, DirectIndirectLong, Lda),
        0xB7 => op!(6, DirectIndirectLongIndexedY, Lda),
        0xAD => op!(4, Absolute, Lda),
        0xBD => op!(4, AbsoluteIndexed<X>, Lda),
        0xB9 => op!(4, AbsoluteIndexed<Y>, Lda),
        0xAF => op!(5, AbsoluteLong, Lda),
        0xBF => op!(5, AbsoluteLongIndexedX, Lda),
        0xA3 => op!(4, StackRelative, Lda),
        0xB3 => op!(7, StackRelativeIndirectIndexedY, Lda),
        0xA2 => immediate!(2, x16, Ldx),
        0xA6 => op!(3, Direct, Ldx),
        0xB6 => op!(4, DirectIndexed<Y>, Ldx),
        0xAE => op!(4, Absolute, Ldx),
        0xBE => op!(4, AbsoluteIndexed<Y>, Ldx),
        0xA0 => immediate!(2, x16, Ldy),
        0xA4 => op!(3, Direct, Ldy),
        0xB4 => op!(4, DirectIndexed<X>, Ldy),
        0xAC => op!(4, Absolute, Ldy),
        0xBC => op!(4, AbsoluteIndexed<X>, Ldy),

        // Stores
        0x85 => op!(3, Direct, Sta),
        0x95 => op!(4, DirectIndexed<X>, Sta),
        0x92 => op!(5, DirectIndirect, Sta),
        0x81 => op!(6, DirectIndexedIndirectX, Sta),
        0x91 => op!(6, DirectIndirectIndexedY, Sta),
        0x87 => op!(6, DirectIndirectLong, Sta),
        0x97 => op!(6, DirectIndirectLongIndexedY, Sta),
        0x8D => op!(4, Absolute, Sta),
        0x9D => op!(5, AbsoluteIndexed<X>, Sta),
        0x99 => op!(5, AbsoluteIndexed<Y>, Sta),
        0x8F => op!(5, AbsoluteLong, Sta),
        0x9F => op!(5, AbsoluteLongIndexedX, Sta),
        0x83 => op!(4, StackRelative, Sta),
        0x93 => op!(7, StackRelativeIndirectIndexedY, Sta),
        0x86 => op!(3, Direct, Stx),
        0x96 => op!(4, DirectIndexed<Y>, Stx),
        0x8E => op!(4, Absolute, Stx),
        0x84 => op!(3, Direct, Sty),
        0x94 => op!(4, DirectIndexed<X>, Sty),
        0x8C => op!(4, Absolute, Sty),
        0x64 => op!(3, Direct, Stz),
        0x74 => op!(4, DirectIndexed<X>, Stz),
        0x9C => op!(4, Absolute, Stz),
        0x9E => op!(5, AbsoluteIndexed<X>, Stz),

        // Increment and decrement
        0x1A => op!(2, Accumulator, Inc),
        0xE6 => op!(5, Direct, Inc),
        0xF6 => op!(6, DirectIndexed<X>, Inc),
        0xEE => op!(6, Absolute, Inc),
        0xFE => op!(7, AbsoluteIndexed<X>, Inc),
        0x3A => op!(2, Accumulator, Dec),
        0xC6 => op!(5, Direct, Dec),
        0xD6 => op!(6, DirectIndexed<X>, Dec),
        0xCE => op!(6, Absolute, Dec),
        0xDE => op!(7, AbsoluteIndexed<X>, Dec),

        // Jumps and subroutines
        0x4C => op!(3, AbsoluteControlFlow, Jmp),
        0x6C => op!(5, AbsoluteIndirect, Jmp),
        0x7C => op!(6, AbsoluteIndexedIndirect, Jmp),
        0x5C => op!(4, AbsoluteLongControlFlow, Jml),
        0xDC => op!(6, AbsoluteIndirectLong, Jml),
        0x20 => op!(6, AbsoluteControlFlow, Jsr),
        0x60 => op!(6, Implied, Rts),

        // Branches
        0x80 => op!(2, ProgramCounterRelative, Bra),
        0x82 => op!(4, ProgramCounterRelativeLong, Brl),
        0xF0 => op!(2, ProgramCounterRelative, Beq),
        0xD0 => op!(2, ProgramCounterRelative, Bne),

        // Processor status
        0x18 => op!(2, Implied, Clc),
        0x38 => op!(2, Implied, Sec),
        0xC2 => op!(3, Immediate8, Rep),
        0xE2 => op!(3, Immediate8, Sep),
        0xFB => op!(2, Implied, Xce),

        // Misc
        0xEA => op!(2, Implied, Nop),
        0x42 => op!(2, Immediate8, Wdm),
        0x54 => op!(7, BlockMove, Mvn),
        0x44 => op!(7, BlockMove, Mvp),

        _ => return None,
    };

    Some(decoded)
}
