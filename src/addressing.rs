//! # Addressing Modes
//!
//! This module defines tags for the addressing modes of the 65816. Each mode
//! type in [`crate::modes`] reports its tag, which the decoder and debugger use
//! to describe an instruction without knowing its concrete type.

/// 65816 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implied, Accumulator
/// - **1 byte**: Immediate (8-bit), Direct and its indexed/indirect forms,
///   ProgramCounterRelative, StackRelative, StackRelativeIndirectIndexedY
/// - **2 bytes**: Immediate (16-bit), Absolute and its indexed/indirect forms,
///   ProgramCounterRelativeLong, BlockMove
/// - **3 bytes**: AbsoluteLong, AbsoluteLongIndexedX
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, XCE, NOP
    Implied,

    /// Operates directly on the accumulator.
    ///
    /// Example: INC A
    Accumulator,

    /// Constant operand; 8 or 16 bits wide depending on the m or x flag.
    ///
    /// Example: LDA #$10
    Immediate,

    /// Offset from the direct page register, in bank 0.
    ///
    /// Example: LDA $80
    Direct,

    /// Direct page offset indexed by X.
    ///
    /// Example: LDA $80,X
    DirectIndexedX,

    /// Direct page offset indexed by Y.
    ///
    /// Example: LDX $80,Y
    DirectIndexedY,

    /// 16-bit pointer in the direct page, data bank supplies the bank.
    ///
    /// Example: LDA ($80)
    DirectIndirect,

    /// Pointer at direct page offset + X.
    ///
    /// Example: LDA ($80,X)
    DirectIndexedIndirectX,

    /// Pointer in the direct page, then + Y.
    ///
    /// Example: LDA ($80),Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    DirectIndirectIndexedY,

    /// 24-bit pointer in the direct page.
    ///
    /// Example: LDA [$80]
    DirectIndirectLong,

    /// 24-bit pointer in the direct page, then + Y.
    ///
    /// Example: LDA [$80],Y
    DirectIndirectLongIndexedY,

    /// 16-bit address in the data bank (program bank for jumps).
    ///
    /// Example: LDA $1234
    Absolute,

    /// Absolute address indexed by X.
    ///
    /// Example: LDA $1234,X
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteIndexedX,

    /// Absolute address indexed by Y.
    ///
    /// Example: LDA $1234,Y
    /// May incur +1 cycle penalty if page boundary is crossed.
    AbsoluteIndexedY,

    /// Full 24-bit address.
    ///
    /// Example: LDA $7E1234
    AbsoluteLong,

    /// 24-bit address indexed by X.
    ///
    /// Example: LDA $7E1234,X
    AbsoluteLongIndexedX,

    /// Jump through a 16-bit pointer in bank 0.
    ///
    /// Example: JMP ($FFFC)
    AbsoluteIndirect,

    /// Jump through a 16-bit pointer at address + X in the program bank.
    ///
    /// Example: JMP ($1234,X)
    AbsoluteIndexedIndirect,

    /// Jump through a 24-bit pointer in bank 0.
    ///
    /// Example: JML [$1234]
    AbsoluteIndirectLong,

    /// Signed 8-bit branch displacement.
    ///
    /// Example: BEQ label
    ProgramCounterRelative,

    /// Signed 16-bit branch displacement.
    ///
    /// Example: BRL label
    ProgramCounterRelativeLong,

    /// Offset from the stack pointer, in bank 0.
    ///
    /// Example: LDA $03,S
    StackRelative,

    /// Pointer at stack pointer + offset, then + Y.
    ///
    /// Example: LDA ($03,S),Y
    StackRelativeIndirectIndexedY,

    /// Source and destination banks for MVN/MVP.
    ///
    /// Example: MVN $7E,$7F
    BlockMove,
}

impl AddressingMode {
    /// Conventional assembler notation for this mode.
    pub const fn syntax(self) -> &'static str {
        use AddressingMode::*;

        match self {
            Implied => "",
            Accumulator => "A",
            Immediate => "#const",
            Direct => "dp",
            DirectIndexedX => "dp,X",
            DirectIndexedY => "dp,Y",
            DirectIndirect => "(dp)",
            DirectIndexedIndirectX => "(dp,X)",
            DirectIndirectIndexedY => "(dp),Y",
            DirectIndirectLong => "[dp]",
            DirectIndirectLongIndexedY => "[dp],Y",
            Absolute => "addr",
            AbsoluteIndexedX => "addr,X",
            AbsoluteIndexedY => "addr,Y",
            AbsoluteLong => "long",
            AbsoluteLongIndexedX => "long,X",
            AbsoluteIndirect => "(addr)",
            AbsoluteIndexedIndirect => "(addr,X)",
            AbsoluteIndirectLong => "[addr]",
            ProgramCounterRelative => "nearlabel",
            ProgramCounterRelativeLong => "label",
            StackRelative => "sr,S",
            StackRelativeIndirectIndexedY => "(sr,S),Y",
            BlockMove => "srcbk,destbk",
        }
    }
}
