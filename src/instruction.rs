//! # Instructions
//!
//! The fetch/size/disassembly/breakpoint scaffolding shared by every opcode.
//!
//! An instruction is an [`Op`] pairing an addressing mode type with an operator
//! type. The mode's [`AddressMode::Operand`] fixes the encoded size, and with it
//! how many bytes are fetched from the program stream:
//!
//! | Operand         | Size | Bytes fetched by `execute` |
//! |-----------------|------|----------------------------|
//! | [`NoOperand`]   | 1    | none                       |
//! | [`ByteOperand`] | 2    | low                        |
//! | [`WordOperand`] | 3    | low, high                  |
//! | [`LongOperand`] | 4    | low, high, bank            |
//!
//! The opcode byte is consumed by the decoder loop before `execute` is called,
//! so `execute` always performs exactly `size() - 1` fetches.

use std::fmt;
use std::marker::PhantomData;

use crate::address::Long;
use crate::addressing::AddressingMode;
use crate::disassembler::Disassembly;
use crate::operator::Operator;
use crate::state::MachineState;
use crate::ExecutionError;

/// Encoded instruction length, opcode byte included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OperandSize {
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
}

impl OperandSize {
    pub const fn bytes(self) -> usize {
        self as usize
    }
}

/// Operand bytes of one sized instruction variant, in fetch order.
pub trait Operand: Copy + fmt::Debug {
    const SIZE: OperandSize;

    /// Fetches the operand bytes from the program stream, lowest offset first.
    ///
    /// Stops at the first failed fetch.
    fn apply<S: MachineState + ?Sized>(state: &mut S) -> Result<Self, ExecutionError>;
}

/// Operand of 1-byte instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoOperand;

/// Operand of 2-byte instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ByteOperand {
    pub low: u8,
}

/// Operand of 3-byte instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WordOperand {
    pub low: u8,
    pub high: u8,
}

impl WordOperand {
    pub const fn word(self) -> u16 {
        u16::from_le_bytes([self.low, self.high])
    }
}

/// Operand of 4-byte instructions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LongOperand {
    pub low: u8,
    pub high: u8,
    pub bank: u8,
}

impl LongOperand {
    pub const fn long(self) -> Long {
        Long::from_bytes(self.low, self.high, self.bank)
    }
}

impl Operand for NoOperand {
    const SIZE: OperandSize = OperandSize::One;

    fn apply<S: MachineState + ?Sized>(_state: &mut S) -> Result<Self, ExecutionError> {
        Ok(NoOperand)
    }
}

impl Operand for ByteOperand {
    const SIZE: OperandSize = OperandSize::Two;

    fn apply<S: MachineState + ?Sized>(state: &mut S) -> Result<Self, ExecutionError> {
        let low = state.apply_program_byte()?;
        Ok(ByteOperand { low })
    }
}

impl Operand for WordOperand {
    const SIZE: OperandSize = OperandSize::Three;

    fn apply<S: MachineState + ?Sized>(state: &mut S) -> Result<Self, ExecutionError> {
        let low = state.apply_program_byte()?;
        let high = state.apply_program_byte()?;
        Ok(WordOperand { low, high })
    }
}

impl Operand for LongOperand {
    const SIZE: OperandSize = OperandSize::Four;

    fn apply<S: MachineState + ?Sized>(state: &mut S) -> Result<Self, ExecutionError> {
        let low = state.apply_program_byte()?;
        let high = state.apply_program_byte()?;
        let bank = state.apply_program_byte()?;
        Ok(LongOperand { low, high, bank })
    }
}

/// An addressing mode: turns fetched operand bytes into whatever operator `O`
/// expects, then invokes it.
///
/// Modes are zero-sized marker types; all behavior is associated functions so
/// one mode serves every operator it is paired with.
pub trait AddressMode<S: MachineState, O: Operator> {
    /// Operand bytes this mode consumes; fixes the instruction size.
    type Operand: Operand;

    const MODE: AddressingMode;

    /// Resolves the operand and invokes the operator, returning its cycle
    /// count plus any penalty cycles the mode itself incurs.
    fn invoke_operator(state: &mut S, operand: Self::Operand) -> Result<u32, ExecutionError>;

    /// Decorates the operand text with this mode's syntax, e.g. `$1234,X`.
    ///
    /// `operand` is the output of [`Instruction::operand_to_string`]. Returns
    /// an empty string for modes without an operand field.
    fn format_operand(state: &S, operand: &str) -> String;
}

/// The contract the decoder, disassembler and debugger see.
///
/// All methods take the machine state explicitly; an instruction holds nothing
/// between calls.
pub trait Instruction<S: MachineState> {
    /// Encoded length in bytes (1-4), opcode included. Never touches the state.
    fn size(&self) -> usize;

    /// Fetches the `size() - 1` operand bytes, resolves addressing, invokes the
    /// operator and returns the cycles it reports.
    ///
    /// The opcode byte must already have been consumed.
    fn execute(&self, state: &mut S) -> Result<u32, ExecutionError>;

    fn mnemonic(&self) -> &'static str;

    fn addressing_mode(&self) -> AddressingMode;

    /// Mnemonic plus operand field, e.g. `LDA $1234`.
    fn opcode_to_string(&self, state: &S) -> String;

    /// Operand bytes as hex, highest offset first.
    ///
    /// Bytes are fetched low to high but read most significant first, so a
    /// little-endian `34 12` renders as `1234`.
    fn operand_to_string(&self, state: &S) -> String {
        let mut out = String::new();
        for offset in (1..self.size()).rev() {
            state.print_program_byte(offset, &mut out);
        }
        out
    }

    /// Registers a breakpoint on every byte of this instruction.
    fn apply_breakpoints(&self, state: &mut S) {
        for offset in 0..self.size() {
            state.apply_breakpoint(offset);
        }
    }

    /// Returns true if any byte of this instruction carries a breakpoint.
    fn has_breakpoint(&self, state: &S) -> bool {
        (0..self.size()).any(|offset| state.has_breakpoint(offset))
    }

    /// Raw bytes and text of this instruction.
    fn disassemble(&self, state: &S) -> Disassembly {
        let mut bytes = String::new();
        for offset in 0..self.size() {
            if offset > 0 {
                bytes.push(' ');
            }
            state.print_program_byte(offset, &mut bytes);
        }
        Disassembly {
            bytes,
            text: self.opcode_to_string(state),
        }
    }
}

/// An addressing mode `M` paired with an operator `O`.
///
/// Zero-sized; build one per opcode and box it for dynamic dispatch.
///
/// # Examples
///
/// ```
/// use lib65816::modes::Absolute;
/// use lib65816::operators::load_store::Lda;
/// use lib65816::{CpuState, FlatMemory, Instruction, Op};
///
/// let lda = Op::<Absolute, Lda>::new();
/// assert_eq!(Instruction::<CpuState<FlatMemory>>::size(&lda), 3);
/// ```
pub struct Op<M, O> {
    _marker: PhantomData<fn() -> (M, O)>,
}

impl<M, O> Op<M, O> {
    pub const fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<M, O> Default for Op<M, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, O> Clone for Op<M, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M, O> Copy for Op<M, O> {}

impl<M, O> fmt::Debug for Op<M, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Op<{}, {}>",
            std::any::type_name::<M>(),
            std::any::type_name::<O>()
        )
    }
}

/// Fetches the operand for mode `M` and forwards it to the mode's invocation.
pub fn apply_operand<S, M, O>(state: &mut S) -> Result<u32, ExecutionError>
where
    S: MachineState,
    O: Operator,
    M: AddressMode<S, O>,
{
    let operand = <M::Operand as Operand>::apply(state)?;
    M::invoke_operator(state, operand)
}

impl<S, M, O> Instruction<S> for Op<M, O>
where
    S: MachineState,
    O: Operator,
    M: AddressMode<S, O>,
{
    fn size(&self) -> usize {
        <M::Operand as Operand>::SIZE.bytes()
    }

    fn execute(&self, state: &mut S) -> Result<u32, ExecutionError> {
        apply_operand::<S, M, O>(state)
    }

    fn mnemonic(&self) -> &'static str {
        O::MNEMONIC
    }

    fn addressing_mode(&self) -> AddressingMode {
        M::MODE
    }

    fn opcode_to_string(&self, state: &S) -> String {
        let operand = M::format_operand(state, &self.operand_to_string(state));
        if operand.is_empty() {
            O::MNEMONIC.to_string()
        } else {
            format!("{} {}", O::MNEMONIC, operand)
        }
    }
}
