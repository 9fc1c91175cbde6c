//! # Disassembly
//!
//! Text rendering of a single instruction, produced by
//! [`Instruction::disassemble`](crate::instruction::Instruction::disassemble)
//! and, with its address, by [`Cpu::disassemble_next`](crate::cpu::Cpu::disassemble_next).

use std::fmt;

use crate::address::Long;

/// Width the raw byte column is padded to; fits four bytes.
const BYTES_COLUMN: usize = 12;

/// Raw bytes and assembly text of one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembly {
    /// Instruction bytes as space separated hex, e.g. `AD 34 12`.
    pub bytes: String,

    /// Assembly text, e.g. `LDA $1234`.
    pub text: String,
}

impl fmt::Display for Disassembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<width$}{}", self.bytes, self.text, width = BYTES_COLUMN)
    }
}

/// A disassembled instruction at its address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub address: Long,
    pub disassembly: Disassembly,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {}", self.address, self.disassembly)
    }
}
