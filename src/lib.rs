//! # 65816 Instruction Dispatch Core
//!
//! An instruction-fetch-and-execute framework for the WDC 65816 processor.
//!
//! Every instruction is the pairing of an addressing mode with an operator. The
//! addressing mode fixes how many operand bytes follow the opcode and how they
//! become an effective address; the operator supplies the effect and reports
//! its cycle cost. Fetching, sizing, disassembly and breakpoint propagation are
//! written once, in [`instruction::Op`], and shared by every pairing.
//!
//! ## Quick Start
//!
//! ```rust
//! use lib65816::{Cpu, CpuContext, FlatMemory, Long, MemoryBus, StepOutcome};
//!
//! let mut memory = FlatMemory::with_banks(1);
//!
//! // Reset vector points at 0x8000
//! memory.write(Long::new(0xFFFC), 0x00).unwrap();
//! memory.write(Long::new(0xFFFD), 0x80).unwrap();
//!
//! // LDA #$42
//! memory.load(Long::new(0x8000), &[0xA9, 0x42]).unwrap();
//!
//! let mut cpu = Cpu::new(memory);
//! assert_eq!(cpu.disassemble_next().unwrap().to_string(), "00:8000  A9 42       LDA #$42");
//!
//! let outcome = cpu.step().unwrap();
//! assert_eq!(outcome, StepOutcome::Executed { opcode: 0xA9, cycles: 2 });
//! assert_eq!(cpu.state().accumulator() & 0xFF, 0x42);
//! ```
//!
//! ## Modules
//!
//! - `instruction` - Operand sizes, the `Instruction` contract and the generic `Op` pairing
//! - `operator` - Operator capability traits
//! - `modes` - Addressing modes built on the framework
//! - `operators` - Representative operator implementations
//! - `state` - `MachineState`/`CpuContext` traits and `CpuState`
//! - `memory` - `MemoryBus` trait and `FlatMemory`
//! - `address` - 24-bit addresses and memory accesses
//! - `addressing` - Addressing mode tags
//! - `decoder` - Opcode to instruction mapping
//! - `disassembler` - Disassembly text types
//! - `cpu` - The fetch/decode/execute loop

use thiserror::Error;

pub mod address;
pub mod addressing;
pub mod cpu;
pub mod decoder;
pub mod disassembler;
pub mod instruction;
pub mod memory;
pub mod modes;
pub mod operator;
pub mod operators;
pub mod state;

// Re-export public API
pub use address::{Long, MemoryAccess, Wrapping};
pub use addressing::AddressingMode;
pub use cpu::{Cpu, RunOutcome, StepOutcome};
pub use decoder::{decode, Decoded};
pub use disassembler::{Disassembly, Line};
pub use instruction::{Instruction, Op, Operand, OperandSize};
pub use memory::{BusFault, FlatMemory, MemoryBus};
pub use state::{CpuContext, CpuState, IndexRegister, MachineState, StatusFlags};

/// Errors that can occur during instruction execution.
///
/// The instruction layer defines none of its own; these are signalled by the
/// machine state and the decoder and propagated unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// A program byte was fetched from outside mapped memory.
    #[error("decode fault: program fetch at {address} is outside mapped memory")]
    DecodeFault { address: Long },

    /// An effective address or data access fell outside mapped memory.
    #[error("memory fault: {address} is not mapped")]
    MemoryFault { address: Long },

    /// The decoder has no instruction for this opcode.
    #[error("opcode ${opcode:02X} at {address} is not implemented")]
    UnimplementedOpcode { opcode: u8, address: Long },
}
