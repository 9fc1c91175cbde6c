//! # CPU Execution Loop
//!
//! This module drives a [`CpuState`] through the fetch-decode-execute loop.
//!
//! ## Execution Model
//!
//! The CPU executes instructions via:
//! - `step()`: Execute one instruction, or halt on a breakpoint
//! - `run_for_cycles()`: Execute until the cycle budget is exhausted or a breakpoint halts
//!
//! Each step marks the instruction start, consumes the opcode byte, decodes it
//! for the current register widths and hands the rest of the instruction to
//! [`Instruction::execute`](crate::instruction::Instruction::execute), which
//! fetches the operand bytes itself.
//!
//! ## Breakpoints
//!
//! A breakpoint on the address of the next opcode halts `step()` once without
//! executing anything; the following call executes the instruction.
//! [`Cpu::break_on_next_instruction`] sets breakpoints on every byte of the
//! instruction at the program counter.

use log::{debug, log_enabled, trace, warn, Level};

use crate::address::Long;
use crate::decoder::{decode, Decoded};
use crate::disassembler::Line;
use crate::memory::MemoryBus;
use crate::state::{CpuContext, CpuState, IndexRegister, MachineState};
use crate::ExecutionError;

/// Result of a single [`Cpu::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// An instruction ran to completion.
    Executed { opcode: u8, cycles: u32 },

    /// Execution stopped before the opcode at `address`.
    Breakpoint { address: Long },
}

/// Result of [`Cpu::run_for_cycles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// At least the requested number of cycles ran.
    BudgetExhausted { cycles: u64 },

    /// A breakpoint halted execution after `cycles` cycles.
    Breakpoint { address: Long, cycles: u64 },
}

/// 65816 execution loop over a [`CpuState`].
///
/// # Type Parameters
///
/// * `M` - Memory bus implementation (must implement `MemoryBus` trait)
///
/// # Examples
///
/// ```
/// use lib65816::{Cpu, CpuContext, FlatMemory, Long, MemoryBus};
///
/// let mut memory = FlatMemory::with_banks(1);
/// memory.write(Long::new(0xFFFC), 0x00).unwrap();
/// memory.write(Long::new(0xFFFD), 0x80).unwrap();
///
/// let cpu = Cpu::new(memory);
/// assert_eq!(cpu.state().program_counter(), 0x8000);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct Cpu<M: MemoryBus> {
    state: CpuState<M>,
    cycles: u64,
    /// Breakpoint address already reported; execution resumes through it.
    resume_from: Option<Long>,
}

impl<M: MemoryBus> Cpu<M> {
    /// Creates a CPU in the reset state over `memory`.
    pub fn new(memory: M) -> Self {
        Self::with_state(CpuState::new(memory))
    }

    /// Wraps an existing state.
    pub fn with_state(state: CpuState<M>) -> Self {
        Self {
            state,
            cycles: 0,
            resume_from: None,
        }
    }

    pub fn state(&self) -> &CpuState<M> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CpuState<M> {
        &mut self.state
    }

    /// Total cycles executed since creation.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Executes one instruction.
    ///
    /// # Returns
    ///
    /// - `Ok(StepOutcome::Executed { .. })` with the opcode and the cycles it took
    /// - `Ok(StepOutcome::Breakpoint { .. })` if a breakpoint halted execution;
    ///   nothing ran and the next call executes the instruction
    /// - `Err(ExecutionError::UnimplementedOpcode { .. })` for opcodes the decoder
    ///   doesn't know; the program counter is left on the opcode
    /// - `Err(ExecutionError::DecodeFault { .. })` or `Err(ExecutionError::MemoryFault { .. })`
    ///   if a fetch or data access hit unmapped memory; the program counter
    ///   is rewound to the opcode
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65816::{Cpu, ExecutionError, FlatMemory, Long, MemoryBus, StepOutcome};
    ///
    /// let mut memory = FlatMemory::with_banks(1);
    /// memory.write(Long::new(0xFFFC), 0x00).unwrap();
    /// memory.write(Long::new(0xFFFD), 0x80).unwrap();
    /// memory.load(Long::new(0x8000), &[0xEA, 0x00]).unwrap(); // NOP, BRK
    ///
    /// let mut cpu = Cpu::new(memory);
    /// assert_eq!(cpu.step(), Ok(StepOutcome::Executed { opcode: 0xEA, cycles: 2 }));
    ///
    /// match cpu.step() {
    ///     Err(ExecutionError::UnimplementedOpcode { opcode, .. }) => assert_eq!(opcode, 0x00),
    ///     other => panic!("unexpected {:?}", other),
    /// }
    /// ```
    pub fn step(&mut self) -> Result<StepOutcome, ExecutionError> {
        let address = self.state.program_address();

        if self.state.breakpoint_at(address) && self.resume_from != Some(address) {
            debug!("breakpoint hit at {}", address);
            self.resume_from = Some(address);
            return Ok(StepOutcome::Breakpoint { address });
        }
        self.resume_from = None;

        self.state.begin_instruction();
        let opcode = self.state.apply_program_byte()?;

        let Some(decoded) = decode(opcode, &self.state) else {
            warn!("unimplemented opcode ${:02X} at {}", opcode, address);
            self.state.set_program_address(address);
            return Err(ExecutionError::UnimplementedOpcode { opcode, address });
        };

        if log_enabled!(Level::Trace) {
            self.trace_instruction(address, &decoded);
        }

        match decoded.instruction.execute(&mut self.state) {
            Ok(extra) => {
                let cycles = decoded.base_cycles + extra;
                self.cycles += u64::from(cycles);
                Ok(StepOutcome::Executed { opcode, cycles })
            }
            Err(error) => {
                self.state.set_program_address(address);
                Err(error)
            }
        }
    }

    /// Runs the CPU for a specified number of cycles.
    ///
    /// Executes instructions until at least `cycle_budget` cycles have run, a
    /// breakpoint halts execution, or an error occurs. The consumed count may
    /// exceed the budget by part of an instruction.
    ///
    /// # Examples
    ///
    /// ```
    /// use lib65816::{Cpu, FlatMemory, Long, MemoryBus, RunOutcome};
    ///
    /// let mut memory = FlatMemory::with_banks(1);
    /// memory.write(Long::new(0xFFFC), 0x00).unwrap();
    /// memory.write(Long::new(0xFFFD), 0x80).unwrap();
    /// memory.load(Long::new(0x8000), &[0xEA; 16]).unwrap(); // NOPs
    ///
    /// let mut cpu = Cpu::new(memory);
    /// assert_eq!(cpu.run_for_cycles(10), Ok(RunOutcome::BudgetExhausted { cycles: 10 }));
    /// ```
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<RunOutcome, ExecutionError> {
        let start_cycles = self.cycles;

        while self.cycles - start_cycles < cycle_budget {
            if let StepOutcome::Breakpoint { address } = self.step()? {
                return Ok(RunOutcome::Breakpoint {
                    address,
                    cycles: self.cycles - start_cycles,
                });
            }
        }

        Ok(RunOutcome::BudgetExhausted {
            cycles: self.cycles - start_cycles,
        })
    }

    /// Sets breakpoints on every byte of the instruction at the program
    /// counter, so the next `step()` halts before it.
    ///
    /// Returns the size of the instruction.
    pub fn break_on_next_instruction(&mut self) -> Result<usize, ExecutionError> {
        let decoded = self.decode_next()?;
        decoded.instruction.apply_breakpoints(&mut self.state);
        // Halt even if this address was the one just resumed through.
        self.resume_from = None;
        debug!(
            "breakpoints set on {} bytes at {}",
            decoded.instruction.size(),
            self.state.instruction_start()
        );
        Ok(decoded.instruction.size())
    }

    /// Disassembles the instruction at the program counter without executing it.
    pub fn disassemble_next(&mut self) -> Result<Line, ExecutionError> {
        let decoded = self.decode_next()?;
        Ok(Line {
            address: self.state.instruction_start(),
            disassembly: decoded.instruction.disassemble(&self.state),
        })
    }

    /// Decodes the opcode at the program counter without consuming it.
    fn decode_next(&mut self) -> Result<Decoded<CpuState<M>>, ExecutionError> {
        self.state.begin_instruction();
        let address = self.state.instruction_start();
        let opcode = self.state.inspect_program_byte(0)?;
        decode(opcode, &self.state)
            .ok_or(ExecutionError::UnimplementedOpcode { opcode, address })
    }

    fn trace_instruction(&self, address: Long, decoded: &Decoded<CpuState<M>>) {
        let state = &self.state;
        trace!(
            "{}  {}  A:{:04X} X:{:04X} Y:{:04X} S:{:04X} D:{:04X} DB:{:02X} P:{:02X} E:{}",
            address,
            decoded.instruction.disassemble(state),
            state.accumulator(),
            state.index(IndexRegister::X),
            state.index(IndexRegister::Y),
            state.stack_pointer(),
            state.direct_page(),
            state.data_bank(),
            state.flags().bits(),
            u8::from(state.emulation()),
        );
    }
}
