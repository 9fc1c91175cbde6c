//! # Machine State
//!
//! Instructions never own the processor; they borrow it through two traits:
//!
//! - [`MachineState`]: the narrow interface the instruction framework itself
//!   needs (program-byte fetch, address resolution, breakpoints, printing)
//! - [`CpuContext`]: the register file and memory helpers the concrete
//!   addressing modes and operators need on top of that
//!
//! [`CpuState`] implements both over any [`MemoryBus`].

use std::collections::BTreeSet;

use bitflags::bitflags;

use crate::address::{Long, MemoryAccess, Wrapping};
use crate::memory::MemoryBus;
use crate::ExecutionError;

bitflags! {
    /// Processor status register (P).
    pub struct StatusFlags: u8 {
        const CARRY = 0b0000_0001;
        const ZERO = 0b0000_0010;
        const IRQ_DISABLE = 0b0000_0100;
        const DECIMAL = 0b0000_1000;
        /// x: 1 = 8-bit index registers. Reads as B (break) in emulation mode.
        const INDEX_8BIT = 0b0001_0000;
        /// m: 1 = 8-bit accumulator and memory.
        const MEMORY_8BIT = 0b0010_0000;
        const OVERFLOW = 0b0100_0000;
        const NEGATIVE = 0b1000_0000;
    }
}

/// Selects the X or Y index register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexRegister {
    X,
    Y,
}

impl IndexRegister {
    pub const fn name(self) -> &'static str {
        match self {
            IndexRegister::X => "X",
            IndexRegister::Y => "Y",
        }
    }
}

/// The state operations the instruction framework consumes.
///
/// Offsets are relative to the start of the instruction currently being
/// decoded (offset 0 is the opcode byte).
pub trait MachineState {
    /// Consumes the byte at the program cursor and advances the cursor by one.
    ///
    /// Fails with [`ExecutionError::DecodeFault`] if the cursor is outside
    /// mapped memory; the cursor does not move in that case.
    fn apply_program_byte(&mut self) -> Result<u8, ExecutionError>;

    /// Resolves `(low, high)` within the current data bank.
    ///
    /// Must be pure: identical bytes and unchanged state give identical results.
    fn memory_access(&self, low: u8, high: u8) -> Result<MemoryAccess, ExecutionError>;

    /// Resolves a full 24-bit operand.
    fn memory_access_long(&self, low: u8, high: u8, bank: u8)
        -> Result<MemoryAccess, ExecutionError>;

    /// Registers a breakpoint `offset` bytes from the instruction start.
    ///
    /// Registering an existing breakpoint is a no-op.
    fn apply_breakpoint(&mut self, offset: usize);

    /// Returns true if a breakpoint is set `offset` bytes from the instruction start.
    fn has_breakpoint(&self, offset: usize) -> bool;

    /// Appends the byte at `offset` as two hex digits (`??` if unreadable).
    fn print_program_byte(&self, offset: usize, out: &mut String);
}

/// Register and memory access for concrete addressing modes and operators.
pub trait CpuContext: MachineState {
    fn flags(&self) -> StatusFlags;

    /// Replaces the status register, re-applying the register width rules.
    fn set_flags(&mut self, flags: StatusFlags);

    fn emulation(&self) -> bool;

    fn set_emulation(&mut self, emulation: bool);

    /// The full 16-bit accumulator (C = B:A).
    fn accumulator(&self) -> u16;

    fn set_accumulator(&mut self, value: u16);

    fn index(&self, register: IndexRegister) -> u16;

    fn set_index(&mut self, register: IndexRegister, value: u16);

    fn stack_pointer(&self) -> u16;

    fn set_stack_pointer(&mut self, value: u16);

    fn direct_page(&self) -> u16;

    fn data_bank(&self) -> u8;

    fn set_data_bank(&mut self, bank: u8);

    fn program_counter(&self) -> u16;

    fn program_bank(&self) -> u8;

    /// Moves the program cursor to `address`.
    fn set_program_address(&mut self, address: Long);

    /// Address of the opcode byte of the instruction being executed.
    fn instruction_start(&self) -> Long;

    /// Reads the program byte at `offset` without moving the cursor.
    fn inspect_program_byte(&self, offset: usize) -> Result<u8, ExecutionError>;

    fn read_byte(&self, address: Long) -> Result<u8, ExecutionError>;

    fn write_byte(&mut self, address: Long, value: u8) -> Result<(), ExecutionError>;

    /// Builds an access, failing with a memory fault if `address` is unmapped.
    fn resolve(&self, address: Long, wrapping: Wrapping) -> Result<MemoryAccess, ExecutionError>;

    fn flag(&self, flag: StatusFlags) -> bool {
        self.flags().contains(flag)
    }

    fn set_flag(&mut self, flag: StatusFlags, value: bool) {
        let mut flags = self.flags();
        flags.set(flag, value);
        self.set_flags(flags);
    }

    /// True when m = 0 in native mode.
    fn is_16bit_accumulator(&self) -> bool {
        !self.emulation() && !self.flag(StatusFlags::MEMORY_8BIT)
    }

    /// True when x = 0 in native mode.
    fn is_16bit_index(&self) -> bool {
        !self.emulation() && !self.flag(StatusFlags::INDEX_8BIT)
    }

    /// Sets N and Z from an 8- or 16-bit result.
    fn update_sign_flags(&mut self, value: u16, wide: bool) {
        let (zero, negative) = if wide {
            (value == 0, value & 0x8000 != 0)
        } else {
            (value & 0xFF == 0, value & 0x80 != 0)
        };
        let mut flags = self.flags();
        flags.set(StatusFlags::ZERO, zero);
        flags.set(StatusFlags::NEGATIVE, negative);
        self.set_flags(flags);
    }

    /// Reads one byte, or a little-endian word when `wide`.
    fn read_access(&self, access: MemoryAccess, wide: bool) -> Result<u16, ExecutionError> {
        let low = self.read_byte(access.byte(0))? as u16;
        if !wide {
            return Ok(low);
        }
        let high = self.read_byte(access.byte(1))? as u16;
        Ok((high << 8) | low)
    }

    /// Writes one byte, or a little-endian word when `wide`.
    ///
    /// Both bytes of a word must be mapped; a faulting word write leaves
    /// memory untouched.
    fn write_access(
        &mut self,
        access: MemoryAccess,
        value: u16,
        wide: bool,
    ) -> Result<(), ExecutionError> {
        if wide {
            self.resolve(access.byte(1), access.wrapping())?;
        }
        self.write_byte(access.byte(0), value as u8)?;
        if wide {
            self.write_byte(access.byte(1), (value >> 8) as u8)?;
        }
        Ok(())
    }

    /// Reads a 24-bit pointer stored at `access`.
    fn read_long_pointer(&self, access: MemoryAccess) -> Result<Long, ExecutionError> {
        Ok(Long::from_bytes(
            self.read_byte(access.byte(0))?,
            self.read_byte(access.byte(1))?,
            self.read_byte(access.byte(2))?,
        ))
    }

    /// Resolves a direct page operand plus `index` into bank 0.
    ///
    /// In emulation mode with a page-aligned direct page register the result
    /// wraps within that page; otherwise it wraps within bank 0.
    fn direct_access(&self, low: u8, index: u16) -> Result<MemoryAccess, ExecutionError> {
        let d = self.direct_page();
        if self.emulation() && d & 0xFF == 0 {
            let address = Long::from_bytes(low.wrapping_add(index as u8), (d >> 8) as u8, 0);
            self.resolve(address, Wrapping::Page)
        } else {
            let offset = d.wrapping_add(low as u16).wrapping_add(index);
            self.resolve(Long::from_word(offset, 0), Wrapping::Bank)
        }
    }

    fn push_byte(&mut self, value: u8) -> Result<(), ExecutionError> {
        let s = self.stack_pointer();
        self.write_byte(Long::from_word(s, 0), value)?;
        self.set_stack_pointer(s.wrapping_sub(1));
        Ok(())
    }

    fn pull_byte(&mut self) -> Result<u8, ExecutionError> {
        let s = self.stack_pointer().wrapping_add(1);
        self.set_stack_pointer(s);
        self.read_byte(Long::from_word(self.stack_pointer(), 0))
    }

    fn push_word(&mut self, value: u16) -> Result<(), ExecutionError> {
        self.push_byte((value >> 8) as u8)?;
        self.push_byte(value as u8)
    }

    fn pull_word(&mut self) -> Result<u16, ExecutionError> {
        let low = self.pull_byte()? as u16;
        let high = self.pull_byte()? as u16;
        Ok((high << 8) | low)
    }
}

/// 65816 register file, breakpoint table and memory.
///
/// # Examples
///
/// ```
/// use lib65816::{CpuContext, CpuState, FlatMemory, Long, MemoryBus};
///
/// let mut memory = FlatMemory::with_banks(1);
/// memory.write(Long::new(0xFFFC), 0x00).unwrap();
/// memory.write(Long::new(0xFFFD), 0x80).unwrap();
///
/// let state = CpuState::new(memory);
/// assert_eq!(state.program_counter(), 0x8000);
/// assert!(state.emulation());
/// assert_eq!(state.stack_pointer(), 0x01FF);
/// ```
pub struct CpuState<M: MemoryBus> {
    a: u16,
    x: u16,
    y: u16,
    s: u16,
    d: u16,
    dbr: u8,
    pbr: u8,
    pc: u16,
    p: StatusFlags,
    emulation: bool,
    instruction_start: Long,
    breakpoints: BTreeSet<Long>,
    memory: M,
}

impl<M: MemoryBus> CpuState<M> {
    /// Emulation-mode reset vector.
    pub const RESET_VECTOR: Long = Long::from_word(0xFFFC, 0x00);

    /// Creates a state in the 65816 reset configuration.
    ///
    /// The program counter is loaded from the reset vector at `$00:FFFC`;
    /// an unmapped vector reads as zero.
    pub fn new(memory: M) -> Self {
        let low = memory.read(Self::RESET_VECTOR).unwrap_or(0x00);
        let high = memory
            .read(Self::RESET_VECTOR.wrapping_add(1))
            .unwrap_or(0x00);
        let pc = u16::from_le_bytes([low, high]);

        let mut state = Self {
            a: 0,
            x: 0,
            y: 0,
            s: 0x01FF,
            d: 0,
            dbr: 0,
            pbr: 0,
            pc,
            p: StatusFlags::IRQ_DISABLE,
            emulation: true,
            instruction_start: Long::from_word(pc, 0),
            breakpoints: BTreeSet::new(),
            memory,
        };
        state.force_registers();
        state
    }

    /// Marks the program cursor as the start of the next instruction.
    ///
    /// Offsets given to [`MachineState`] methods are relative to this address.
    pub fn begin_instruction(&mut self) {
        self.instruction_start = self.program_address();
    }

    /// Current program cursor as a 24-bit address.
    pub fn program_address(&self) -> Long {
        Long::from_word(self.pc, self.pbr)
    }

    /// Address `offset` bytes into the current instruction.
    ///
    /// Program addresses wrap within the program bank.
    pub fn instruction_address(&self, offset: usize) -> Long {
        self.instruction_start.wrapping_add_in_bank(offset as u16)
    }

    pub fn set_direct_page(&mut self, value: u16) {
        self.d = value;
    }

    /// Sets a breakpoint at an absolute address.
    pub fn add_breakpoint(&mut self, address: Long) -> bool {
        self.breakpoints.insert(address)
    }

    pub fn remove_breakpoint(&mut self, address: Long) -> bool {
        self.breakpoints.remove(&address)
    }

    pub fn breakpoint_at(&self, address: Long) -> bool {
        self.breakpoints.contains(&address)
    }

    /// Breakpoints in ascending address order.
    pub fn breakpoints(&self) -> impl Iterator<Item = Long> + '_ {
        self.breakpoints.iter().copied()
    }

    pub fn clear_breakpoints(&mut self) {
        self.breakpoints.clear();
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Enforces the register width rules implied by the e and x bits.
    fn force_registers(&mut self) {
        if self.emulation {
            self.p.insert(StatusFlags::MEMORY_8BIT | StatusFlags::INDEX_8BIT);
            self.s = 0x0100 | (self.s & 0xFF);
        }
        if self.p.contains(StatusFlags::INDEX_8BIT) {
            self.x &= 0xFF;
            self.y &= 0xFF;
        }
    }
}

impl<M: MemoryBus> MachineState for CpuState<M> {
    fn apply_program_byte(&mut self) -> Result<u8, ExecutionError> {
        let address = self.program_address();
        let byte = self
            .memory
            .read(address)
            .map_err(|_| ExecutionError::DecodeFault { address })?;
        self.pc = self.pc.wrapping_add(1);
        Ok(byte)
    }

    fn memory_access(&self, low: u8, high: u8) -> Result<MemoryAccess, ExecutionError> {
        self.resolve(Long::from_bytes(low, high, self.dbr), Wrapping::Full)
    }

    fn memory_access_long(
        &self,
        low: u8,
        high: u8,
        bank: u8,
    ) -> Result<MemoryAccess, ExecutionError> {
        self.resolve(Long::from_bytes(low, high, bank), Wrapping::Full)
    }

    fn apply_breakpoint(&mut self, offset: usize) {
        let address = self.instruction_address(offset);
        self.breakpoints.insert(address);
    }

    fn has_breakpoint(&self, offset: usize) -> bool {
        self.breakpoints.contains(&self.instruction_address(offset))
    }

    fn print_program_byte(&self, offset: usize, out: &mut String) {
        match self.memory.read(self.instruction_address(offset)) {
            Ok(byte) => out.push_str(&format!("{:02X}", byte)),
            Err(_) => out.push_str("??"),
        }
    }
}

impl<M: MemoryBus> CpuContext for CpuState<M> {
    fn flags(&self) -> StatusFlags {
        self.p
    }

    fn set_flags(&mut self, flags: StatusFlags) {
        self.p = flags;
        self.force_registers();
    }

    fn emulation(&self) -> bool {
        self.emulation
    }

    fn set_emulation(&mut self, emulation: bool) {
        self.emulation = emulation;
        self.force_registers();
    }

    fn accumulator(&self) -> u16 {
        self.a
    }

    fn set_accumulator(&mut self, value: u16) {
        self.a = value;
    }

    fn index(&self, register: IndexRegister) -> u16 {
        match register {
            IndexRegister::X => self.x,
            IndexRegister::Y => self.y,
        }
    }

    fn set_index(&mut self, register: IndexRegister, value: u16) {
        match register {
            IndexRegister::X => self.x = value,
            IndexRegister::Y => self.y = value,
        }
        self.force_registers();
    }

    fn stack_pointer(&self) -> u16 {
        self.s
    }

    fn set_stack_pointer(&mut self, value: u16) {
        self.s = value;
        self.force_registers();
    }

    fn direct_page(&self) -> u16 {
        self.d
    }

    fn data_bank(&self) -> u8 {
        self.dbr
    }

    fn set_data_bank(&mut self, bank: u8) {
        self.dbr = bank;
    }

    fn program_counter(&self) -> u16 {
        self.pc
    }

    fn program_bank(&self) -> u8 {
        self.pbr
    }

    fn set_program_address(&mut self, address: Long) {
        self.pc = address.offset();
        self.pbr = address.bank();
    }

    fn instruction_start(&self) -> Long {
        self.instruction_start
    }

    fn inspect_program_byte(&self, offset: usize) -> Result<u8, ExecutionError> {
        let address = self.instruction_address(offset);
        self.memory
            .read(address)
            .map_err(|_| ExecutionError::DecodeFault { address })
    }

    fn read_byte(&self, address: Long) -> Result<u8, ExecutionError> {
        self.memory
            .read(address)
            .map_err(|_| ExecutionError::MemoryFault { address })
    }

    fn write_byte(&mut self, address: Long, value: u8) -> Result<(), ExecutionError> {
        self.memory
            .write(address, value)
            .map_err(|_| ExecutionError::MemoryFault { address })
    }

    fn resolve(&self, address: Long, wrapping: Wrapping) -> Result<MemoryAccess, ExecutionError> {
        if self.memory.is_mapped(address) {
            Ok(MemoryAccess::with_wrapping(address, wrapping))
        } else {
            Err(ExecutionError::MemoryFault { address })
        }
    }
}
