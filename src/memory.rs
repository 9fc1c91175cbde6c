//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU state from
//! specific memory implementations, and a flat RAM implementation for tests and
//! simple hosts.
//!
//! ## Design Principles
//!
//! - Addresses are full 24-bit [`Long`] values
//! - Reads and writes to unmapped addresses report a [`BusFault`]; the machine
//!   state decides whether that is a decode fault or a memory fault
//! - Reads take `&self` so disassembly can inspect program bytes without
//!   side effects

use thiserror::Error;

use crate::address::Long;

/// Raised by a [`MemoryBus`] for an address nothing is mapped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no memory mapped at {0}")]
pub struct BusFault(pub Long);

/// Memory bus trait for the CPU state to read/write bytes.
///
/// # Examples
///
/// ```
/// use lib65816::{FlatMemory, Long, MemoryBus};
///
/// let mut mem = FlatMemory::with_banks(1);
///
/// mem.write(Long::new(0x1234), 0x42).unwrap();
/// assert_eq!(mem.read(Long::new(0x1234)), Ok(0x42));
///
/// // Bank 1 is not mapped
/// assert!(mem.read(Long::new(0x01_0000)).is_err());
/// ```
///
/// ## Implementing Custom Memory
///
/// ```
/// use lib65816::{BusFault, Long, MemoryBus};
///
/// /// 32KB of RAM in bank 0 and a 32KB ROM mirrored into every bank.
/// struct RomRamMemory {
///     ram: [u8; 0x8000],
///     rom: [u8; 0x8000],
/// }
///
/// impl MemoryBus for RomRamMemory {
///     fn read(&self, addr: Long) -> Result<u8, BusFault> {
///         match (addr.bank(), addr.offset()) {
///             (0x00, offset @ 0x0000..=0x7FFF) => Ok(self.ram[offset as usize]),
///             (_, offset @ 0x8000..=0xFFFF) => Ok(self.rom[(offset - 0x8000) as usize]),
///             _ => Err(BusFault(addr)),
///         }
///     }
///
///     fn write(&mut self, addr: Long, value: u8) -> Result<(), BusFault> {
///         match (addr.bank(), addr.offset()) {
///             (0x00, offset @ 0x0000..=0x7FFF) => {
///                 self.ram[offset as usize] = value;
///                 Ok(())
///             }
///             // Writes to ROM are silently ignored
///             (_, 0x8000..=0xFFFF) => Ok(()),
///             _ => Err(BusFault(addr)),
///         }
///     }
/// }
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 24-bit address.
    fn read(&self, addr: Long) -> Result<u8, BusFault>;

    /// Writes a byte to the specified 24-bit address.
    ///
    /// Implementations may ignore writes to read-only regions; only unmapped
    /// addresses are an error.
    fn write(&mut self, addr: Long, value: u8) -> Result<(), BusFault>;

    /// Returns true if something is mapped at `addr`.
    ///
    /// The default implementation probes with a read.
    fn is_mapped(&self, addr: Long) -> bool {
        self.read(addr).is_ok()
    }
}

/// Flat RAM covering the first `n` banks of the address space.
///
/// All mapped bytes are writable and initialized to 0x00. Addresses in banks
/// beyond the configured count are unmapped.
///
/// # Examples
///
/// ```
/// use lib65816::{FlatMemory, Long, MemoryBus};
///
/// let mut memory = FlatMemory::new();
/// memory.load(Long::from_word(0x8000, 0x00), &[0xEA, 0xEA]).unwrap();
/// assert_eq!(memory.read(Long::new(0x8001)), Ok(0xEA));
/// ```
pub struct FlatMemory {
    data: Vec<u8>,
}

impl FlatMemory {
    /// Bytes per bank.
    pub const BANK_SIZE: usize = 0x1_0000;

    /// Creates memory covering the whole 16MB address space.
    pub fn new() -> Self {
        Self::with_banks(256)
    }

    /// Creates memory covering banks `0..banks`.
    pub fn with_banks(banks: usize) -> Self {
        Self {
            data: vec![0; banks.min(256) * Self::BANK_SIZE],
        }
    }

    /// Copies `bytes` into memory starting at `start`.
    pub fn load(&mut self, start: Long, bytes: &[u8]) -> Result<(), BusFault> {
        for (i, &byte) in bytes.iter().enumerate() {
            self.write(start.wrapping_add(i as u32), byte)?;
        }
        Ok(())
    }

    /// Number of mapped bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: Long) -> Result<u8, BusFault> {
        self.data
            .get(addr.value() as usize)
            .copied()
            .ok_or(BusFault(addr))
    }

    fn write(&mut self, addr: Long, value: u8) -> Result<(), BusFault> {
        let slot = self
            .data
            .get_mut(addr.value() as usize)
            .ok_or(BusFault(addr))?;
        *slot = value;
        Ok(())
    }

    fn is_mapped(&self, addr: Long) -> bool {
        (addr.value() as usize) < self.data.len()
    }
}
