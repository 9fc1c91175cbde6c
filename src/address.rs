//! # Addresses and Memory Accesses
//!
//! The 65816 addresses a 24-bit space split into 256 banks of 64KB. This module
//! provides the [`Long`] address type and the [`MemoryAccess`] descriptor that
//! addressing modes resolve operand bytes into.

use std::fmt;

/// A 24-bit `bank:offset` address.
///
/// # Examples
///
/// ```
/// use lib65816::Long;
///
/// let addr = Long::from_bytes(0x34, 0x12, 0x7E);
/// assert_eq!(addr.bank(), 0x7E);
/// assert_eq!(addr.offset(), 0x1234);
/// assert_eq!(addr.value(), 0x7E1234);
/// assert_eq!(addr.to_string(), "7E:1234");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Long(u32);

impl Long {
    /// Mask of the valid address bits.
    pub const MASK: u32 = 0x00FF_FFFF;

    /// Creates an address, discarding anything above bit 23.
    pub const fn new(value: u32) -> Self {
        Self(value & Self::MASK)
    }

    /// Builds an address from operand bytes in fetch order.
    pub const fn from_bytes(low: u8, high: u8, bank: u8) -> Self {
        Self(((bank as u32) << 16) | ((high as u32) << 8) | low as u32)
    }

    /// Builds an address from a 16-bit offset within `bank`.
    pub const fn from_word(offset: u16, bank: u8) -> Self {
        Self(((bank as u32) << 16) | offset as u32)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn bank(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn offset(self) -> u16 {
        self.0 as u16
    }

    /// Adds `n`, wrapping at the end of the 24-bit space.
    pub const fn wrapping_add(self, n: u32) -> Self {
        Self::new(self.0.wrapping_add(n))
    }

    /// Adds `n` to the offset only, leaving the bank untouched.
    pub const fn wrapping_add_in_bank(self, n: u16) -> Self {
        Self::from_word(self.offset().wrapping_add(n), self.bank())
    }

    /// Returns true if `self` and `other` fall in different 256-byte pages.
    pub const fn page_differs(self, other: Long) -> bool {
        (self.0 >> 8) != (other.0 >> 8)
    }
}

impl fmt::Display for Long {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}:{:04X}", self.bank(), self.offset())
    }
}

/// How multi-byte accesses wrap past the end of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wrapping {
    /// Stay within the 256-byte page of the base address.
    ///
    /// Used by the direct page in emulation mode when its low byte is zero.
    Page,

    /// Stay within the 64KB bank of the base address.
    Bank,

    /// Carry into the bank byte.
    Full,
}

impl Wrapping {
    /// Address of the byte `n` positions after `base` under this rule.
    pub const fn apply(self, base: Long, n: u32) -> Long {
        let value = base.value();
        match self {
            Wrapping::Page => Long::new((value & !0xFF) | (value.wrapping_add(n) & 0xFF)),
            Wrapping::Bank => Long::new((value & !0xFFFF) | (value.wrapping_add(n) & 0xFFFF)),
            Wrapping::Full => base.wrapping_add(n),
        }
    }
}

/// A resolved effective address.
///
/// Produced by the machine state from raw operand bytes and consumed by a
/// single operator invocation. Carries no mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MemoryAccess {
    address: Long,
    wrapping: Wrapping,
}

impl MemoryAccess {
    /// An access at `address` with full 24-bit wrapping.
    pub const fn new(address: Long) -> Self {
        Self {
            address,
            wrapping: Wrapping::Full,
        }
    }

    pub const fn with_wrapping(address: Long, wrapping: Wrapping) -> Self {
        Self { address, wrapping }
    }

    pub const fn address(&self) -> Long {
        self.address
    }

    pub const fn wrapping(&self) -> Wrapping {
        self.wrapping
    }

    /// Address of the `n`th byte of a multi-byte value at this access.
    pub const fn byte(&self, n: u32) -> Long {
        self.wrapping.apply(self.address, n)
    }
}

impl fmt::Display for MemoryAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.address.fmt(f)
    }
}
