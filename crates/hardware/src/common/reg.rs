//! Architectural Register File.
//!
//! This module provides the `RegisterFile` struct holding the 32 RV64I integer
//! registers. It performs the following:
//! 1. **Storage:** Maintains `x0`-`x31` as 64-bit values.
//! 2. **Invariant Enforcement:** `x0` always reads as zero and ignores writes.

use crate::common::constants::NUM_REGS;

/// Integer register file with `x0` hardwired to zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegisterFile {
    regs: [u64; NUM_REGS],
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    /// Creates a register file with every register cleared.
    pub const fn new() -> Self {
        Self {
            regs: [0; NUM_REGS],
        }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Register `x0` always returns 0.
    #[inline]
    pub fn read(&self, idx: usize) -> u64 {
        if idx == 0 { 0 } else { self.regs[idx] }
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31). Writes to `x0` are discarded.
    /// * `val` - The 64-bit value to write.
    #[inline]
    pub fn write(&mut self, idx: usize, val: u64) {
        if idx != 0 {
            self.regs[idx] = val;
        }
    }
}
