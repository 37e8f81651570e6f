//! Load/Store Unit (LSU).
//!
//! This module provides the two memory-side steps of an instruction:
//! 1. **Address Generation:** `op1` plus the I-immediate (loads) or S-immediate (stores).
//! 2. **Memory Access:** Width from funct3, sign or zero extension of loaded values,
//!    truncation of stored values.
//!
//! Faults are returned to the caller; the record itself is only marked by the stage.

use crate::common::data::AccessSize;
use crate::common::error::MemoryError;
use crate::isa::instruction::Instruction;
use crate::isa::rv64i::funct3;
use crate::soc::memory::MemoryStore;

/// Load/Store Unit for memory operations.
#[derive(Debug)]
pub struct Lsu;

impl Lsu {
    /// Effective address of a load or store.
    ///
    /// The decoder already selected the I- or S-format immediate, so both cases
    /// reduce to `op1 + imm` with wrapping.
    #[inline]
    pub const fn address(inst: &Instruction) -> u64 {
        inst.op1.wrapping_add(inst.imm)
    }

    /// Extends a raw loaded value according to the load's funct3.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::units::lsu::Lsu;
    /// use rvpipe_core::isa::rv64i::funct3;
    ///
    /// assert_eq!(Lsu::extend(funct3::LB, 0x80), 0xFFFF_FFFF_FFFF_FF80);
    /// assert_eq!(Lsu::extend(funct3::LBU, 0x80), 0x80);
    /// assert_eq!(Lsu::extend(funct3::LW, 0x8000_0000), 0xFFFF_FFFF_8000_0000);
    /// ```
    pub const fn extend(f3: u32, raw: u64) -> u64 {
        match f3 {
            funct3::LB => raw as u8 as i8 as i64 as u64,
            funct3::LH => raw as u16 as i16 as i64 as u64,
            funct3::LW => raw as u32 as i32 as i64 as u64,
            _ => raw,
        }
    }

    /// Performs the memory access of a load or store.
    ///
    /// Loads return the extended value; stores write the low bytes of `op2` and
    /// return 0. Other instructions do not touch memory and return 0.
    ///
    /// # Errors
    ///
    /// [`MemoryError::OutOfBounds`] when the access leaves the store.
    pub fn access(memory: &mut MemoryStore, inst: &Instruction) -> Result<u64, MemoryError> {
        let size = AccessSize::from_funct3(inst.funct3);
        if inst.ctrl.reads_mem {
            let raw = memory.get(inst.mem_address, size)?;
            Ok(Self::extend(inst.funct3, raw))
        } else if inst.ctrl.writes_mem {
            memory.set(inst.mem_address, size, inst.op2)?;
            Ok(0)
        } else {
            Ok(0)
        }
    }
}
