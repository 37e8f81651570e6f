//! Global Simulator Constants.
//!
//! This module defines constants shared across the simulator. It includes:
//! 1. **Sentinel Encodings:** The halt word and the canonical no-op.
//! 2. **Control Flow:** Instruction size and the fixed exception vector.
//! 3. **Memory Geometry:** Default memory base and size, and dump bounds.
//! 4. **Configuration Limits:** Upper bounds on memory and cache geometry.

/// Instruction word that stops the simulation when it retires.
pub const HALT_WORD: u32 = 0xFEED_FEED;

/// Canonical no-op encoding (`addi x0, x0, 0`).
pub const NOP_WORD: u32 = 0x0000_0013;

/// Size of every RV64I instruction in bytes.
pub const INSTRUCTION_SIZE: u64 = 4;

/// Address fetch is redirected to when an illegal instruction or memory fault is raised.
pub const EXCEPTION_HANDLER: u64 = 0x8000;

/// Number of architectural integer registers.
pub const NUM_REGS: usize = 32;

/// Default memory base address.
pub const MEMORY_BASE: u64 = 0;

/// Default memory size in bytes (64 KiB).
pub const MEMORY_SIZE: u64 = 0x1_0000;

/// Default first address of the memory dump.
pub const DUMP_START: u64 = 0x0;

/// Default end address (exclusive) of the memory dump.
pub const DUMP_END: u64 = 0x1F4;

/// Number of 32-bit words printed on each memory dump row.
pub const DUMP_WORDS_PER_ROW: u64 = 5;

/// Largest accepted memory size in bytes (256 MiB).
pub const MAX_MEMORY_SIZE: u64 = 1 << 28;

/// Largest accepted cache size in bytes (16 MiB).
pub const MAX_CACHE_SIZE: u64 = 1 << 24;

/// Largest accepted associativity.
pub const MAX_CACHE_WAYS: u64 = 1 << 10;

/// Largest accepted number of cache sets.
pub const MAX_CACHE_SETS: u64 = 1 << 16;
