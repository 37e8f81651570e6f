//! RV64I upper function bits.
//!
//! R-type instructions carry a full funct7 (bits 31-25). The 64-bit shift
//! immediates use bits 31-26 instead, since bit 25 is the sixth shamt bit.

/// ADD, SLL, SRL and the other base encodings.
pub const BASE: u32 = 0b000_0000;

/// SUB and SRA (and their word forms).
pub const ALT: u32 = 0b010_0000;

/// SLLI / SRLI: bits 31-26 of a 64-bit shift immediate.
pub const SHIFT_LOGICAL: u32 = 0b00_0000;

/// SRAI: bits 31-26 of a 64-bit shift immediate.
pub const SHIFT_ARITH: u32 = 0b01_0000;
