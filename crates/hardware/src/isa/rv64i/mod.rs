//! RISC-V Base Integer Instruction Set (RV64I).
//!
//! - `opcodes`: Major opcodes (bits 6-0).
//! - `funct3`: Minor opcodes distinguishing instructions within a major opcode.
//! - `funct7`: Upper function bits separating ADD/SUB and logical/arithmetic shifts.

/// Function code 3 definitions.
pub mod funct3;

/// Function code 7 and shift-immediate upper bit definitions.
pub mod funct7;

/// Major opcodes.
pub mod opcodes;
