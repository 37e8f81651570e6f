//! RV64I function codes (funct3, bits 14-12).
//!
//! The same three bits mean different things per major opcode, so the constants
//! are grouped by instruction class.

/// ADD / SUB / ADDI / ADDW / ADDIW.
pub const ADD_SUB: u32 = 0b000;
/// Shift left logical.
pub const SLL: u32 = 0b001;
/// Set less than (signed).
pub const SLT: u32 = 0b010;
/// Set less than (unsigned).
pub const SLTU: u32 = 0b011;
/// Exclusive or.
pub const XOR: u32 = 0b100;
/// Shift right, logical or arithmetic depending on the upper bits.
pub const SRL_SRA: u32 = 0b101;
/// Inclusive or.
pub const OR: u32 = 0b110;
/// And.
pub const AND: u32 = 0b111;

/// Load byte (sign-extended).
pub const LB: u32 = 0b000;
/// Load halfword (sign-extended).
pub const LH: u32 = 0b001;
/// Load word (sign-extended).
pub const LW: u32 = 0b010;
/// Load doubleword.
pub const LD: u32 = 0b011;
/// Load byte (zero-extended).
pub const LBU: u32 = 0b100;
/// Load halfword (zero-extended).
pub const LHU: u32 = 0b101;
/// Load word (zero-extended).
pub const LWU: u32 = 0b110;

/// Store byte.
pub const SB: u32 = 0b000;
/// Store halfword.
pub const SH: u32 = 0b001;
/// Store word.
pub const SW: u32 = 0b010;
/// Store doubleword.
pub const SD: u32 = 0b011;

/// Branch if equal.
pub const BEQ: u32 = 0b000;
/// Branch if not equal.
pub const BNE: u32 = 0b001;
/// Branch if less than (signed).
pub const BLT: u32 = 0b100;
/// Branch if greater or equal (signed).
pub const BGE: u32 = 0b101;
/// Branch if less than (unsigned).
pub const BLTU: u32 = 0b110;
/// Branch if greater or equal (unsigned).
pub const BGEU: u32 = 0b111;

/// The only funct3 JALR accepts.
pub const JALR: u32 = 0b000;
