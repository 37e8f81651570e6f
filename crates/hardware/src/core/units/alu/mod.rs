//! Arithmetic Logic Unit (ALU).
//!
//! Computes the `arith_result` of every instruction classified `arith_logic`:
//! the register-register and register-immediate classes (64-bit and word forms),
//! the link value of JAL/JALR, and the LUI/AUIPC upper-immediate results.
//!
//! Shifts live in [`shifts`]; everything else is a single wrapping operation.

/// Shift operations (sll, srl, sra) with RV64 and word-width masking.
pub mod shifts;

use crate::isa::instruction::Instruction;
use crate::isa::rv64i::{funct3, opcodes};

/// Integer ALU operation selected by funct3 and the alternate-encoding bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// Wrapping addition.
    Add,
    /// Wrapping subtraction.
    Sub,
    /// Shift left logical.
    Sll,
    /// Set if less than, signed.
    Slt,
    /// Set if less than, unsigned.
    Sltu,
    /// Bitwise exclusive or.
    Xor,
    /// Shift right logical.
    Srl,
    /// Shift right arithmetic.
    Sra,
    /// Bitwise or.
    Or,
    /// Bitwise and.
    And,
}

impl AluOp {
    /// Selects the operation for a funct3 value.
    ///
    /// `alt` is the SUB/SRA selector: funct7 bit 5 for register forms, or
    /// immediate bit 10 for right shifts. It is ignored for the other codes.
    pub const fn from_funct3(f3: u32, alt: bool) -> Self {
        match f3 {
            funct3::ADD_SUB if alt => Self::Sub,
            funct3::ADD_SUB => Self::Add,
            funct3::SLL => Self::Sll,
            funct3::SLT => Self::Slt,
            funct3::SLTU => Self::Sltu,
            funct3::XOR => Self::Xor,
            funct3::SRL_SRA if alt => Self::Sra,
            funct3::SRL_SRA => Self::Srl,
            funct3::OR => Self::Or,
            _ => Self::And,
        }
    }
}

/// Bit 30 of the word, the alternate-encoding selector (SUB, SRA, SRAI).
const ALT_BIT: u32 = 1 << 30;

/// Arithmetic Logic Unit for integer operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Applies one ALU operation to two operands.
    ///
    /// # Arguments
    ///
    /// * `op` - Operation to perform.
    /// * `a` - First operand.
    /// * `b` - Second operand (shift amount for shifts).
    /// * `is32` - Word (`*W`) form: operate on the low 32 bits and sign-extend.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::compute(AluOp::Add, 42, 8, false), 50);
    /// assert_eq!(Alu::compute(AluOp::Add, 0x7FFF_FFFF, 1, true), 0xFFFF_FFFF_8000_0000);
    /// assert_eq!(Alu::compute(AluOp::Slt, -5_i64 as u64, 10, false), 1);
    /// ```
    pub fn compute(op: AluOp, a: u64, b: u64, is32: bool) -> u64 {
        let full = match op {
            AluOp::Add => a.wrapping_add(b),
            AluOp::Sub => a.wrapping_sub(b),
            AluOp::Slt => u64::from((a as i64) < (b as i64)),
            AluOp::Sltu => u64::from(a < b),
            AluOp::Xor => a ^ b,
            AluOp::Or => a | b,
            AluOp::And => a & b,
            AluOp::Sll | AluOp::Srl | AluOp::Sra => return shifts::execute(op, a, b, is32),
        };
        if is32 {
            full as i32 as i64 as u64
        } else {
            full
        }
    }

    /// Computes the arithmetic result of a decoded instruction.
    ///
    /// Uses `op1`/`op2` as collected (and possibly forwarded) operands and the
    /// decoded immediate. Instructions outside the arithmetic classes yield 0.
    pub fn execute(inst: &Instruction) -> u64 {
        let alt = inst.raw & ALT_BIT != 0;
        match inst.opcode {
            opcodes::OP_REG => Self::compute(
                AluOp::from_funct3(inst.funct3, alt),
                inst.op1,
                inst.op2,
                false,
            ),
            opcodes::OP_REG_32 => Self::compute(
                AluOp::from_funct3(inst.funct3, alt),
                inst.op1,
                inst.op2,
                true,
            ),
            opcodes::OP_IMM => Self::compute(
                AluOp::from_funct3(inst.funct3, alt && inst.funct3 == funct3::SRL_SRA),
                inst.op1,
                inst.imm,
                false,
            ),
            opcodes::OP_IMM_32 => Self::compute(
                AluOp::from_funct3(inst.funct3, alt && inst.funct3 == funct3::SRL_SRA),
                inst.op1,
                inst.imm,
                true,
            ),
            opcodes::OP_JAL | opcodes::OP_JALR => inst.fall_through(),
            opcodes::OP_LUI => inst.imm,
            opcodes::OP_AUIPC => inst.pc.wrapping_add(inst.imm),
            _ => 0,
        }
    }
}
