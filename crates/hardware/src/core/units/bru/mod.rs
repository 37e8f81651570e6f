//! Branch Resolution Unit (BRU).
//!
//! Computes the architectural next PC of an instruction:
//! 1. **Sequential:** `pc + 4` for everything that does not redirect control flow.
//! 2. **Jumps:** JAL is PC-relative; JALR is register-relative with bit 0 cleared.
//! 3. **Branches:** funct3 picks the comparison between `op1` and `op2`.

use crate::isa::instruction::Instruction;
use crate::isa::rv64i::{funct3, opcodes};

/// Branch Resolution Unit.
#[derive(Debug)]
pub struct Bru;

impl Bru {
    /// Evaluates a branch condition.
    ///
    /// # Arguments
    ///
    /// * `f3` - Branch funct3 (BEQ, BNE, BLT, BGE, BLTU, BGEU).
    /// * `a` - Value of `rs1`.
    /// * `b` - Value of `rs2`.
    ///
    /// # Returns
    ///
    /// `true` when the branch is taken. Unassigned funct3 codes are never taken.
    pub const fn taken(f3: u32, a: u64, b: u64) -> bool {
        match f3 {
            funct3::BEQ => a == b,
            funct3::BNE => a != b,
            funct3::BLT => (a as i64) < (b as i64),
            funct3::BGE => (a as i64) >= (b as i64),
            funct3::BLTU => a < b,
            funct3::BGEU => a >= b,
            _ => false,
        }
    }

    /// Resolves the next PC of a decoded instruction from its current operands.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::core::units::bru::Bru;
    /// use rvpipe_core::isa::decode;
    ///
    /// // jalr zero, 3(ra) with ra = 0x100: target has bit 0 cleared.
    /// let mut inst = decode(0x40, 0x0030_8067);
    /// inst.op1 = 0x100;
    /// assert_eq!(Bru::next_pc(&inst), 0x102);
    /// ```
    pub fn next_pc(inst: &Instruction) -> u64 {
        if !inst.ctrl.legal {
            return inst.fall_through();
        }
        match inst.opcode {
            opcodes::OP_JAL => inst.pc.wrapping_add(inst.imm),
            opcodes::OP_JALR => inst.op1.wrapping_add(inst.imm) & !1,
            opcodes::OP_BRANCH if Self::taken(inst.funct3, inst.op1, inst.op2) => {
                inst.pc.wrapping_add(inst.imm)
            }
            _ => inst.fall_through(),
        }
    }
}
