//! Execute (EX) Stage.
//!
//! This module implements the third stage of the instruction pipeline. It
//! computes ALU results (including link values and upper immediates) and the
//! effective address of loads and stores from the already forwarded operands.

use crate::core::units::alu::Alu;
use crate::core::units::lsu::Lsu;
use crate::isa::instruction::Instruction;

/// Executes the execute stage of the pipeline.
///
/// # Arguments
///
/// * `inst` - Record leaving decode, operands already forwarded.
///
/// # Returns
///
/// The record with `arith_result` and `mem_address` filled in. Records that are
/// not live or not legal pass through unchanged.
pub fn execute_stage(mut inst: Instruction) -> Instruction {
    if !inst.is_live() || !inst.is_legal() {
        return inst;
    }
    if inst.ctrl.arith_logic {
        inst.arith_result = Alu::execute(&inst);
    }
    if inst.ctrl.reads_mem || inst.ctrl.writes_mem {
        inst.mem_address = Lsu::address(&inst);
    }
    inst
}
