//! Writeback (WB) Stage.
//!
//! This module implements the final stage of the instruction pipeline. It
//! commits the record's result to the register file and counts the dynamic
//! instruction. Halt detection is left to the engine.

use crate::core::Cpu;
use crate::core::cpu::execution::commit;
use crate::isa::instruction::Instruction;

/// Executes the writeback stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
/// * `inst` - Record leaving the memory stage.
///
/// # Returns
///
/// The retired record, unchanged.
pub fn wb_stage(cpu: &mut Cpu, inst: Instruction) -> Instruction {
    if inst.is_live() {
        let _ = commit(&inst, &mut cpu.regs);
        cpu.stats.dynamic_instructions += 1;
    }
    inst
}
