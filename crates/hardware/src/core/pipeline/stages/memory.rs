//! Memory Access (MEM) Stage.
//!
//! This module implements the fourth stage of the instruction pipeline. It
//! performs loads and stores against the memory store and queries the data
//! cache for each of them. An out-of-range access marks the record with a
//! memory fault; the engine decides what happens next.

use crate::common::data::CacheOp;
use crate::core::Cpu;
use crate::core::units::lsu::Lsu;
use crate::isa::instruction::Instruction;

/// Executes the memory stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state (memory and data cache).
/// * `inst` - Record leaving execute.
///
/// # Returns
///
/// The record with `mem_result` (loads) or `mem_fault` set, and whether the
/// data cache hit. Records that do not access memory always report a hit.
pub fn mem_stage(cpu: &mut Cpu, mut inst: Instruction) -> (Instruction, bool) {
    if !inst.is_live() || !(inst.is_load() || inst.is_store()) {
        return (inst, true);
    }

    match Lsu::access(&mut cpu.memory, &inst) {
        Ok(value) => inst.mem_result = value,
        Err(e) => {
            tracing::warn!(
                id = inst.id,
                pc = format_args!("{:#x}", inst.pc),
                "memory fault: {e}"
            );
            inst.mem_fault = true;
            return (inst, true);
        }
    }

    let op = if inst.is_load() {
        CacheOp::Read
    } else {
        CacheOp::Write
    };
    let hit = cpu.l1_d_cache.access(inst.mem_address, op);
    (inst, hit)
}
