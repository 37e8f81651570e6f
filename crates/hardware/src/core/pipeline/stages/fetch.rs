//! Instruction Fetch (IF) Stage.
//!
//! This module implements the first stage of the instruction pipeline. It reads
//! the word at the current program counter, queries the instruction cache, and
//! advances the PC sequentially. Redirects are applied by the engine before the
//! stage runs; there is no prediction.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::data::CacheOp;
use crate::core::Cpu;
use crate::isa::instruction::{Instruction, StageStatus};

/// Executes the instruction fetch stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
/// * `status` - [`StageStatus::Speculative`] when fetching behind a branch that
///   is still unresolved or is redirecting fetch this cycle (taken branch, jump,
///   or exception), [`StageStatus::Normal`] otherwise.
///
/// # Returns
///
/// The fetched (undecoded) record and whether the instruction cache hit.
pub fn fetch_stage(cpu: &mut Cpu, status: StageStatus) -> (Instruction, bool) {
    let pc = cpu.pc;
    let raw = cpu.fetch_word(pc);
    let hit = cpu.l1_i_cache.access(pc, CacheOp::Read);
    cpu.pc = pc.wrapping_add(INSTRUCTION_SIZE);
    tracing::trace!(pc = format_args!("{pc:#x}"), hit, "IF {raw:#010x}{}", status.label());
    (Instruction::fetched(pc, raw, status), hit)
}
