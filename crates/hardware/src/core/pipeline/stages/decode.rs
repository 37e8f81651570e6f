//! Instruction Decode (ID) Stage.
//!
//! This module implements the second stage of the instruction pipeline. It
//! decodes the fetched word, assigns the dynamic instruction number, reads the
//! register operands, and resolves JAL. Branches and JALR are resolved later by
//! the engine once their operands are available.

use crate::core::Cpu;
use crate::core::cpu::execution::collect_operands;
use crate::core::units::bru::Bru;
use crate::isa::decode;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::{Instruction, StageStatus};
use crate::isa::rv64i::opcodes;

/// Executes the instruction decode stage of the pipeline.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state (registers and id counter).
/// * `fetched` - Record produced by the fetch stage.
///
/// # Returns
///
/// The decoded record with status [`StageStatus::Normal`], operands read from
/// the register file, and `next_pc` set to the fall-through address (or the
/// jump target for JAL). Non-fetched slots are returned unchanged.
pub fn decode_stage(cpu: &mut Cpu, fetched: Instruction) -> Instruction {
    if !matches!(fetched.status, StageStatus::Normal | StageStatus::Speculative) {
        return fetched;
    }

    let mut inst = decode(fetched.pc, fetched.raw);
    inst.id = cpu.take_id();
    collect_operands(&mut inst, &cpu.regs);
    if inst.ctrl.legal && inst.opcode == opcodes::OP_JAL {
        inst.next_pc = Bru::next_pc(&inst);
    }
    tracing::trace!(
        id = inst.id,
        pc = format_args!("{:#x}", inst.pc),
        "ID {}",
        disassemble(inst.raw)
    );
    inst
}
