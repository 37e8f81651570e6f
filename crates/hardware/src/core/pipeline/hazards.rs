//! Data Hazard Detection and Forwarding.
//!
//! This module implements the logic for keeping the pipeline consistent when data
//! dependencies exist between in-flight instructions. It provides:
//! 1. **Hazard Detection:** Identifies load-use hazards that require a one-cycle stall.
//! 2. **Operand Forwarding:** Resolves read-after-write hazards by bypassing the register file.
//! 3. **Store Data Forwarding:** Refreshes a store's data operand from the record retiring in WB.
//! 4. **Control Readiness:** Decides when a branch or JALR held in ID can resolve.

use crate::isa::instruction::Instruction;

/// Stage a forwarded value is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardSource {
    /// The record that finished MEM this cycle. Only arithmetic results are
    /// available here; a load's value arrives one cycle later.
    Memory,
    /// The record that retired this cycle; arithmetic and loaded values both qualify.
    Writeback,
}

/// Checks if a pipeline stall is needed due to a load-use data hazard.
///
/// A load-use hazard occurs when the record now in MEM is a load whose
/// destination the record waiting in ID reads. Stores only conflict through
/// their address register (`rs1`); their data operand is refreshed in MEM
/// instead. Control-flow instructions never stall here because they resolve
/// in ID with their own readiness check.
///
/// # Arguments
///
/// * `mem` - The record that completed the memory stage this cycle.
/// * `id` - The record waiting in decode to enter execute.
///
/// # Returns
///
/// `true` if a bubble must be inserted into EX.
///
/// # Examples
///
/// ```
/// use rvpipe_core::core::pipeline::hazards::load_use_hazard;
/// use rvpipe_core::isa::decode;
///
/// let load = decode(0x0, 0x0001_3083); // ld ra, 0(sp)
/// let add = decode(0x4, 0x0010_81b3); // add gp, ra, ra
/// assert!(load_use_hazard(&load, &add));
/// ```
pub fn load_use_hazard(mem: &Instruction, id: &Instruction) -> bool {
    if !id.is_live() || id.is_control() {
        return false;
    }
    if !mem.is_load() {
        return false;
    }
    let Some(rd) = mem.dest() else {
        return false;
    };
    if id.is_store() {
        id.ctrl.reads_rs1 && id.rs1 == rd
    } else {
        id.reads(rd)
    }
}

/// Forwards the producer's result into the consumer's operands.
///
/// Matching is on the producer's destination register against the consumer's
/// `rs1`/`rs2`, for the operands the consumer actually reads.
///
/// # Arguments
///
/// * `inst` - Consumer whose `op1`/`op2` are refreshed.
/// * `producer` - Older record that may write a register the consumer reads.
/// * `source` - Stage the producer sits in; decides whether a load result is usable.
///
/// # Returns
///
/// `true` if at least one operand was replaced.
pub fn forward_operands(
    inst: &mut Instruction,
    producer: &Instruction,
    source: ForwardSource,
) -> bool {
    if !inst.is_live() {
        return false;
    }
    if source == ForwardSource::Memory && producer.is_load() {
        return false;
    }
    let Some(rd) = producer.dest() else {
        return false;
    };
    let value = producer.result();
    let mut forwarded = false;
    if inst.ctrl.reads_rs1 && inst.rs1 == rd {
        inst.op1 = value;
        forwarded = true;
    }
    if inst.ctrl.reads_rs2 && inst.rs2 == rd {
        inst.op2 = value;
        forwarded = true;
    }
    if forwarded {
        tracing::trace!(
            id = inst.id,
            from = producer.id,
            "forward x{rd} = {value:#x} from {source:?}"
        );
    }
    forwarded
}

/// Refreshes a store's data operand from the record retiring in WB.
///
/// Covers a load immediately followed by a store of the loaded value, which
/// does not stall.
///
/// # Returns
///
/// `true` if `op2` was replaced.
pub fn forward_store_data(store: &mut Instruction, wb: &Instruction) -> bool {
    if !store.is_live() || !store.is_store() {
        return false;
    }
    match wb.dest() {
        Some(rd) if rd == store.rs2 => {
            store.op2 = wb.result();
            tracing::trace!(id = store.id, from = wb.id, "forward store data x{rd}");
            true
        }
        _ => false,
    }
}

/// Decides whether a branch or JALR held in ID can resolve this cycle.
///
/// Resolution waits while a source register is produced by the record executed
/// this cycle, or by a load that has only just completed MEM.
///
/// # Arguments
///
/// * `id` - The control-flow record held in decode.
/// * `ex` - The record that executed this cycle.
/// * `mem` - The record that completed the memory stage this cycle.
///
/// # Returns
///
/// `true` when every source operand can be obtained by forwarding.
pub fn control_ready(id: &Instruction, ex: &Instruction, mem: &Instruction) -> bool {
    let blocks = |producer: &Instruction, loads_only: bool| {
        producer
            .dest()
            .is_some_and(|rd| id.reads(rd) && (!loads_only || producer.is_load()))
    };
    !blocks(ex, false) && !blocks(mem, true)
}
