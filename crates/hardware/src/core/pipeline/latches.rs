//! Pipeline slots.
//!
//! The five-stage pipeline keeps exactly one [`Instruction`] record per stage.
//! After a cycle each slot holds the record that stage processed during that
//! cycle; on the next cycle the record moves one slot down. Records are moved,
//! never shared.

use crate::isa::instruction::Instruction;

/// One record per pipeline stage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipeState {
    /// Instruction Fetch.
    pub if_: Instruction,
    /// Instruction Decode.
    pub id: Instruction,
    /// Execute.
    pub ex: Instruction,
    /// Memory access.
    pub mem: Instruction,
    /// Writeback.
    pub wb: Instruction,
}

impl PipeState {
    /// Stage names in pipeline order.
    pub const STAGE_NAMES: [&'static str; 5] = ["IF", "ID", "EX", "MEM", "WB"];

    /// Slots in pipeline order (IF first).
    pub const fn stages(&self) -> [&Instruction; 5] {
        [&self.if_, &self.id, &self.ex, &self.mem, &self.wb]
    }
}

/// Pipeline state at the end of a cycle, the unit exported for reporting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipeSnapshot {
    /// Cycle number (0 for the first cycle simulated).
    pub cycle: u64,
    /// Slot contents.
    pub state: PipeState,
}
