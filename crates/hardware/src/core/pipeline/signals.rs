//! Pipeline control signals.
//!
//! This module holds the cross-stage state the engine carries from one cycle to
//! the next. It tracks:
//! 1. **Stall Counters:** Outstanding instruction-fetch and data-cache miss cycles.
//! 2. **Control Flow:** A branch or JALR waiting in ID, and the pending fetch redirect.
//! 3. **Exceptions:** The sticky exception flag and the halted fetch unit.

/// Cross-stage control state of the pipeline.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineControl {
    /// Remaining cycles of an instruction-cache miss; ID receives bubbles meanwhile.
    pub fetch_stall: u64,
    /// Remaining cycles of a data-cache miss; the whole pipeline is frozen meanwhile.
    pub mem_stall: u64,
    /// The record held in ID is a branch or JALR whose operands are not yet available.
    pub control_pending: bool,
    /// Fetch address to switch to when ID next advances.
    pub redirect: Option<u64>,
    /// An illegal instruction or memory fault has been taken.
    pub exception_raised: bool,
    /// A halt has been decoded; IF idles until a redirect.
    pub fetch_halted: bool,
}
