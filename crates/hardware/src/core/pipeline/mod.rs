//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Engine:** The per-cycle controller and the budgeted run loop.
//! 2. **Hazards:** Load-use detection, operand forwarding, and branch readiness.
//! 3. **Latches:** The per-stage slots and the exported snapshot.
//! 4. **Signals:** Stall counters, pending redirect, and the sticky exception flag.
//! 5. **Stages:** Fetch, Decode, Execute, Memory, and Writeback.

/// Per-cycle pipeline controller.
pub mod engine;

/// Pipeline hazard detection and forwarding logic.
pub mod hazards;

/// Pipeline slots and snapshots.
pub mod latches;

/// Cross-stage control state.
pub mod signals;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;

pub use engine::Pipeline;
pub use latches::{PipeSnapshot, PipeState};
