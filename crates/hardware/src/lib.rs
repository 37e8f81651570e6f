//! RV64I pipeline simulator library.
//!
//! This crate implements a 64-bit RISC-V (RV64I) simulator with two execution models:
//! 1. **Functional:** One instruction at a time, the architectural reference.
//! 2. **Pipelined:** A cycle-driven five-stage pipeline with load-use stalls,
//!    forwarding, branch resolution in decode, and cache-miss stalls.
//!
//! Around the core it provides the decoder and disassembler, set-associative
//! LRU cache models, a bounds-checked memory store, configuration, statistics,
//! and the end-of-run reports.
//!
//! ```
//! use rvpipe_core::{Config, MemoryStore, RunStatus, Simulator};
//! use rvpipe_core::config::RunMode;
//!
//! let mut memory = MemoryStore::new(0, 0x1000);
//! memory
//!     .load_words(0, &[0x0050_0093, 0x0070_0113, 0x0020_81b3, 0xFEED_FEED])
//!     .unwrap();
//!
//! let mut config = Config::default();
//! config.general.mode = RunMode::Functional;
//! let mut sim = Simulator::new(&config, memory).unwrap();
//! assert_eq!(sim.run_till_halt(), RunStatus::Halt);
//! assert_eq!(sim.cpu.regs.read(3), 12);
//! ```

/// Common types and constants (bit fields, errors, register file, access widths).
pub mod common;
/// Simulator configuration (defaults, run mode, memory and cache geometry).
pub mod config;
/// CPU core (context, functional step chain, pipeline, execution units).
pub mod core;
/// Instruction set (decode, instruction record, disassembly, ABI names, RV64I encodings).
pub mod isa;
/// Simulator driver, program loader, and reports.
pub mod sim;
/// Memory store and initial image files.
pub mod soc;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// CPU context; holds registers, memory, caches, and stats.
pub use crate::core::Cpu;
/// Outcome of a run.
pub use crate::core::RunStatus;
/// Top-level simulator owning the CPU and the pipeline.
pub use crate::sim::Simulator;
/// Byte-addressable memory store.
pub use crate::soc::MemoryStore;
