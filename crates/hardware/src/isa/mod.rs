//! Instruction Set Architecture (ISA) Definitions.
//!
//! Contains the RV64I encodings, the instruction record that flows through the
//! pipeline, and the decode and disassembly logic.
//!
//! # Modules
//!
//! * `rv64i`: Base integer opcodes and function codes.
//! * `instruction`: Field extraction and the per-slot instruction record.
//! * `decode`: Legality table, classification flags, and immediate reassembly.
//! * `disasm`: Text rendering used by the pipeline-state report.
//! * `abi`: Register name table.

/// Application Binary Interface (ABI) register names.
pub mod abi;

/// Instruction decoding: legality, classification, immediates.
pub mod decode;

/// Instruction disassembler for reports and traces.
pub mod disasm;

/// Instruction fields and the instruction record.
pub mod instruction;

/// Base integer instruction set (64-bit RISC-V core instructions).
pub mod rv64i;

pub use decode::decode;
pub use instruction::{ControlSignals, Instruction, InstructionBits, StageStatus};
