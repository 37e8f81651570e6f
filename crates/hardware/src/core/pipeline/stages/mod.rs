//! Pipeline stage implementations.
//!
//! This module contains the individual implementations for the five stages of the
//! instruction pipeline. Each stage is a total function over one [`Instruction`]
//! record: bubbles, idle slots, and squashed records pass through untouched.
//! 1. **Fetch:** Reads the word at the PC through the instruction cache.
//! 2. **Decode:** Decodes the word, numbers it, and reads register operands.
//! 3. **Execute:** ALU results and effective addresses.
//! 4. **Memory:** Loads and stores through the data cache.
//! 5. **Writeback:** Commits results to the register file.
//!
//! [`Instruction`]: crate::isa::instruction::Instruction

/// Instruction decode stage implementation.
pub mod decode;

/// Instruction execute stage implementation.
pub mod execute;

/// Instruction fetch stage implementation.
pub mod fetch;

/// Memory access stage implementation.
pub mod memory;

/// Writeback stage implementation.
pub mod writeback;

/// Decode stage entry point (ID stage).
pub use decode::decode_stage;
/// Execute stage entry point (EX stage).
pub use execute::execute_stage;
/// Fetch stage entry point (IF stage).
pub use fetch::fetch_stage;
/// Memory stage entry point (MEM stage).
pub use memory::mem_stage;
/// Writeback stage entry point (WB stage).
pub use writeback::wb_stage;
