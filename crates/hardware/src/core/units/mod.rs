//! Execution units.
//!
//! Stateless units shared by the functional path and the pipeline stages, plus
//! the cache model consulted by fetch and memory access.

/// Arithmetic Logic Unit for integer operations.
pub mod alu;

/// Branch Resolution Unit (next-PC computation).
pub mod bru;

/// Set-associative instruction and data cache model.
pub mod cache;

/// Load/Store Unit: address generation and memory access.
pub mod lsu;
