//! Common utilities and types used throughout the pipeline simulator.
//!
//! This module provides the building blocks shared by every other component:
//! 1. **Bit Fields:** Range extraction and sign extension for instruction words and values.
//! 2. **Constants:** Sentinel encodings, the exception vector, and memory geometry.
//! 3. **Memory Access:** Access widths and cache operation kinds.
//! 4. **Error Handling:** Memory, configuration, and simulation error types.
//! 5. **Register Management:** The architectural integer register file.

/// Bit-field extraction and sign extension.
pub mod bits;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access width and cache operation definitions.
pub mod data;

/// Error types for memory, configuration, and simulation failures.
pub mod error;

/// Register file implementation.
pub mod reg;

pub use bits::{extract_bits, sign_extend32, sign_extend64};
pub use data::{AccessSize, CacheOp};
pub use error::{ConfigError, MemoryError, SimError};
pub use reg::RegisterFile;
