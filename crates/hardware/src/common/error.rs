//! Error Types.
//!
//! This module defines the error values surfaced by the simulator. It provides:
//! 1. **Memory Errors:** Out-of-range and malformed accesses to the memory store.
//! 2. **Configuration Errors:** Invalid cache or memory geometry rejected before a run.
//! 3. **Simulation Errors:** Aggregate error for loading images and writing reports.
//!
//! Illegal instructions are not errors: they travel through the pipeline as data on
//! the instruction record (see `isa::instruction::Instruction::is_legal`).

use thiserror::Error;

/// Failure of a single memory store access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// The access touches at least one byte outside the backing store.
    #[error("memory access out of bounds: {size} bytes at {addr:#x}")]
    OutOfBounds {
        /// First byte address of the access.
        addr: u64,
        /// Width of the access in bytes.
        size: u64,
    },
    /// The requested width is not 1, 2, 4 or 8 bytes.
    #[error("unsupported access width of {0} bytes")]
    UnsupportedWidth(u64),
}

/// Invalid simulator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A geometry parameter that must be non-zero is zero.
    #[error("{cache}: {field} must be non-zero")]
    Zero {
        /// Name of the cache (or memory) being configured.
        cache: &'static str,
        /// Offending field.
        field: &'static str,
    },
    /// A geometry parameter that must be a power of two is not.
    #[error("{cache}: {field} = {value} is not a power of two")]
    NotPowerOfTwo {
        /// Name of the cache being configured.
        cache: &'static str,
        /// Offending field.
        field: &'static str,
        /// Supplied value.
        value: u64,
    },
    /// A size or count is above what the simulator will allocate.
    #[error("{cache}: {field} = {value} exceeds the limit of {max}")]
    TooLarge {
        /// Name of the cache (or memory) being configured.
        cache: &'static str,
        /// Offending field.
        field: &'static str,
        /// Supplied value.
        value: u64,
        /// Largest accepted value.
        max: u64,
    },
    /// Total size is not an exact multiple of `block_bytes * ways`.
    #[error("{cache}: size {size} is not a multiple of block_bytes * ways ({set_bytes})")]
    Geometry {
        /// Name of the cache being configured.
        cache: &'static str,
        /// Total size in bytes.
        size: u64,
        /// Bytes per set.
        set_bytes: u64,
    },
    /// The memory dump range is empty or reversed.
    #[error("memory dump range {start:#x}..{end:#x} is empty")]
    DumpRange {
        /// First address.
        start: u64,
        /// End address (exclusive).
        end: u64,
    },
    /// A textual parameter could not be parsed.
    #[error("cannot parse {what}: {detail}")]
    Parse {
        /// What was being parsed.
        what: &'static str,
        /// Parser diagnostic.
        detail: String,
    },
}

/// Errors raised while preparing or reporting a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Memory store failure while loading an image.
    #[error(transparent)]
    Memory(#[from] MemoryError),
    /// File system failure.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// Path that was being read or written.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed JSON configuration.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// Wraps an I/O error together with the path it concerns.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
