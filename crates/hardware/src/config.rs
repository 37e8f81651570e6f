//! Configuration for the pipeline simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline memory geometry and cache parameters.
//! 2. **Structures:** `general`, `memory`, and `cache` sections of a `Config`.
//! 3. **Validation:** Geometry checks performed before any state is built.
//!
//! Configuration is read from JSON (`Config::from_json`); every field has a
//! default, so `{}` is a valid file. The CLI layers its flags on top.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::common::constants;
use crate::common::error::{ConfigError, SimError};

/// Default configuration constants for the simulator.
mod defaults {
    use crate::common::constants;

    /// Memory base address.
    pub const MEMORY_BASE: u64 = constants::MEMORY_BASE;

    /// Memory size in bytes (64 KiB).
    pub const MEMORY_SIZE: u64 = constants::MEMORY_SIZE;

    /// First address printed by the memory dump.
    pub const DUMP_START: u64 = constants::DUMP_START;

    /// End of the memory dump (exclusive).
    pub const DUMP_END: u64 = constants::DUMP_END;

    /// Default cache size in bytes (1 KiB).
    pub const CACHE_SIZE: u64 = 1024;

    /// Default block size in bytes.
    pub const CACHE_BLOCK: u64 = 16;

    /// Default associativity (direct-mapped).
    pub const CACHE_WAYS: u64 = 1;

    /// Default miss latency in cycles.
    pub const CACHE_MISS_LATENCY: u64 = 5;

    pub const fn memory_base() -> u64 {
        MEMORY_BASE
    }

    pub const fn memory_size() -> u64 {
        MEMORY_SIZE
    }

    pub const fn dump_start() -> u64 {
        DUMP_START
    }

    pub const fn dump_end() -> u64 {
        DUMP_END
    }
}

/// Execution model used for a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// One instruction at a time, no timing.
    Functional,
    /// Five-stage pipeline with hazards and cache stalls.
    #[default]
    Pipelined,
}

/// Root configuration structure.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Run-wide settings.
    pub general: GeneralConfig,
    /// Memory store geometry and reporting range.
    pub memory: MemoryConfig,
    /// Instruction and data cache parameters.
    pub cache: CacheHierarchyConfig,
}

/// Run-wide settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Execution model.
    pub mode: RunMode,
    /// Address of the first instruction.
    pub start_pc: u64,
}

/// Memory store geometry and reporting range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Lowest valid address.
    #[serde(default = "defaults::memory_base")]
    pub base: u64,
    /// Size in bytes.
    #[serde(default = "defaults::memory_size")]
    pub size: u64,
    /// First address of the memory dump.
    #[serde(default = "defaults::dump_start")]
    pub dump_start: u64,
    /// End of the memory dump (exclusive).
    #[serde(default = "defaults::dump_end")]
    pub dump_end: u64,
    /// Optional text file of `address value` pairs applied after the image loads.
    pub init_image: Option<PathBuf>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            base: defaults::MEMORY_BASE,
            size: defaults::MEMORY_SIZE,
            dump_start: defaults::DUMP_START,
            dump_end: defaults::DUMP_END,
            init_image: None,
        }
    }
}

/// Instruction and data cache parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheHierarchyConfig {
    /// Instruction cache.
    pub l1_i: CacheConfig,
    /// Data cache.
    pub l1_d: CacheConfig,
}

/// Geometry and timing of one cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Total capacity in bytes.
    pub size_bytes: u64,
    /// Block (line) size in bytes.
    pub block_bytes: u64,
    /// Associativity.
    pub ways: u64,
    /// Stall cycles charged on a miss.
    pub miss_latency: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            block_bytes: defaults::CACHE_BLOCK,
            ways: defaults::CACHE_WAYS,
            miss_latency: defaults::CACHE_MISS_LATENCY,
        }
    }
}

impl CacheConfig {
    /// Builds a cache configuration.
    pub const fn new(size_bytes: u64, block_bytes: u64, ways: u64, miss_latency: u64) -> Self {
        Self {
            size_bytes,
            block_bytes,
            ways,
            miss_latency,
        }
    }

    /// Parses the `SIZE,BLOCK,WAYS,LATENCY` form used on the command line.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] unless the text is four comma-separated integers.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvpipe_core::config::CacheConfig;
    ///
    /// let c = CacheConfig::parse_spec("2048,32,4,10").unwrap();
    /// assert_eq!(c, CacheConfig::new(2048, 32, 4, 10));
    /// ```
    pub fn parse_spec(text: &str) -> Result<Self, ConfigError> {
        let fields = text
            .split(',')
            .map(|f| f.trim().parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ConfigError::Parse {
                what: "cache spec",
                detail: format!("{text:?}: {e}"),
            })?;
        match fields.as_slice() {
            &[size, block, ways, latency] => Ok(Self::new(size, block, ways, latency)),
            _ => Err(ConfigError::Parse {
                what: "cache spec",
                detail: format!("{text:?}: expected SIZE,BLOCK,WAYS,LATENCY"),
            }),
        }
    }

    /// Number of sets implied by the geometry (`size / (block * ways)`).
    pub const fn num_sets(&self) -> u64 {
        let set_bytes = self.block_bytes.saturating_mul(self.ways);
        if set_bytes == 0 {
            0
        } else {
            self.size_bytes / set_bytes
        }
    }

    /// Checks that the geometry describes a realizable cache.
    ///
    /// Size, block size, and ways must be non-zero; block size and the derived set
    /// count must be powers of two; size must be an exact multiple of
    /// `block_bytes * ways`. Size, ways, and sets are capped by the
    /// `MAX_CACHE_*` constants.
    ///
    /// # Errors
    ///
    /// The first violated rule, labelled with `cache`.
    pub fn validate(&self, cache: &'static str) -> Result<(), ConfigError> {
        for (field, value) in [
            ("size_bytes", self.size_bytes),
            ("block_bytes", self.block_bytes),
            ("ways", self.ways),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { cache, field });
            }
        }
        for (field, value, max) in [
            ("size_bytes", self.size_bytes, constants::MAX_CACHE_SIZE),
            ("ways", self.ways, constants::MAX_CACHE_WAYS),
        ] {
            if value > max {
                return Err(ConfigError::TooLarge {
                    cache,
                    field,
                    value,
                    max,
                });
            }
        }
        if !self.block_bytes.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                cache,
                field: "block_bytes",
                value: self.block_bytes,
            });
        }
        let set_bytes = self.block_bytes.saturating_mul(self.ways);
        if self.size_bytes % set_bytes != 0 || self.size_bytes < set_bytes {
            return Err(ConfigError::Geometry {
                cache,
                size: self.size_bytes,
                set_bytes,
            });
        }
        let sets = self.num_sets();
        if sets > constants::MAX_CACHE_SETS {
            return Err(ConfigError::TooLarge {
                cache,
                field: "sets",
                value: sets,
                max: constants::MAX_CACHE_SETS,
            });
        }
        if !sets.is_power_of_two() {
            return Err(ConfigError::NotPowerOfTwo {
                cache,
                field: "sets",
                value: sets,
            });
        }
        Ok(())
    }
}

impl Config {
    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// [`SimError::Json`] for malformed input; the result is not validated.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`SimError::Io`] if the file cannot be read, [`SimError::Json`] if it does not parse.
    pub fn from_file(path: &std::path::Path) -> Result<Self, SimError> {
        let text =
            std::fs::read_to_string(path).map_err(|e| SimError::io(path.display().to_string(), e))?;
        Self::from_json(&text)
    }

    /// Validates cache geometry, memory size (non-zero and at most
    /// [`constants::MAX_MEMORY_SIZE`]), and the dump range.
    ///
    /// # Errors
    ///
    /// The first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.cache.l1_i.validate("I-cache")?;
        self.cache.l1_d.validate("D-cache")?;
        if self.memory.size == 0 {
            return Err(ConfigError::Zero {
                cache: "memory",
                field: "size",
            });
        }
        if self.memory.size > constants::MAX_MEMORY_SIZE {
            return Err(ConfigError::TooLarge {
                cache: "memory",
                field: "size",
                value: self.memory.size,
                max: constants::MAX_MEMORY_SIZE,
            });
        }
        if self.memory.dump_end <= self.memory.dump_start {
            return Err(ConfigError::DumpRange {
                start: self.memory.dump_start,
                end: self.memory.dump_end,
            });
        }
        Ok(())
    }
}
