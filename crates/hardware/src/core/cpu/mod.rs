//! CPU Context Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the simulation context every
//! operation receives. It holds:
//! 1. **Architectural State:** The integer register file and the program counter.
//! 2. **Memory Hierarchy:** The memory store plus the instruction and data cache models.
//! 3. **Accounting:** Statistics and the dynamic instruction numbering.
//!
//! The pipeline engine borrows a `Cpu` mutably for each cycle; the functional
//! step chain in [`execution`] runs directly on it.

/// Functional step chain shared by both execution models.
pub mod execution;

use crate::common::RegisterFile;
use crate::common::error::ConfigError;
use crate::config::Config;
use crate::core::units::cache::CacheSim;
use crate::soc::memory::MemoryStore;
use crate::stats::SimStats;

/// Label of the instruction cache in reports and errors.
pub const ICACHE_NAME: &str = "I-cache";
/// Label of the data cache in reports and errors.
pub const DCACHE_NAME: &str = "D-cache";

/// Simulation context: everything an instruction can read or write.
#[derive(Debug)]
pub struct Cpu {
    /// General Purpose Registers.
    pub regs: RegisterFile,
    /// Program Counter (next fetch address).
    pub pc: u64,
    /// Byte-addressable memory.
    pub memory: MemoryStore,
    /// L1 Instruction Cache.
    pub l1_i_cache: CacheSim,
    /// L1 Data Cache.
    pub l1_d_cache: CacheSim,
    /// Performance statistics.
    pub stats: SimStats,
    /// Identifier handed to the next decoded instruction.
    pub next_id: u64,
}

impl Cpu {
    /// Creates a CPU context over an already loaded memory store.
    ///
    /// # Arguments
    ///
    /// * `config` - Cache geometry and start PC.
    /// * `memory` - Memory store holding the program image.
    ///
    /// # Returns
    ///
    /// A context with zeroed registers, empty caches, and `pc == config.general.start_pc`.
    ///
    /// # Errors
    ///
    /// [`ConfigError`] when either cache geometry is invalid.
    pub fn new(config: &Config, memory: MemoryStore) -> Result<Self, ConfigError> {
        Ok(Self {
            regs: RegisterFile::new(),
            pc: config.general.start_pc,
            memory,
            l1_i_cache: CacheSim::new(ICACHE_NAME, &config.cache.l1_i)?,
            l1_d_cache: CacheSim::new(DCACHE_NAME, &config.cache.l1_d)?,
            stats: SimStats::default(),
            next_id: 0,
        })
    }

    /// Returns the next dynamic instruction identifier.
    pub fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Statistics with the cache counters filled in from the cache models.
    pub fn stats(&self) -> SimStats {
        SimStats {
            icache_hits: self.l1_i_cache.hits,
            icache_misses: self.l1_i_cache.misses,
            dcache_hits: self.l1_d_cache.hits,
            dcache_misses: self.l1_d_cache.misses,
            ..self.stats.clone()
        }
    }
}
