//! Set-Associative Cache Model.
//!
//! This module models the timing-relevant behaviour of the instruction and data
//! caches. It provides:
//! 1. **Address Split:** Block offset, set index, and tag derived from the configured geometry.
//! 2. **Replacement:** True LRU per set (see [`lru`]).
//! 3. **Accounting:** Hit and miss counters.
//!
//! Only tags are tracked. Data always comes from the memory store, and there is
//! no dirty state, so reads and writes behave identically.

/// Per-set LRU tag stack.
pub mod lru;

use self::lru::{LruSet, SetAccess};
use crate::common::data::CacheOp;
use crate::common::error::ConfigError;
use crate::config::CacheConfig;

/// Cache simulator for one cache level.
#[derive(Clone, Debug)]
pub struct CacheSim {
    name: &'static str,
    config: CacheConfig,
    offset_bits: u32,
    index_bits: u32,
    sets: Vec<LruSet>,
    /// Number of accesses that found their block resident.
    pub hits: u64,
    /// Number of accesses that had to install their block.
    pub misses: u64,
}

impl CacheSim {
    /// Creates an empty cache after validating its geometry.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in errors, traces, and the cache report (`"I-cache"`).
    /// * `config` - Size, block size, associativity, and miss latency.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] reported by [`CacheConfig::validate`].
    pub fn new(name: &'static str, config: &CacheConfig) -> Result<Self, ConfigError> {
        config.validate(name)?;
        let num_sets = config.num_sets();
        Ok(Self {
            name,
            config: *config,
            offset_bits: config.block_bytes.trailing_zeros(),
            index_bits: num_sets.trailing_zeros(),
            sets: (0..num_sets).map(|_| LruSet::new(config.ways as usize)).collect(),
            hits: 0,
            misses: 0,
        })
    }

    /// Label given at construction.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Geometry this cache was built with.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Stall cycles charged for a miss.
    pub const fn miss_latency(&self) -> u64 {
        self.config.miss_latency
    }

    /// Number of block-offset bits.
    pub const fn offset_bits(&self) -> u32 {
        self.offset_bits
    }

    /// Number of set-index bits.
    pub const fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Splits an address into `(set index, tag)`.
    pub const fn locate(&self, addr: u64) -> (usize, u64) {
        let block = addr >> self.offset_bits;
        let index_mask = (1u64 << self.index_bits) - 1;
        ((block & index_mask) as usize, block >> self.index_bits)
    }

    /// Presents one access to the cache.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address of the access.
    /// * `op` - Read or write; both update recency the same way.
    ///
    /// # Returns
    ///
    /// `true` on a hit, `false` on a miss (the block is installed either way).
    pub fn access(&mut self, addr: u64, op: CacheOp) -> bool {
        let (index, tag) = self.locate(addr);
        match self.sets[index].access(tag) {
            SetAccess::Hit => {
                self.hits += 1;
                tracing::debug!(set = index, "{} hit at {addr:#x} ({op:?})", self.name);
                true
            }
            SetAccess::Miss { evicted } => {
                self.misses += 1;
                tracing::debug!(
                    set = index,
                    evicted = ?evicted,
                    "{} miss at {addr:#x} ({op:?})",
                    self.name
                );
                false
            }
        }
    }

    /// `true` if the block holding `addr` is resident. Does not touch recency or counters.
    pub fn contains(&self, addr: u64) -> bool {
        let (index, tag) = self.locate(addr);
        self.sets[index].contains(tag)
    }

    /// Resident tags of set `index`, least recently used first.
    pub fn set_tags(&self, index: usize) -> Vec<u64> {
        self.sets
            .get(index)
            .map(|s| s.tags().collect())
            .unwrap_or_default()
    }

    /// Number of sets.
    pub fn num_sets(&self) -> usize {
        self.sets.len()
    }

    /// Associativity.
    pub const fn ways(&self) -> u64 {
        self.config.ways
    }
}
