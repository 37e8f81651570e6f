//! Cache Model Tests.
//!
//! Verifies the address split, hit/miss accounting, and true-LRU replacement of
//! `CacheSim` and its per-set `LruSet`.

use proptest::prelude::*;
use rvpipe_core::common::{CacheOp, ConfigError};
use rvpipe_core::config::CacheConfig;
use rvpipe_core::core::units::cache::CacheSim;
use rvpipe_core::core::units::cache::lru::{LruSet, SetAccess};

fn cache(size: u64, block: u64, ways: u64) -> CacheSim {
    CacheSim::new("test", &CacheConfig::new(size, block, ways, 5)).unwrap()
}

// ══════════════════════════════════════════════════════════
// 1. Geometry
// ══════════════════════════════════════════════════════════

#[test]
fn geometry_from_config() {
    let c = cache(1024, 16, 2);
    assert_eq!(c.num_sets(), 32);
    assert_eq!(c.offset_bits(), 4);
    assert_eq!(c.index_bits(), 5);
    assert_eq!(c.miss_latency(), 5);
    assert_eq!(c.name(), "test");
}

#[test]
fn address_split() {
    let c = cache(1024, 16, 1);
    // 64 sets: offset bits 3:0, index bits 9:4, tag above.
    assert_eq!(c.locate(0x0000), (0, 0));
    assert_eq!(c.locate(0x000F), (0, 0));
    assert_eq!(c.locate(0x0010), (1, 0));
    assert_eq!(c.locate(0x03F0), (63, 0));
    assert_eq!(c.locate(0x0400), (0, 1));
}

#[test]
fn invalid_geometry_is_rejected() {
    let err = CacheSim::new("I-cache", &CacheConfig::new(1024, 12, 1, 5)).unwrap_err();
    assert!(matches!(err, ConfigError::NotPowerOfTwo { cache: "I-cache", .. }));
}

// ══════════════════════════════════════════════════════════
// 2. Hits and misses
// ══════════════════════════════════════════════════════════

#[test]
fn same_block_hits_after_first_miss() {
    let mut c = cache(1024, 16, 1);
    assert!(!c.access(0x100, CacheOp::Read), "cold miss");
    assert!(c.access(0x104, CacheOp::Read));
    assert!(c.access(0x10F, CacheOp::Write));
    assert!(!c.access(0x110, CacheOp::Read), "next block");
    assert_eq!((c.hits, c.misses), (2, 2));
}

#[test]
fn direct_mapped_conflict_evicts() {
    let mut c = cache(1024, 16, 1);
    assert!(!c.access(0x000, CacheOp::Read));
    assert!(!c.access(0x400, CacheOp::Read), "same set, different tag");
    assert!(!c.access(0x000, CacheOp::Read), "evicted by the conflict");
    assert!(!c.contains(0x400));
}

#[test]
fn writes_allocate_like_reads() {
    let mut c = cache(1024, 16, 1);
    assert!(!c.access(0x200, CacheOp::Write));
    assert!(c.contains(0x200));
    assert!(c.access(0x200, CacheOp::Read));
}

// ══════════════════════════════════════════════════════════
// 3. LRU replacement
// ══════════════════════════════════════════════════════════

#[test]
fn two_way_evicts_least_recently_used() {
    // 2 sets of 2 ways; blocks 0, 2, 4 (addresses 0x00, 0x20, 0x40) map to set 0.
    let mut c = cache(64, 16, 2);
    assert!(!c.access(0x00, CacheOp::Read));
    assert!(!c.access(0x20, CacheOp::Read));
    assert!(c.access(0x00, CacheOp::Read), "0x00 becomes MRU");
    assert!(!c.access(0x40, CacheOp::Read), "evicts 0x20, the LRU");
    assert!(c.contains(0x00));
    assert!(!c.contains(0x20));
    assert!(c.contains(0x40));
    assert_eq!(c.set_tags(0), vec![0, 2], "LRU first");
}

#[test]
fn contains_does_not_touch_recency() {
    let mut c = cache(64, 16, 2);
    let _ = c.access(0x00, CacheOp::Read);
    let _ = c.access(0x20, CacheOp::Read);
    assert!(c.contains(0x00));
    let _ = c.access(0x40, CacheOp::Read);
    assert!(!c.contains(0x00), "0x00 was still LRU");
    assert_eq!((c.hits, c.misses), (0, 3));
}

#[test]
fn lru_set_reports_evictions() {
    let mut set = LruSet::new(2);
    assert!(set.is_empty());
    assert_eq!(set.access(7), SetAccess::Miss { evicted: None });
    assert_eq!(set.access(8), SetAccess::Miss { evicted: None });
    assert_eq!(set.access(7), SetAccess::Hit);
    assert_eq!(set.access(9), SetAccess::Miss { evicted: Some(8) });
    assert_eq!(set.tags().collect::<Vec<_>>(), vec![7, 9]);
    assert_eq!(set.len(), 2);
}

proptest! {
    #[test]
    fn sets_never_exceed_associativity(
        ways in prop::sample::select(vec![1_u64, 2, 4, 8]),
        addrs in prop::collection::vec(0_u64..0x4000, 1..200),
    ) {
        let mut c = cache(256, 16, ways);
        for &a in &addrs {
            let _ = c.access(a, CacheOp::Read);
        }
        for index in 0..c.num_sets() {
            prop_assert!(c.set_tags(index).len() as u64 <= ways);
        }
        prop_assert_eq!(c.hits + c.misses, addrs.len() as u64);
    }

    #[test]
    fn last_access_is_always_resident(addrs in prop::collection::vec(any::<u32>(), 1..100)) {
        let mut c = cache(128, 16, 2);
        for &a in &addrs {
            let _ = c.access(u64::from(a), CacheOp::Read);
            prop_assert!(c.contains(u64::from(a)));
        }
    }
}
