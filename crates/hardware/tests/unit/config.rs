//! Configuration Tests.
//!
//! Covers the defaults, JSON parsing with partial documents, the command-line
//! cache spec, and geometry validation.

use pretty_assertions::assert_eq;
use rstest::rstest;
use rvpipe_core::common::constants::{MAX_CACHE_SIZE, MAX_MEMORY_SIZE};
use rvpipe_core::common::{ConfigError, SimError};
use rvpipe_core::config::{CacheConfig, Config, RunMode};

// ══════════════════════════════════════════════════════════
// 1. Defaults and JSON
// ══════════════════════════════════════════════════════════

#[test]
fn defaults_are_valid() {
    let config = Config::default();
    assert_eq!(config.general.mode, RunMode::Pipelined);
    assert_eq!(config.general.start_pc, 0);
    assert_eq!(config.memory.size, 0x1_0000);
    assert_eq!(config.cache.l1_i, CacheConfig::new(1024, 16, 1, 5));
    assert!(config.validate().is_ok());
}

#[test]
fn empty_json_yields_defaults() {
    let config = Config::from_json("{}").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn partial_json_keeps_remaining_defaults() {
    let config = Config::from_json(
        r#"{ "general": { "mode": "functional" }, "cache": { "l1_d": { "ways": 2 } } }"#,
    )
    .unwrap();
    assert_eq!(config.general.mode, RunMode::Functional);
    assert_eq!(config.cache.l1_d, CacheConfig::new(1024, 16, 2, 5));
    assert_eq!(config.cache.l1_i, CacheConfig::default());
    assert_eq!(config.memory.dump_end, 0x1F4);
}

#[test]
fn malformed_json_is_rejected() {
    let err = Config::from_json("{ general: ").unwrap_err();
    assert!(matches!(err, SimError::Json(_)), "{err:?}");
}

#[test]
fn config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sim.json");
    let mut config = Config::default();
    config.cache.l1_i = CacheConfig::new(2048, 32, 4, 10);
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

    assert_eq!(Config::from_file(&path).unwrap(), config);
}

#[test]
fn missing_config_file_reports_path() {
    let err = Config::from_file(std::path::Path::new("/nonexistent/sim.json")).unwrap_err();
    assert!(err.to_string().contains("/nonexistent/sim.json"), "{err}");
}

// ══════════════════════════════════════════════════════════
// 2. Cache spec parsing
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("1024,16,1,5", CacheConfig::new(1024, 16, 1, 5))]
#[case("2048, 32, 4, 0", CacheConfig::new(2048, 32, 4, 0))]
fn parses_cache_spec(#[case] text: &str, #[case] expected: CacheConfig) {
    assert_eq!(CacheConfig::parse_spec(text).unwrap(), expected);
}

#[rstest]
#[case("1024,16,1")]
#[case("1024,16,1,5,7")]
#[case("1k,16,1,5")]
#[case("")]
fn rejects_malformed_cache_spec(#[case] text: &str) {
    assert!(matches!(
        CacheConfig::parse_spec(text),
        Err(ConfigError::Parse { .. })
    ));
}

// ══════════════════════════════════════════════════════════
// 3. Geometry validation
// ══════════════════════════════════════════════════════════

#[test]
fn zero_fields_are_rejected() {
    let err = CacheConfig::new(1024, 16, 0, 5).validate("D-cache").unwrap_err();
    assert_eq!(
        err,
        ConfigError::Zero {
            cache: "D-cache",
            field: "ways"
        }
    );
}

#[test]
fn block_size_must_be_power_of_two() {
    let err = CacheConfig::new(1536, 24, 1, 5).validate("I-cache").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NotPowerOfTwo {
            field: "block_bytes",
            value: 24,
            ..
        }
    ));
}

#[test]
fn size_must_be_multiple_of_set_bytes() {
    let err = CacheConfig::new(1000, 16, 2, 5).validate("I-cache").unwrap_err();
    assert!(matches!(err, ConfigError::Geometry { size: 1000, set_bytes: 32, .. }));
}

#[test]
fn size_smaller_than_one_set_is_rejected() {
    let err = CacheConfig::new(16, 16, 2, 5).validate("I-cache").unwrap_err();
    assert!(matches!(err, ConfigError::Geometry { .. }));
}

#[test]
fn set_count_must_be_power_of_two() {
    let err = CacheConfig::new(48, 16, 1, 5).validate("I-cache").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::NotPowerOfTwo {
            field: "sets",
            value: 3,
            ..
        }
    ));
}

#[test]
fn fully_associative_geometry_is_valid() {
    let c = CacheConfig::new(256, 16, 16, 3);
    assert!(c.validate("D-cache").is_ok());
    assert_eq!(c.num_sets(), 1);
}

#[rstest]
#[case(CacheConfig::new(1 << 44, 16, 1 << 40, 5), "size_bytes")]
#[case(CacheConfig::new(1 << 20, 1, 1 << 11, 5), "ways")]
#[case(CacheConfig::new(1 << 24, 16, 1, 5), "sets")]
fn oversized_geometry_is_rejected(#[case] cache: CacheConfig, #[case] expected: &str) {
    let err = cache.validate("D-cache").unwrap_err();
    assert!(
        matches!(err, ConfigError::TooLarge { field, .. } if field == expected),
        "{err}"
    );
}

#[test]
fn geometry_at_the_limits_is_valid() {
    let c = CacheConfig::new(MAX_CACHE_SIZE, 256, 1, 0);
    assert!(c.validate("D-cache").is_ok());
    assert_eq!(c.num_sets(), 1 << 16);
}

#[test]
fn memory_size_is_capped() {
    let mut config = Config::default();
    config.memory.size = MAX_MEMORY_SIZE;
    assert!(config.validate().is_ok());
    config.memory.size = MAX_MEMORY_SIZE + 1;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::TooLarge { cache: "memory", field: "size", .. })
    ));
}

#[test]
fn empty_dump_range_is_rejected() {
    let mut config = Config::default();
    config.memory.dump_start = 0x100;
    config.memory.dump_end = 0x100;
    assert_eq!(
        config.validate(),
        Err(ConfigError::DumpRange {
            start: 0x100,
            end: 0x100
        })
    );
}

#[test]
fn zero_memory_is_rejected() {
    let mut config = Config::default();
    config.memory.size = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Zero { field: "size", .. })));
}
