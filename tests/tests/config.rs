//! Tests for layered configuration loading.
//!
//! Each test holds `ScopedEnv` so environment overrides never leak between
//! tests in this binary.

use dpk::{bootstrap, load_config, HashAlgorithm, PartitionerConfig, TracingConfig};
use integration_tests::setup::ScopedEnv;
use serde_json::json;

#[test]
fn test_defaults_without_overrides() {
    let _env = ScopedEnv::new(&[]);

    let config = load_config().expect("Failed to load config");
    assert_eq!(config.partitioner, PartitionerConfig::default());
    assert_eq!(config.log, TracingConfig::default());
}

#[test]
fn test_environment_overrides() {
    let _env = ScopedEnv::new(&[
        ("DPK__PARTITIONER__HASH_ALGORITHM", "sha256"),
        ("DPK__PARTITIONER__MAX_KEY_LENGTH", "8"),
        ("DPK__LOG__JSON", "true"),
    ]);

    let config = load_config().expect("Failed to load config");
    assert_eq!(config.partitioner.hash_algorithm, "sha256");
    assert_eq!(config.partitioner.max_key_length, 8);
    assert!(config.log.json);
    assert_eq!(config.log.filter, "info");
}

#[test]
fn test_bootstrap_builds_configured_deriver() {
    let _env = ScopedEnv::new(&[
        ("DPK__PARTITIONER__HASH_ALGORITHM", "SHA3-256"),
        ("DPK__PARTITIONER__MAX_KEY_LENGTH", "4"),
    ]);

    let deriver = bootstrap().expect("Failed to bootstrap");
    assert_eq!(deriver.algorithm(), HashAlgorithm::Sha3_256);

    assert_eq!(deriver.derive(&json!({ "partitionKey": "abcd" })).unwrap(), "abcd");
    assert_eq!(
        deriver.derive(&json!({ "partitionKey": "abcde" })).unwrap(),
        HashAlgorithm::Sha3_256.digest_hex(b"abcde")
    );
}

#[test]
fn test_bootstrap_rejects_unknown_algorithm() {
    let _env = ScopedEnv::new(&[("DPK__PARTITIONER__HASH_ALGORITHM", "md5")]);

    let err = bootstrap().unwrap_err();
    let root = err
        .downcast_ref::<dpk::Error>()
        .expect("root cause should be a dpk error");
    assert_eq!(root.code(), "DPK_002");
}
