//! End-to-end tests for partition key derivation.
//!
//! Expected values are computed through the public digest helper, so each
//! test pins down which input a branch digests rather than the digest bytes.

use dpk::{derive_partition_key, hash_digest, to_json_text, Error, DEFAULT_HASH_ALGORITHM};
use integration_tests::{fixtures, setup::init_test_tracing};
use serde_json::json;
use std::collections::{BTreeMap, HashMap};

fn digest<T: serde::Serialize + ?Sized>(data: &T) -> String {
    hash_digest(data, DEFAULT_HASH_ALGORITHM).expect("digest")
}

#[test]
fn test_absent_events_return_trivial_key() {
    init_test_tracing();

    for event in fixtures::absent_events() {
        assert_eq!(derive_partition_key(&event).unwrap(), "0", "event: {event}");
    }
    assert_eq!(derive_partition_key(&None::<String>).unwrap(), "0");
}

#[test]
fn test_record_returns_hash_of_event() {
    init_test_tracing();

    let event = fixtures::person_event();
    assert_eq!(derive_partition_key(&event).unwrap(), digest(&event));
}

#[test]
fn test_explicit_partition_key() {
    init_test_tracing();

    let event = json!({ "partitionKey": "abc123" });
    assert_eq!(derive_partition_key(&event).unwrap(), "abc123");
}

#[test]
fn test_object_partition_key_is_stringified() {
    init_test_tracing();

    let event = json!({ "partitionKey": { "example": "key" } });
    assert_eq!(
        derive_partition_key(&event).unwrap(),
        to_json_text(&json!({ "example": "key" })).unwrap()
    );
}

#[test]
fn test_null_partition_key_returns_hash_of_event() {
    init_test_tracing();

    let event = json!({ "partitionKey": null });
    assert_eq!(derive_partition_key(&event).unwrap(), digest(&event));
}

#[test]
fn test_string_event_hashes_quoted_string() {
    init_test_tracing();

    let event = "a string";
    let key = derive_partition_key(event).unwrap();
    assert_eq!(key, digest(&to_json_text(event).unwrap()));
    assert_ne!(key, digest(event));
}

#[test]
fn test_primitive_and_array_events() {
    init_test_tracing();

    assert_eq!(derive_partition_key(&123).unwrap(), digest(&123));
    assert_eq!(derive_partition_key(&true).unwrap(), digest(&true));
    assert_eq!(derive_partition_key(&[1, 2, 3]).unwrap(), digest(&[1, 2, 3]));
}

#[test]
fn test_long_partition_key_is_hashed() {
    init_test_tracing();

    let partition_key = "a".repeat(257);
    let event = fixtures::keyed_event(partition_key.clone());
    assert_eq!(derive_partition_key(&event).unwrap(), digest(&partition_key));
}

#[test]
fn test_long_object_partition_key_hashes_stringified_key() {
    init_test_tracing();

    let partition_key = json!({ "example": "a".repeat(257) });
    let event = fixtures::keyed_event(partition_key.clone());
    assert_eq!(
        derive_partition_key(&event).unwrap(),
        digest(&to_json_text(&partition_key).unwrap())
    );
}

#[test]
fn test_typed_events() {
    init_test_tracing();

    let keyed = fixtures::order_placed(7, Some("42"));
    assert_eq!(derive_partition_key(&keyed).unwrap(), "customer-42");

    let unkeyed = fixtures::order_placed(7, None);
    assert_eq!(
        derive_partition_key(&unkeyed).unwrap(),
        digest(&fixtures::order_placed_json(7))
    );
}

#[test]
fn test_unserializable_event() {
    init_test_tracing();

    let mut event = HashMap::new();
    event.insert(vec![1u8, 2], "byte-string keys");

    let err = derive_partition_key(&event).unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
    assert_eq!(err.code(), "DPK_001");
}

#[test]
fn test_ordered_inputs_give_stable_keys() {
    init_test_tracing();

    let entries = [("region", 3), ("tenant", 1), ("shard", 4), ("zone", 2)];

    let keys: Vec<String> = (0..20)
        .map(|_| {
            let event: BTreeMap<&str, i32> = entries.iter().copied().collect();
            derive_partition_key(&event).unwrap()
        })
        .collect();
    assert!(keys.iter().all(|key| key == &keys[0]));

    // Sorted map order, not insertion order.
    assert_eq!(
        keys[0],
        digest(r#"{"region":3,"shard":4,"tenant":1,"zone":2}"#)
    );

    let orders: Vec<String> = (0..20)
        .map(|_| derive_partition_key(&fixtures::order_placed(11, None)).unwrap())
        .collect();
    assert!(orders.iter().all(|key| key == &orders[0]));
    assert_eq!(orders[0], digest(&fixtures::order_placed_json(11)));
}
