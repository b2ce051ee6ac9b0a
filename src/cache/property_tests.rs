//! Property-Based Tests for Cache Module
//!
//! Uses proptest to verify engine-level correctness properties.

use proptest::prelude::*;
use serde_json::json;
use std::collections::HashMap;
use std::thread::sleep;
use std::time::Duration;

use crate::cache::{cache_key, CacheEngine};

// == Test Configuration ==
const TEST_DEFAULT_TTL: u64 = 300;

// == Strategies ==
/// Generates valid cache keys (non-empty, within length limit, no glob
/// metacharacters)
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}"
}

/// Generates valid string payloads
fn valid_value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,256}"
}

/// Generates free-text identifiers: words of Latin letters separated by
/// single spaces
fn identifier_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-zA-Z]{1,10}", 1..4).prop_map(|words| words.join(" "))
}

/// A sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| CacheOp::Get { key }),
        valid_key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // For any valid key-value pair, storing the pair and then retrieving
    // it before expiration returns the exact same value.
    #[test]
    fn prop_roundtrip_storage(key in valid_key_strategy(), value in valid_value_strategy()) {
        let engine = CacheEngine::new(TEST_DEFAULT_TTL);

        engine.set(&key, json!(value), None).unwrap();

        let retrieved = engine.get(&key).unwrap();
        prop_assert_eq!(retrieved, Some(json!(value)), "Round-trip value mismatch");
    }

    // For any key that exists in the cache, after delete a subsequent get
    // reports the key absent.
    #[test]
    fn prop_delete_removes_entry(key in valid_key_strategy(), value in valid_value_strategy()) {
        let engine = CacheEngine::new(TEST_DEFAULT_TTL);

        engine.set(&key, json!(value), None).unwrap();
        prop_assert!(engine.exists(&key).unwrap(), "Key should exist before delete");

        prop_assert!(engine.delete(&key).unwrap(), "Delete should report a removal");

        prop_assert_eq!(engine.get(&key).unwrap(), None, "Key should be absent after delete");
        prop_assert!(!engine.delete(&key).unwrap(), "Second delete should report false");
    }

    // For any key, storing V1 and then V2 under the same key results in
    // get returning V2 and a single stored entry.
    #[test]
    fn prop_overwrite_semantics(
        key in valid_key_strategy(),
        value1 in valid_value_strategy(),
        value2 in valid_value_strategy()
    ) {
        let engine = CacheEngine::new(TEST_DEFAULT_TTL);

        engine.set(&key, json!(value1), None).unwrap();
        engine.set(&key, json!(value2.clone()), None).unwrap();

        let retrieved = engine.get(&key).unwrap();
        prop_assert_eq!(retrieved, Some(json!(value2)), "Overwrite should return new value");
        prop_assert_eq!(engine.len(), 1, "Should have exactly one entry after overwrite");
    }

    // For any sequence of operations, hit and miss counters accurately
    // reflect the observed get outcomes.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..50)) {
        let engine = CacheEngine::new(TEST_DEFAULT_TTL);
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    engine.set(&key, json!(value), None).unwrap();
                }
                CacheOp::Get { key } => {
                    match engine.get(&key).unwrap() {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    }
                }
                CacheOp::Delete { key } => {
                    let _ = engine.delete(&key).unwrap();
                }
            }
        }

        let stats = engine.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, engine.len(), "Total entries mismatch");
    }

    // For any identifier, normalization is deterministic and insensitive
    // to case and whitespace run-length.
    #[test]
    fn prop_key_normalization_equivalence(identifier in identifier_strategy()) {
        let canonical = cache_key("city", &identifier).unwrap();

        let upper = identifier.to_uppercase();
        let padded = identifier.replace(' ', "   ");

        prop_assert_eq!(cache_key("city", &upper).unwrap(), canonical.clone());
        prop_assert_eq!(cache_key("city", &padded).unwrap(), canonical.clone());
        prop_assert_eq!(cache_key("city", &identifier).unwrap(), canonical.clone());

        prop_assert!(canonical.starts_with("city_"), "Key should carry the prefix");
        prop_assert!(!canonical.contains(' '), "Key should contain no whitespace");
    }

    // For any set of live entries, pattern enumeration returns exactly
    // the keys matching the prefix glob.
    #[test]
    fn prop_pattern_enumeration_exact(
        entries in prop::collection::hash_map(valid_key_strategy(), valid_value_strategy(), 1..20)
    ) {
        let engine = CacheEngine::new(TEST_DEFAULT_TTL);
        let mut expected: Vec<String> = Vec::new();

        for (suffix, value) in &entries {
            // Half the keys get the enumerated prefix, half a different one
            let key = if suffix.len() % 2 == 0 {
                let key = format!("city_{}", suffix);
                expected.push(key.clone());
                key
            } else {
                format!("other_{}", suffix)
            };
            engine.set(&key, json!(value), None).unwrap();
        }

        let mut listed = engine.keys_by_pattern("city_*").unwrap();
        listed.sort();
        expected.sort();

        prop_assert_eq!(listed, expected, "Enumeration should match the prefixed keys");
    }

    // Bulk reads pair each matching key with its stored value.
    #[test]
    fn prop_entries_by_pattern_pairs_values(
        entries in prop::collection::hash_map(valid_key_strategy(), valid_value_strategy(), 1..10)
    ) {
        let engine = CacheEngine::new(TEST_DEFAULT_TTL);
        let mut expected: HashMap<String, String> = HashMap::new();

        for (suffix, value) in &entries {
            let key = format!("city_{}", suffix);
            engine.set(&key, json!(value), None).unwrap();
            expected.insert(key, value.clone());
        }

        let listed = engine.entries_by_pattern("city_*").unwrap();
        prop_assert_eq!(listed.len(), expected.len());

        for (key, snapshot) in listed {
            let value = expected.get(&key).expect("unexpected key in enumeration");
            prop_assert_eq!(&snapshot.value, &json!(value));
        }
    }
}

// Separate proptest block with fewer cases for time-sensitive TTL tests
proptest! {
    #![proptest_config(ProptestConfig::with_cases(5))]

    // For any entry stored with a TTL, once the TTL has elapsed every
    // read path reports the key absent.
    #[test]
    fn prop_ttl_expiration_behavior(
        key in valid_key_strategy(),
        value in valid_value_strategy()
    ) {
        let engine = CacheEngine::new(TEST_DEFAULT_TTL);

        engine.set(&key, json!(value.clone()), Some(1)).unwrap();

        let before = engine.get(&key).unwrap();
        prop_assert_eq!(before, Some(json!(value)), "Entry should exist before TTL expires");

        sleep(Duration::from_millis(1100));

        prop_assert_eq!(engine.get(&key).unwrap(), None, "get should report absent after expiry");
        prop_assert!(!engine.exists(&key).unwrap(), "exists should report false after expiry");
        prop_assert_eq!(engine.ttl(&key).unwrap(), None, "ttl should report absent after expiry");
    }
}
