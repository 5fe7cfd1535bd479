//! Property-based tests for KV store invariants.
//!
//! # Tested Invariants
//!
//! - Keys never set are absent
//! - A write is visible to the next read on the same thread
//! - The last write to a key wins
//! - Writes to one key never disturb another

use proptest::prelude::*;
use std::collections::HashMap;

use super::KvStore;

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9]{0,12}"
}

fn value_strategy() -> impl Strategy<Value = String> {
    ".{0,32}"
}

proptest! {
    #[test]
    fn prop_unset_key_is_absent(key in key_strategy()) {
        let store = KvStore::new();
        prop_assert_eq!(store.get(&key), None);
    }

    #[test]
    fn prop_write_then_read(key in key_strategy(), value in value_strategy()) {
        let store = KvStore::new();
        store.set(key.clone(), value.clone());
        prop_assert_eq!(store.get(&key), Some(value));
    }

    #[test]
    fn prop_last_writer_wins(
        key in key_strategy(),
        first in value_strategy(),
        second in value_strategy(),
    ) {
        let store = KvStore::new();
        store.set(key.clone(), first);
        store.set(key.clone(), second.clone());
        prop_assert_eq!(store.get(&key), Some(second));
    }

    /// The store agrees with a plain `HashMap` model after any write sequence.
    #[test]
    fn prop_matches_hashmap_model(
        ops in prop::collection::vec((key_strategy(), value_strategy()), 0..64),
    ) {
        let store = KvStore::new();
        let mut model = HashMap::new();

        for (key, value) in ops {
            store.set(key.clone(), value.clone());
            model.insert(key, value);
        }

        prop_assert_eq!(store.len(), model.len());
        for (key, value) in &model {
            let got = store.get(key);
            prop_assert_eq!(got.as_ref(), Some(value));
        }
    }

    #[test]
    fn prop_concurrent_disjoint_writes(
        per_thread in 1usize..50,
        threads in 1usize..6,
    ) {
        let store = KvStore::new();
        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..per_thread {
                        store.set(format!("{t}:{i}"), format!("{t}-{i}"));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        prop_assert_eq!(store.len(), threads * per_thread);
        for t in 0..threads {
            for i in 0..per_thread {
                prop_assert_eq!(store.get(&format!("{t}:{i}")), Some(format!("{t}-{i}")));
            }
        }
    }
}
