use proptest::prelude::*;
use services::store::{FileStore, KeyValueStore, MemoryStore, StoredValue, favorite_key};
use std::collections::BTreeMap;

fn arb_value() -> impl Strategy<Value = StoredValue> {
    prop_oneof![
        any::<bool>().prop_map(StoredValue::Bool),
        ".{0,24}".prop_map(StoredValue::Text),
    ]
}

fn arb_entries() -> impl Strategy<Value = BTreeMap<String, StoredValue>> {
    prop::collection::btree_map("[a-z_]{1,12}[0-9]{0,4}", arb_value(), 0..16)
}

#[cfg(test)]
mod store_property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn test_values_survive_reopen(entries in arb_entries()) {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("store.json");

            let store = FileStore::open(&path).unwrap();
            for (key, value) in &entries {
                store.set(key, value.clone()).unwrap();
            }
            drop(store);

            // Property: every value reads back with its original type
            let reopened = FileStore::open(&path).unwrap();
            for (key, value) in &entries {
                prop_assert_eq!(reopened.get(key).unwrap(), Some(value.clone()));
            }
        }

        #[test]
        fn test_text_that_looks_boolean_stays_text(text in "(true|false|1|0)") {
            let dir = tempfile::tempdir().unwrap();
            let path = dir.path().join("store.json");

            let store = FileStore::open(&path).unwrap();
            store.set_string("auth_token", &text).unwrap();
            drop(store);

            let reopened = FileStore::open(&path).unwrap();
            prop_assert_eq!(reopened.get_string("auth_token").unwrap(), Some(text));
            prop_assert!(!reopened.get_bool("auth_token").unwrap());
        }

        #[test]
        fn test_last_write_wins(id in any::<i64>(), flags in prop::collection::vec(any::<bool>(), 1..8)) {
            let store = MemoryStore::new();
            let key = favorite_key(id);
            for flag in &flags {
                store.set_bool(&key, *flag).unwrap();
            }

            prop_assert_eq!(store.get_bool(&key).unwrap(), *flags.last().unwrap());
            prop_assert!(key.ends_with(&id.to_string()));
        }
    }
}
