//! Property-based tests for record storage and scope verification

use std::sync::Arc;

use proptest::prelude::*;
use warden_access::{AccessRecord, AccessStore, verify_scope, verify_scopes};
use warden_kv::MemoryKvStore;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

fn scope() -> impl Strategy<Value = String> {
    "[a-z]{1,6}(:[a-z]{1,6})?"
}

proptest! {
    /// Property: get(create(k, s)) == {k, s}
    #[test]
    fn prop_create_get_roundtrip(
        key in "\\PC{1,24}",
        scopes in prop::collection::vec(scope(), 0..8),
    ) {
        let access = AccessStore::new(Arc::new(MemoryKvStore::new())).unwrap();

        let fetched = runtime().block_on(async {
            access.create(&key, scopes.clone()).await.unwrap();
            access.get(&key).await.unwrap()
        });

        prop_assert_eq!(fetched.key(), key.as_str());
        prop_assert_eq!(fetched.scopes(), scopes.as_slice());
    }

    /// Property: update replaces scopes and keeps the key
    #[test]
    fn prop_update_replaces(
        s1 in prop::collection::vec(scope(), 0..8),
        s2 in prop::collection::vec(scope(), 0..8),
    ) {
        let access = AccessStore::new(Arc::new(MemoryKvStore::new())).unwrap();

        let fetched = runtime().block_on(async {
            access.create("pizza", s1).await.unwrap();
            access.update("pizza", s2.clone()).await.unwrap();
            access.get("pizza").await.unwrap()
        });

        prop_assert_eq!(fetched, AccessRecord::new("pizza", s2));
    }

    /// Property: every subset of granted scopes verifies
    #[test]
    fn prop_subset_verifies(
        granted in prop::collection::vec(scope(), 1..8),
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..8),
    ) {
        let record = AccessRecord::new("pizza", granted.clone());
        let required: Vec<&str> = picks.iter().map(|i| granted[i.index(granted.len())].as_str()).collect();

        prop_assert!(verify_scopes(Some(&record), required.as_slice()));
    }

    /// Property: a scope that was never granted never verifies
    #[test]
    fn prop_non_member_denied(
        granted in prop::collection::vec(scope(), 0..8),
        candidate in scope(),
    ) {
        prop_assume!(!granted.contains(&candidate));
        let record = AccessRecord::new("pizza", granted);

        prop_assert!(!verify_scope(Some(&record), &candidate));
        prop_assert!(!verify_scopes(Some(&record), &[candidate.as_str()]));
    }

    /// Property: a strict prefix of a granted scope is not granted
    #[test]
    fn prop_no_prefix_match(granted in "[a-z]{2,8}:[a-z]{2,8}") {
        let record = AccessRecord::new("pizza", [granted.clone()]);
        let prefix = &granted[..granted.len() - 1];

        prop_assert!(!verify_scope(Some(&record), prefix));
    }
}
