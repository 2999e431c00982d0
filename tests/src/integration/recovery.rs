//! # Store Faults and Registry Recovery
//!
//! Create commits the house and the registry together. Hosts that tear the
//! batch leave orphaned records, which `reconcile_registry` re-indexes.

#[cfg(test)]
mod tests {
    use super::super::{call, dispatcher_over};
    use hl_lifecycle::codec::decode_house;
    use hl_lifecycle::{ErrorKind, InMemoryLedger, LifecycleState, REGISTRY_KEY};
    use std::sync::Arc;

    fn listed_ids(payload: &[u8]) -> Vec<String> {
        let houses: serde_json::Value = serde_json::from_slice(payload).unwrap();
        houses
            .as_array()
            .unwrap()
            .iter()
            .map(|h| h["houseID"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_failed_create_writes_nothing() {
        let store = Arc::new(InMemoryLedger::new());
        let d = dispatcher_over(store.clone());
        call(&d, "reg", "init", &[]).unwrap();
        let before = store.snapshot();

        store.fail_writes_after(0);
        let err = call(&d, "reg", "create_house", &["AB1234567", "addr"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PersistenceError);
        assert_eq!(store.snapshot(), before);

        store.clear_faults();
        call(&d, "reg", "create_house", &["AB1234567", "addr"]).unwrap();
        assert_eq!(listed_ids(&call(&d, "reg", "get_houses", &[]).unwrap()), vec!["AB1234567"]);
    }

    #[test]
    fn test_failed_transfer_keeps_prior_state() {
        let store = Arc::new(InMemoryLedger::new());
        let d = dispatcher_over(store.clone());
        call(&d, "reg", "create_house", &["AB1234567", "addr"]).unwrap();

        store.fail_writes_after(0);
        let err = call(&d, "reg", "authority_to_houseowner", &["AB1234567", "alice"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PersistenceError);
        store.clear_faults();

        let bytes = call(&d, "reg", "get_house_details", &["AB1234567"]).unwrap();
        let house = decode_house("AB1234567", &bytes).unwrap();
        assert_eq!(house.status, LifecycleState::Unassigned);
        assert!(house.owner.is_none());
    }

    #[test]
    fn test_torn_create_is_reconciled() {
        let store = Arc::new(InMemoryLedger::non_atomic());
        let d = dispatcher_over(store.clone());
        call(&d, "reg", "create_house", &["AA0000001", "first"]).unwrap();

        // The house record lands, the registry update does not.
        store.fail_writes_after(1);
        let err = call(&d, "reg", "create_house", &["AA0000002", "second"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PersistenceError);
        store.clear_faults();

        assert!(store.snapshot().contains_key("AA0000002"));
        assert_eq!(listed_ids(&call(&d, "reg", "get_houses", &[]).unwrap()), vec!["AA0000001"]);
        let err = call(&d, "reg", "create_house", &["AA0000002", "again"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        let err = call(&d, "alice", "reconcile_registry", &["AA0000002"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);

        let added = call(&d, "reg", "reconcile_registry", &["AA0000001", "AA0000002", "AA0000009"]).unwrap();
        assert_eq!(added, br#"{"hids":["AA0000002"]}"#.to_vec());
        assert_eq!(
            listed_ids(&call(&d, "reg", "get_houses", &[]).unwrap()),
            vec!["AA0000001", "AA0000002"]
        );

        let again = call(&d, "reg", "reconcile_registry", &["AA0000002"]).unwrap();
        assert_eq!(again, br#"{"hids":[]}"#.to_vec());
    }

    #[test]
    fn test_init_is_idempotent_and_preserves_houses() {
        let store = Arc::new(InMemoryLedger::new());
        let d = dispatcher_over(store.clone());
        call(&d, "reg", "init", &[]).unwrap();
        call(&d, "reg", "create_house", &["AB1234567", "addr"]).unwrap();
        let registry = store.snapshot()[REGISTRY_KEY].clone();

        call(&d, "reg", "init", &[]).unwrap();
        assert_eq!(store.snapshot()[REGISTRY_KEY], registry);
    }

    #[test]
    fn test_corrupt_registry_surfaces() {
        let store = Arc::new(InMemoryLedger::new());
        let d = dispatcher_over(store.clone());
        hl_lifecycle::LedgerStore::put(store.as_ref(), REGISTRY_KEY, b"not json").unwrap();

        let err = call(&d, "reg", "get_houses", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RegistryCorrupt);
        let err = call(&d, "reg", "create_house", &["AB1234567", "addr"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RegistryCorrupt);
        assert!(!store.snapshot().contains_key("AB1234567"));
    }
}
