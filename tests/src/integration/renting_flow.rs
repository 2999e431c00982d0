//! # Renting Flow
//!
//! The full custody chain driven through the dispatcher, plus the ordering
//! and ownership rules of the transition table.

#[cfg(test)]
mod tests {
    use super::super::{call, dispatcher_over};
    use hl_lifecycle::codec::decode_house;
    use hl_lifecycle::{ErrorKind, InMemoryLedger, LifecycleState, REGISTRY_KEY};
    use std::sync::Arc;

    const HOUSE: &str = "AB1234567";

    fn details_as(
        d: &hl_lifecycle::Dispatcher<InMemoryLedger, hl_lifecycle::DirectoryResolver>,
        caller: &str,
    ) -> Result<hl_lifecycle::House, hl_lifecycle::LifecycleError> {
        call(d, caller, "get_house_details", &[HOUSE]).map(|bytes| decode_house(HOUSE, &bytes).unwrap())
    }

    #[test]
    fn test_end_to_end_renting() {
        let d = dispatcher_over(Arc::new(InMemoryLedger::new()));
        call(&d, "reg", "init", &[]).unwrap();
        call(&d, "reg", "create_house", &[HOUSE, "1 Main St"]).unwrap();

        let house = details_as(&d, "reg").unwrap();
        assert_eq!(house.status, LifecycleState::Unassigned);
        assert!(house.owner.is_none());

        call(&d, "reg", "authority_to_houseowner", &[HOUSE, "alice"]).unwrap();
        let house = details_as(&d, "alice").unwrap();
        assert_eq!(house.status, LifecycleState::HeldByOwner);
        assert_eq!(house.owner.as_deref(), Some("alice"));

        call(&d, "alice", "houseowner_to_agent", &[HOUSE, "bob", "500"]).unwrap();
        let house = details_as(&d, "bob").unwrap();
        assert_eq!(house.status, LifecycleState::HeldByAgent);
        assert_eq!(house.money.as_deref(), Some("500"));

        call(&d, "bob", "agent_to_leasee", &[HOUSE, "carol", "450"]).unwrap();
        let house = details_as(&d, "carol").unwrap();
        assert_eq!(house.status, LifecycleState::HeldByLeasee);
        assert_eq!(house.owner.as_deref(), Some("carol"));
        assert_eq!(house.money.as_deref(), Some("450"));
        assert_eq!(house.address, "1 Main St");

        let err = details_as(&d, "alice").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert!(details_as(&d, "reg").is_ok());
    }

    #[test]
    fn test_terminal_state_admits_nothing() {
        let d = dispatcher_over(Arc::new(InMemoryLedger::new()));
        call(&d, "reg", "create_house", &[HOUSE, "addr"]).unwrap();
        call(&d, "reg", "authority_to_houseowner", &[HOUSE, "alice"]).unwrap();
        call(&d, "alice", "houseowner_to_agent", &[HOUSE, "bob", "500"]).unwrap();
        call(&d, "bob", "agent_to_leasee", &[HOUSE, "carol", "450"]).unwrap();

        for (caller, function, args) in [
            ("reg", "authority_to_houseowner", vec![HOUSE, "alice"]),
            ("alice", "houseowner_to_agent", vec![HOUSE, "bob", "1"]),
            ("bob", "agent_to_leasee", vec![HOUSE, "carol", "1"]),
        ] {
            let err = call(&d, caller, function, &args).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::PermissionDenied, "{function}");
        }
        assert_eq!(details_as(&d, "carol").unwrap().money.as_deref(), Some("450"));
    }

    #[test]
    fn test_unassigned_house_cannot_skip_ahead() {
        let store = Arc::new(InMemoryLedger::new());
        let d = dispatcher_over(store.clone());
        call(&d, "reg", "create_house", &[HOUSE, "addr"]).unwrap();
        let before = store.snapshot();

        let err = call(&d, "alice", "houseowner_to_agent", &[HOUSE, "bob", "500"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        let err = call(&d, "bob", "agent_to_leasee", &[HOUSE, "carol", "450"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_only_current_owner_hands_to_agent() {
        let d = dispatcher_over(Arc::new(InMemoryLedger::new()));
        call(&d, "reg", "create_house", &[HOUSE, "addr"]).unwrap();
        call(&d, "reg", "authority_to_houseowner", &[HOUSE, "alice"]).unwrap();

        // dave is a house owner, but not this house's owner.
        let err = call(&d, "dave", "houseowner_to_agent", &[HOUSE, "bob", "500"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);
        assert_eq!(details_as(&d, "alice").unwrap().status, LifecycleState::HeldByOwner);
    }

    #[test]
    fn test_create_failures_leave_store_untouched() {
        let store = Arc::new(InMemoryLedger::new());
        let d = dispatcher_over(store.clone());
        call(&d, "reg", "init", &[]).unwrap();
        let before = store.snapshot();

        for bad in ["", "A1234567", "AB123456", "AB12345678", "12ABCDEFG", "ÀB1234567", "AB123456X"] {
            let err = call(&d, "reg", "create_house", &[bad, "addr"]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidIdentifier, "{bad:?}");
        }
        let err = call(&d, "alice", "create_house", &[HOUSE, "addr"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PermissionDenied);

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_duplicate_create_registers_once() {
        let store = Arc::new(InMemoryLedger::new());
        let d = dispatcher_over(store.clone());
        call(&d, "reg", "create_house", &[HOUSE, "first"]).unwrap();
        let err = call(&d, "reg", "create_house", &[HOUSE, "second"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyExists);

        let registry: serde_json::Value =
            serde_json::from_slice(&store.snapshot()[REGISTRY_KEY]).unwrap();
        assert_eq!(registry["hids"], serde_json::json!([HOUSE]));
        assert_eq!(details_as(&d, "reg").unwrap().address, "first");
    }

    #[test]
    fn test_persisted_record_shape() {
        let store = Arc::new(InMemoryLedger::new());
        let d = dispatcher_over(store.clone());
        call(&d, "reg", "create_house", &[HOUSE, "1 \"Main\" St"]).unwrap();

        let record: serde_json::Value = serde_json::from_slice(&store.snapshot()[HOUSE]).unwrap();
        assert_eq!(
            record,
            serde_json::json!({
                "address": "1 \"Main\" St",
                "owner": null,
                "status": 0,
                "houseID": HOUSE,
            })
        );
    }
}
