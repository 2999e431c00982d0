//! # Listing and Visibility
//!
//! `get_houses` and `get_house_details` filtered by who is asking.

#[cfg(test)]
mod tests {
    use super::super::{call, dispatcher_over};
    use hl_lifecycle::{
        Affiliation, Caller, ErrorKind, HouseLedger, HouseLifecycleApi, InMemoryLedger, Party,
        TransferKind,
    };
    use std::sync::Arc;

    fn ids(payload: &[u8]) -> Vec<String> {
        let houses: serde_json::Value = serde_json::from_slice(payload).unwrap();
        houses
            .as_array()
            .unwrap()
            .iter()
            .map(|h| h["houseID"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_listing_by_role() {
        let d = dispatcher_over(Arc::new(InMemoryLedger::new()));
        for id in ["AA0000001", "AA0000002", "AA0000003"] {
            call(&d, "reg", "create_house", &[id, "addr"]).unwrap();
        }
        call(&d, "reg", "authority_to_houseowner", &["AA0000002", "alice"]).unwrap();
        call(&d, "reg", "authority_to_houseowner", &["AA0000003", "alice"]).unwrap();
        call(&d, "alice", "houseowner_to_agent", &["AA0000003", "bob", "500"]).unwrap();
        call(&d, "bob", "agent_to_leasee", &["AA0000003", "carol", "450"]).unwrap();

        assert_eq!(
            ids(&call(&d, "reg", "get_houses", &[]).unwrap()),
            vec!["AA0000001", "AA0000002", "AA0000003"]
        );
        assert_eq!(ids(&call(&d, "alice", "get_houses", &[]).unwrap()), vec!["AA0000002"]);
        assert!(ids(&call(&d, "bob", "get_houses", &[]).unwrap()).is_empty());
        assert_eq!(ids(&call(&d, "carol", "get_houses", &[]).unwrap()), vec!["AA0000003"]);
    }

    #[test]
    fn test_listing_on_uninitialized_ledger_is_empty() {
        let d = dispatcher_over(Arc::new(InMemoryLedger::new()));
        assert_eq!(call(&d, "reg", "get_houses", &[]).unwrap(), b"[]".to_vec());
    }

    #[test]
    fn test_unreadable_record_fails_listing() {
        let store = Arc::new(InMemoryLedger::new());
        let d = dispatcher_over(store.clone());
        call(&d, "reg", "create_house", &["AA0000001", "a"]).unwrap();
        call(&d, "reg", "create_house", &["AA0000002", "b"]).unwrap();
        store.fail_reads_of("AA0000002");

        let err = call(&d, "reg", "get_houses", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AssetRetrievalFailed);
        assert!(err.to_string().contains("AA0000002"));
    }

    #[test]
    fn test_details_visibility_in_every_state() {
        let ledger = HouseLedger::new(Arc::new(InMemoryLedger::new()));
        let reg = Caller::new("reg", Affiliation::Regulator);
        let stranger = Caller::new("mallory", Affiliation::Leasee);
        let chain = [
            (TransferKind::AuthorityToOwner, reg.clone(), Party::new("alice", Affiliation::HouseOwner), None),
            (
                TransferKind::OwnerToAgent,
                Party::new("alice", Affiliation::HouseOwner),
                Party::new("bob", Affiliation::AgentCompany),
                Some("500".to_string()),
            ),
            (
                TransferKind::AgentToLeasee,
                Party::new("bob", Affiliation::AgentCompany),
                Party::new("carol", Affiliation::Leasee),
                Some("450".to_string()),
            ),
        ];

        let mut house = ledger.create(&reg, "AB1234567", "addr").unwrap();
        assert!(ledger.get_details(&reg, &house).is_ok());
        assert!(ledger.get_details(&stranger, &house).is_err());

        for (kind, caller, recipient, price) in chain {
            house = ledger.transfer(kind, house, &caller, &recipient, price).unwrap();
            assert!(ledger.get_details(&reg, &house).is_ok());
            assert!(ledger.get_details(&recipient, &house).is_ok());
            assert_eq!(
                ledger.get_details(&stranger, &house).unwrap_err().kind(),
                ErrorKind::PermissionDenied
            );
            if recipient.name != "alice" {
                assert!(ledger.get_details(&Party::new("alice", Affiliation::HouseOwner), &house).is_err());
            }
        }
    }
}
