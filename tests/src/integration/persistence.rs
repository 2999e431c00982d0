//! # Persistence
//!
//! Ledger state survives reopening the file backend, both through the
//! lifecycle core directly and through the node runner.

#[cfg(test)]
mod tests {
    use super::super::{call, dispatcher_over, test_directory};
    use hl_lifecycle::codec::decode_house;
    use hl_lifecycle::{Dispatcher, FileLedger, LifecycleState};
    use hl_node::{NodeRunner, NodeStore, StorageBackend, StorageConfig};
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_file_ledger_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.bin");

        {
            let d = dispatcher_over(Arc::new(FileLedger::open(&path).unwrap()));
            call(&d, "reg", "init", &[]).unwrap();
            call(&d, "reg", "create_house", &["AB1234567", "1 Main St"]).unwrap();
            call(&d, "reg", "authority_to_houseowner", &["AB1234567", "alice"]).unwrap();
            call(&d, "alice", "houseowner_to_agent", &["AB1234567", "bob", "500"]).unwrap();
        }

        let d = dispatcher_over(Arc::new(FileLedger::open(&path).unwrap()));
        let bytes = call(&d, "bob", "get_house_details", &["AB1234567"]).unwrap();
        let house = decode_house("AB1234567", &bytes).unwrap();
        assert_eq!(house.status, LifecycleState::HeldByAgent);
        assert_eq!(house.money.as_deref(), Some("500"));

        call(&d, "bob", "agent_to_leasee", &["AB1234567", "carol", "450"]).unwrap();
        let houses: serde_json::Value =
            serde_json::from_slice(&call(&d, "carol", "get_houses", &[]).unwrap()).unwrap();
        assert_eq!(houses[0]["owner"], "carol");
    }

    #[test]
    fn test_node_scripts_share_a_file_store() {
        let dir = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            data_dir: dir.path().join("data"),
            sync_writes: true,
        };

        let first = r#"
reg init
reg create_house AB1234567 "1 Main St"
reg authority_to_houseowner AB1234567 alice
"#;
        let runner = NodeRunner::new(
            Dispatcher::new(Arc::new(NodeStore::open(&config).unwrap()), test_directory()),
            false,
        );
        let mut output = Vec::new();
        let summary = runner.run_script(first.as_bytes(), &mut output).unwrap();
        assert_eq!(summary.failures, 0);
        assert_eq!(String::from_utf8(output).unwrap(), "ok\nok\nok\n");
        drop(runner);

        let runner = NodeRunner::new(
            Dispatcher::new(Arc::new(NodeStore::open(&config).unwrap()), test_directory()),
            false,
        );
        let mut output = Vec::new();
        let summary = runner
            .run_script("alice get_houses\ncarol get_houses\n".as_bytes(), &mut output)
            .unwrap();
        assert_eq!(summary.invocations, 2);
        let output = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].contains(r#""houseID":"AB1234567""#));
        assert_eq!(lines[1], "ok []");
    }
}
