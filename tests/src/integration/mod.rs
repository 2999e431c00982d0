//! Integration flows across the lifecycle core, its adapters and the node.

pub mod listing;
pub mod persistence;
pub mod recovery;
pub mod renting_flow;

use hl_lifecycle::{
    Affiliation, DirectoryResolver, Dispatcher, Invocation, LedgerStore, LifecycleError,
};
use std::sync::Arc;

/// Directory with one identity per role.
pub fn test_directory() -> DirectoryResolver {
    DirectoryResolver::new()
        .with_entry("reg", Affiliation::Regulator)
        .with_entry("alice", Affiliation::HouseOwner)
        .with_entry("dave", Affiliation::HouseOwner)
        .with_entry("bob", Affiliation::AgentCompany)
        .with_entry("carol", Affiliation::Leasee)
}

/// Dispatcher over `store` with [`test_directory`].
pub fn dispatcher_over<S: LedgerStore>(store: Arc<S>) -> Dispatcher<S, DirectoryResolver> {
    Dispatcher::new(store, test_directory())
}

/// Invoke `function` as `caller`.
pub fn call<S: LedgerStore>(
    dispatcher: &Dispatcher<S, DirectoryResolver>,
    caller: &str,
    function: &str,
    args: &[&str],
) -> Result<Vec<u8>, LifecycleError> {
    dispatcher.invoke(caller, &Invocation::new(function, args.iter().copied()))
}
