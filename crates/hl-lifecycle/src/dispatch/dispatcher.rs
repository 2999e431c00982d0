//! Routes invocations into the lifecycle core.

use super::command::{Command, Invocation};
use crate::codec::{encode_house_list, encode_registry};
use crate::domain::{HouseRegistry, LifecycleError, Party};
use crate::ports::{HouseLifecycleApi, IdentityResolver, LedgerStore};
use crate::service::HouseLedger;
use std::sync::Arc;
use tracing::{debug, info_span, warn};
use uuid::Uuid;

/// Payload returned by `ping`.
pub const PING_RESPONSE: &[u8] = b"Hello, world!";

/// Invocation entry point: parses, resolves identities, loads the target
/// house and calls the core.
pub struct Dispatcher<S: LedgerStore, R: IdentityResolver> {
    ledger: HouseLedger<S>,
    resolver: R,
}

impl<S: LedgerStore, R: IdentityResolver> Dispatcher<S, R> {
    /// Create a dispatcher over `store`, resolving names with `resolver`.
    pub fn new(store: Arc<S>, resolver: R) -> Self {
        Self {
            ledger: HouseLedger::new(store),
            resolver,
        }
    }

    /// Run one invocation on behalf of `caller_name`.
    ///
    /// Mutations return an empty payload, queries return JSON.
    pub fn invoke(&self, caller_name: &str, invocation: &Invocation) -> Result<Vec<u8>, LifecycleError> {
        let invocation_id = Uuid::new_v4();
        let span = info_span!(
            "invoke",
            %invocation_id,
            function = %invocation.function,
            caller = caller_name
        );
        let _guard = span.enter();

        let result = Command::parse(invocation).and_then(|command| self.execute(caller_name, command));
        match &result {
            Ok(payload) => debug!(bytes = payload.len(), "Invocation succeeded"),
            Err(e) => warn!(kind = %e.kind(), "Invocation failed: {e}"),
        }
        result
    }

    /// Run an already parsed command.
    pub fn execute(&self, caller_name: &str, command: Command) -> Result<Vec<u8>, LifecycleError> {
        match command {
            Command::Ping => Ok(PING_RESPONSE.to_vec()),
            Command::Init => {
                self.ledger.init()?;
                Ok(Vec::new())
            }
            Command::CreateHouse(params) => {
                let caller = self.resolve(caller_name)?;
                self.ledger
                    .create(&caller, params.house_id.as_str(), &params.address)?;
                Ok(Vec::new())
            }
            Command::Transfer(params) => {
                let caller = self.resolve(caller_name)?;
                let recipient = self.resolve(&params.recipient)?;
                let house = self.ledger.retrieve(&params.house_id)?;
                self.ledger
                    .transfer(params.kind, house, &caller, &recipient, params.price)?;
                Ok(Vec::new())
            }
            Command::GetHouseDetails(params) => {
                let caller = self.resolve(caller_name)?;
                let house = self.ledger.retrieve(&params.house_id)?;
                self.ledger.get_details(&caller, &house)
            }
            Command::GetHouses => {
                let caller = self.resolve(caller_name)?;
                let houses = self.ledger.query().visible_houses(&caller)?;
                encode_house_list(&houses)
            }
            Command::ReconcileRegistry(params) => {
                let caller = self.resolve(caller_name)?;
                let added = self.ledger.reconcile_registry(&caller, &params.house_ids)?;
                encode_registry(&HouseRegistry { hids: added })
            }
        }
    }

    fn resolve(&self, name: &str) -> Result<Party, LifecycleError> {
        if name.is_empty() {
            return Err(LifecycleError::UnknownIdentity(String::new()));
        }
        let affiliation = self.resolver.affiliation_of(name)?;
        Ok(Party::new(name, affiliation))
    }
}
