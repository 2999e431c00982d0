//! Typed commands parsed from raw invocations.

use crate::domain::{HouseId, LifecycleError, TransferKind};

/// A raw invocation: function name plus ordered string arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    /// Function name.
    pub function: String,
    /// Positional arguments.
    pub args: Vec<String>,
}

impl Invocation {
    /// Build an invocation.
    pub fn new<I, A>(function: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            function: function.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Parameters of `create_house`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateHouseParams {
    /// Identifier of the new house.
    pub house_id: HouseId,
    /// Street address.
    pub address: String,
}

/// Parameters of the three named transfers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferParams {
    /// Which table row the transfer must use.
    pub kind: TransferKind,
    /// House being transferred.
    pub house_id: HouseId,
    /// Name of the identity receiving custody.
    pub recipient: String,
    /// Price or memo; present for every transfer that records one.
    pub price: Option<String>,
}

/// Parameters of `get_house_details`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HouseDetailsParams {
    /// House to read.
    pub house_id: HouseId,
}

/// Parameters of `reconcile_registry`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcileParams {
    /// Candidates, in the order they should be appended.
    pub house_ids: Vec<HouseId>,
}

/// Every supported operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Liveness check.
    Ping,
    /// Ledger bootstrap.
    Init,
    /// Create a house.
    CreateHouse(CreateHouseParams),
    /// One of the named transfers.
    Transfer(TransferParams),
    /// Read one house.
    GetHouseDetails(HouseDetailsParams),
    /// List visible houses.
    GetHouses,
    /// Re-index orphaned houses.
    ReconcileRegistry(ReconcileParams),
}

/// Function names accepted by [`Command::parse`].
pub const FUNCTIONS: &[&str] = &[
    "ping",
    "init",
    "create_house",
    "authority_to_houseowner",
    "houseowner_to_agent",
    "agent_to_leasee",
    "get_house_details",
    "get_houses",
    "reconcile_registry",
];

fn expect_args(invocation: &Invocation, expected: usize) -> Result<(), LifecycleError> {
    if invocation.args.len() != expected {
        return Err(LifecycleError::BadArgumentCount {
            function: invocation.function.clone(),
            expected: expected.to_string(),
            got: invocation.args.len(),
        });
    }
    Ok(())
}

fn parse_transfer(invocation: &Invocation, kind: TransferKind) -> Result<Command, LifecycleError> {
    let rule = kind.rule();
    expect_args(invocation, if rule.records_price { 3 } else { 2 })?;
    let args = &invocation.args;
    Ok(Command::Transfer(TransferParams {
        kind,
        house_id: HouseId::parse(args[0].as_str())?,
        recipient: args[1].clone(),
        price: args.get(2).cloned(),
    }))
}

impl Command {
    /// Parse and validate an invocation.
    pub fn parse(invocation: &Invocation) -> Result<Self, LifecycleError> {
        let args = &invocation.args;
        match invocation.function.as_str() {
            "ping" => {
                expect_args(invocation, 0)?;
                Ok(Command::Ping)
            }
            "init" => {
                expect_args(invocation, 0)?;
                Ok(Command::Init)
            }
            "create_house" => {
                expect_args(invocation, 2)?;
                Ok(Command::CreateHouse(CreateHouseParams {
                    house_id: HouseId::parse(args[0].as_str())?,
                    address: args[1].clone(),
                }))
            }
            "authority_to_houseowner" => parse_transfer(invocation, TransferKind::AuthorityToOwner),
            "houseowner_to_agent" => parse_transfer(invocation, TransferKind::OwnerToAgent),
            "agent_to_leasee" => parse_transfer(invocation, TransferKind::AgentToLeasee),
            "get_house_details" => {
                expect_args(invocation, 1)?;
                Ok(Command::GetHouseDetails(HouseDetailsParams {
                    house_id: HouseId::parse(args[0].as_str())?,
                }))
            }
            "get_houses" => {
                expect_args(invocation, 0)?;
                Ok(Command::GetHouses)
            }
            "reconcile_registry" => {
                if args.is_empty() {
                    return Err(LifecycleError::BadArgumentCount {
                        function: invocation.function.clone(),
                        expected: "at least 1".to_string(),
                        got: 0,
                    });
                }
                let house_ids = args
                    .iter()
                    .map(|raw| HouseId::parse(raw.as_str()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Command::ReconcileRegistry(ReconcileParams { house_ids }))
            }
            other => Err(LifecycleError::UnknownFunction(other.to_string())),
        }
    }
}
