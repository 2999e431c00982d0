//! # Domain Value Objects
//!
//! Immutable value types: house identifiers, affiliations, lifecycle states
//! and the identities taking part in an invocation.

use super::errors::LifecycleError;
use super::invariants::is_valid_house_id;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ledger identifier of a house: two letters followed by seven digits.
///
/// The only constructor is [`HouseId::parse`]; decoding a stored record
/// goes through the same check.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HouseId(String);

impl HouseId {
    /// Validate and wrap an identifier.
    pub fn parse(raw: impl Into<String>) -> Result<Self, LifecycleError> {
        let raw = raw.into();
        if !is_valid_house_id(&raw) {
            return Err(LifecycleError::InvalidIdentifier(raw));
        }
        Ok(Self(raw))
    }

    /// Identifier as a string slice (also the ledger key).
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for HouseId {
    type Error = LifecycleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        HouseId::parse(value)
    }
}

impl From<HouseId> for String {
    fn from(id: HouseId) -> Self {
        id.0
    }
}

impl fmt::Display for HouseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Caller role in the renting network.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Affiliation {
    /// Housing authority; creates houses and assigns first owners.
    Regulator,
    /// Owner of a house.
    HouseOwner,
    /// Letting agent.
    AgentCompany,
    /// Tenant.
    Leasee,
}

impl Affiliation {
    /// Wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Affiliation::Regulator => "regulator",
            Affiliation::HouseOwner => "house_owner",
            Affiliation::AgentCompany => "agent_company",
            Affiliation::Leasee => "leasee",
        }
    }

    /// Whether this role sees every house.
    pub fn is_authority(&self) -> bool {
        matches!(self, Affiliation::Regulator)
    }
}

impl FromStr for Affiliation {
    type Err = LifecycleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "regulator" => Ok(Affiliation::Regulator),
            "house_owner" => Ok(Affiliation::HouseOwner),
            "agent_company" => Ok(Affiliation::AgentCompany),
            "leasee" => Ok(Affiliation::Leasee),
            other => Err(LifecycleError::InvalidAffiliation(other.to_string())),
        }
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Custody state of a house. Persisted as its integer code.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LifecycleState {
    /// Created by the regulator, no owner yet.
    #[default]
    Unassigned = 0,
    /// Held by a house owner.
    HeldByOwner = 1,
    /// Held by an agent company.
    HeldByAgent = 2,
    /// Let to a leasee. Terminal.
    HeldByLeasee = 3,
}

impl LifecycleState {
    /// Integer code stored in the `status` field.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// The state directly after this one, if any.
    pub fn successor(&self) -> Option<LifecycleState> {
        match self {
            LifecycleState::Unassigned => Some(LifecycleState::HeldByOwner),
            LifecycleState::HeldByOwner => Some(LifecycleState::HeldByAgent),
            LifecycleState::HeldByAgent => Some(LifecycleState::HeldByLeasee),
            LifecycleState::HeldByLeasee => None,
        }
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        self.successor().is_none()
    }

    /// Role that holds the house in this state, if any.
    pub fn holder_role(&self) -> Option<Affiliation> {
        match self {
            LifecycleState::Unassigned => None,
            LifecycleState::HeldByOwner => Some(Affiliation::HouseOwner),
            LifecycleState::HeldByAgent => Some(Affiliation::AgentCompany),
            LifecycleState::HeldByLeasee => Some(Affiliation::Leasee),
        }
    }
}

impl TryFrom<u8> for LifecycleState {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(LifecycleState::Unassigned),
            1 => Ok(LifecycleState::HeldByOwner),
            2 => Ok(LifecycleState::HeldByAgent),
            3 => Ok(LifecycleState::HeldByLeasee),
            other => Err(format!("unknown lifecycle status {other}")),
        }
    }
}

impl From<LifecycleState> for u8 {
    fn from(state: LifecycleState) -> Self {
        state.code()
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Unassigned => "Unassigned",
            LifecycleState::HeldByOwner => "HeldByOwner",
            LifecycleState::HeldByAgent => "HeldByAgent",
            LifecycleState::HeldByLeasee => "HeldByLeasee",
        };
        f.write_str(name)
    }
}

/// A named identity with its resolved affiliation.
///
/// Used both for the invoking caller and for the recipient of a transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Party {
    /// Identity name as known to the ledger.
    pub name: String,
    /// Resolved role.
    pub affiliation: Affiliation,
}

impl Party {
    /// Create a party.
    pub fn new(name: impl Into<String>, affiliation: Affiliation) -> Self {
        Self {
            name: name.into(),
            affiliation,
        }
    }
}

/// The invoking identity.
pub type Caller = Party;
