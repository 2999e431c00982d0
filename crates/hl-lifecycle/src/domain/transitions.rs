//! # Transition Table
//!
//! The single source of truth for who may move a house, from which state,
//! and to whom.
//!
//! | From | Caller role | Caller must own | Recipient role | To | Price |
//! |------|-------------|-----------------|----------------|----|-------|
//! | Unassigned | regulator | no | house_owner | HeldByOwner | - |
//! | HeldByOwner | house_owner | yes | agent_company | HeldByAgent | set |
//! | HeldByAgent | agent_company | yes | leasee | HeldByLeasee | set |
//!
//! `HeldByLeasee` has no outgoing row.

use super::entities::House;
use super::errors::LifecycleError;
use super::value_objects::{Affiliation, Caller, LifecycleState, Party};
use std::fmt;

/// Named transfer, one per table row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransferKind {
    /// Regulator assigns the first owner.
    AuthorityToOwner,
    /// Owner hands the house to an agent.
    OwnerToAgent,
    /// Agent lets the house to a leasee.
    AgentToLeasee,
}

impl TransferKind {
    /// Invocation name of this transfer.
    pub fn operation(&self) -> &'static str {
        match self {
            TransferKind::AuthorityToOwner => "authority_to_houseowner",
            TransferKind::OwnerToAgent => "houseowner_to_agent",
            TransferKind::AgentToLeasee => "agent_to_leasee",
        }
    }

    /// The table row for this transfer.
    pub fn rule(&self) -> &'static TransitionRule {
        match self {
            TransferKind::AuthorityToOwner => &TRANSITION_TABLE[0],
            TransferKind::OwnerToAgent => &TRANSITION_TABLE[1],
            TransferKind::AgentToLeasee => &TRANSITION_TABLE[2],
        }
    }
}

impl fmt::Display for TransferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation())
    }
}

/// One row of the transition table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionRule {
    /// Transfer this row implements.
    pub kind: TransferKind,
    /// Required current state.
    pub from: LifecycleState,
    /// Required caller affiliation.
    pub caller_role: Affiliation,
    /// Whether the caller must be the current owner.
    pub requires_current_owner: bool,
    /// Required recipient affiliation.
    pub recipient_role: Affiliation,
    /// Resulting state.
    pub to: LifecycleState,
    /// Whether the supplied price replaces `money`.
    pub records_price: bool,
}

/// The lifecycle, in forward order.
pub static TRANSITION_TABLE: [TransitionRule; 3] = [
    TransitionRule {
        kind: TransferKind::AuthorityToOwner,
        from: LifecycleState::Unassigned,
        caller_role: Affiliation::Regulator,
        requires_current_owner: false,
        recipient_role: Affiliation::HouseOwner,
        to: LifecycleState::HeldByOwner,
        records_price: false,
    },
    TransitionRule {
        kind: TransferKind::OwnerToAgent,
        from: LifecycleState::HeldByOwner,
        caller_role: Affiliation::HouseOwner,
        requires_current_owner: true,
        recipient_role: Affiliation::AgentCompany,
        to: LifecycleState::HeldByAgent,
        records_price: true,
    },
    TransitionRule {
        kind: TransferKind::AgentToLeasee,
        from: LifecycleState::HeldByAgent,
        caller_role: Affiliation::AgentCompany,
        requires_current_owner: true,
        recipient_role: Affiliation::Leasee,
        to: LifecycleState::HeldByLeasee,
        records_price: true,
    },
];

/// Find the row matching the house state and the caller's role.
pub fn lookup(state: LifecycleState, caller_role: Affiliation) -> Option<&'static TransitionRule> {
    TRANSITION_TABLE
        .iter()
        .find(|rule| rule.from == state && rule.caller_role == caller_role)
}

impl TransitionRule {
    /// Check the caller and recipient against this row.
    pub fn authorize(
        &self,
        house: &House,
        caller: &Caller,
        recipient: &Party,
    ) -> Result<(), LifecycleError> {
        let op = self.kind.operation();
        if house.status != self.from {
            return Err(LifecycleError::denied(
                op,
                format!(
                    "house {} is {}, requires {}",
                    house.house_id, house.status, self.from
                ),
            ));
        }
        if caller.affiliation != self.caller_role {
            return Err(LifecycleError::denied(
                op,
                format!(
                    "caller is {}, requires {}",
                    caller.affiliation, self.caller_role
                ),
            ));
        }
        if self.requires_current_owner && !house.is_owned_by(&caller.name) {
            return Err(LifecycleError::denied(
                op,
                format!(
                    "caller {} is not the current owner of {}",
                    caller.name, house.house_id
                ),
            ));
        }
        if recipient.affiliation != self.recipient_role {
            return Err(LifecycleError::denied(
                op,
                format!(
                    "recipient {} is {}, requires {}",
                    recipient.name, recipient.affiliation, self.recipient_role
                ),
            ));
        }
        Ok(())
    }

    /// Apply this row's effect to the house.
    ///
    /// Callers must have passed [`TransitionRule::authorize`] first.
    pub fn apply(
        &self,
        house: &mut House,
        recipient: &Party,
        price: Option<String>,
    ) -> Result<(), LifecycleError> {
        if self.records_price {
            let price = price.ok_or_else(|| LifecycleError::MissingPrice(self.kind.to_string()))?;
            house.money = Some(price);
        }
        house.owner = Some(recipient.name.clone());
        house.status = self.to;
        Ok(())
    }
}
