//! Ledger events.
//!
//! Every successful state change appends exactly one event per logical
//! fact to the ledger's event log. Events are immutable once recorded and
//! carry a `sequence` that is strictly increasing across all event kinds.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount};

/// A single balance movement. Genesis is recorded as a movement from
/// [`Address::ZERO`] to the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub from: Address,
    pub to: Address,
    pub amount: Amount,
    /// Position in the ledger's global event sequence.
    pub sequence: u64,
}

/// The kind of fact an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Transfer,
    Approval,
    OwnershipTransferred,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transfer => write!(f, "TRANSFER"),
            Self::Approval => write!(f, "APPROVAL"),
            Self::OwnershipTransferred => write!(f, "OWNERSHIP_TRANSFERRED"),
        }
    }
}

/// An observable fact emitted by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    Transfer(TransferRecord),
    Approval {
        owner: Address,
        spender: Address,
        amount: Amount,
        sequence: u64,
    },
    OwnershipTransferred {
        previous_owner: Address,
        new_owner: Address,
        sequence: u64,
    },
}

impl LedgerEvent {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Transfer(_) => EventKind::Transfer,
            Self::Approval { .. } => EventKind::Approval,
            Self::OwnershipTransferred { .. } => EventKind::OwnershipTransferred,
        }
    }

    #[must_use]
    pub fn sequence(&self) -> u64 {
        match self {
            Self::Transfer(record) => record.sequence,
            Self::Approval { sequence, .. } | Self::OwnershipTransferred { sequence, .. } => {
                *sequence
            }
        }
    }

    /// The transfer record, if this is a transfer event.
    #[must_use]
    pub fn as_transfer(&self) -> Option<&TransferRecord> {
        match self {
            Self::Transfer(record) => Some(record),
            _ => None,
        }
    }
}
