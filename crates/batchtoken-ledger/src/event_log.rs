//! Append-only event log.
//!
//! Sequence numbers start at 0 and are shared across all event kinds, so
//! the sequence alone totally orders everything the ledger has emitted.

use batchtoken_types::{Address, Amount, LedgerEvent, TransferRecord};

/// Ordered record of everything the ledger has emitted.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<LedgerEvent>,
    next_sequence: u64,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transfer record and return it.
    pub fn record_transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> TransferRecord {
        let record = TransferRecord {
            from,
            to,
            amount,
            sequence: self.take_sequence(),
        };
        self.events.push(LedgerEvent::Transfer(record));
        record
    }

    pub fn record_approval(&mut self, owner: Address, spender: Address, amount: Amount) {
        let sequence = self.take_sequence();
        self.events.push(LedgerEvent::Approval {
            owner,
            spender,
            amount,
            sequence,
        });
    }

    pub fn record_ownership_transferred(&mut self, previous_owner: Address, new_owner: Address) {
        let sequence = self.take_sequence();
        self.events.push(LedgerEvent::OwnershipTransferred {
            previous_owner,
            new_owner,
            sequence,
        });
    }

    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Transfer records only, in emission order.
    pub fn transfers(&self) -> impl Iterator<Item = &TransferRecord> + '_ {
        self.events.iter().filter_map(LedgerEvent::as_transfer)
    }

    /// Events with `sequence >= from`.
    #[must_use]
    pub fn since(&self, from: u64) -> &[LedgerEvent] {
        let start = self.events.partition_point(|e| e.sequence() < from);
        &self.events[start..]
    }

    #[must_use]
    pub fn last(&self) -> Option<&LedgerEvent> {
        self.events.last()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Sequence the next appended event will receive.
    #[must_use]
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    fn take_sequence(&mut self) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        sequence
    }
}
