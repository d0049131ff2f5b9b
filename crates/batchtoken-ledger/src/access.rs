//! Access controller: the single owner identity.

use batchtoken_types::{Address, LedgerError, Result};

use crate::event_log::EventLog;

/// Holds the owner identity and gates owner-only operations.
#[derive(Debug, Clone)]
pub struct AccessController {
    owner: Address,
}

impl AccessController {
    /// # Errors
    /// Returns `InvalidIdentity` if `owner` is the zero address.
    pub fn new(owner: Address) -> Result<Self> {
        if owner.is_zero() {
            return Err(LedgerError::InvalidIdentity { index: None });
        }
        Ok(Self { owner })
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Succeeds with no effect iff `caller` is the owner.
    ///
    /// # Errors
    /// Returns `Unauthorized` otherwise.
    pub fn require_owner(&self, caller: Address) -> Result<()> {
        if caller != self.owner {
            return Err(LedgerError::Unauthorized { caller });
        }
        Ok(())
    }

    /// Hand ownership to `new_owner` and record the change.
    ///
    /// # Errors
    /// - `Unauthorized` if `caller` is not the owner
    /// - `InvalidIdentity` if `new_owner` is the zero address
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
        log: &mut EventLog,
    ) -> Result<()> {
        self.require_owner(caller)?;
        if new_owner.is_zero() {
            return Err(LedgerError::InvalidIdentity { index: None });
        }

        let previous = std::mem::replace(&mut self.owner, new_owner);
        log.record_ownership_transferred(previous, new_owner);
        tracing::info!(
            previous_owner = %previous,
            new_owner = %new_owner,
            "Ownership transferred"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchtoken_types::LedgerEvent;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    #[test]
    fn owner_passes_gate() {
        let ac = AccessController::new(addr(1)).unwrap();
        assert_eq!(ac.owner(), addr(1));
        assert!(ac.require_owner(addr(1)).is_ok());
    }

    #[test]
    fn non_owner_rejected() {
        let ac = AccessController::new(addr(1)).unwrap();
        let err = ac.require_owner(addr(2)).unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized { caller: addr(2) });
    }

    #[test]
    fn zero_owner_rejected() {
        assert!(AccessController::new(Address::ZERO).is_err());
    }

    #[test]
    fn transfer_ownership_replaces_owner() {
        let mut ac = AccessController::new(addr(1)).unwrap();
        let mut log = EventLog::new();
        ac.transfer_ownership(addr(1), addr(2), &mut log).unwrap();
        assert_eq!(ac.owner(), addr(2));
        assert!(ac.require_owner(addr(1)).is_err());
        assert_eq!(
            log.last(),
            Some(&LedgerEvent::OwnershipTransferred {
                previous_owner: addr(1),
                new_owner: addr(2),
                sequence: 0
            })
        );
    }

    #[test]
    fn transfer_ownership_failures_change_nothing() {
        let mut ac = AccessController::new(addr(1)).unwrap();
        let mut log = EventLog::new();

        let err = ac.transfer_ownership(addr(3), addr(2), &mut log).unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized { caller: addr(3) });

        let err = ac
            .transfer_ownership(addr(1), Address::ZERO, &mut log)
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidIdentity { index: None });

        assert_eq!(ac.owner(), addr(1));
        assert!(log.is_empty());
    }
}
