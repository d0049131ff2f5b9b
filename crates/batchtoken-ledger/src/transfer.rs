//! Transfer engine — the only balance-mutating primitive after genesis.
//!
//! A transfer is validated in full against the current store, then applied
//! as a single `move_balance` step followed by one Transfer record. A
//! rejected transfer touches neither the store nor the log.

use batchtoken_types::{Address, Amount, LedgerError, Result, TransferRecord};

use crate::allowance::AllowanceBook;
use crate::event_log::EventLog;
use crate::store::LedgerStore;

/// Applies single transfers against a borrowed store and event log.
pub struct TransferEngine<'a> {
    store: &'a mut LedgerStore,
    log: &'a mut EventLog,
}

impl<'a> TransferEngine<'a> {
    pub fn new(store: &'a mut LedgerStore, log: &'a mut EventLog) -> Self {
        Self { store, log }
    }

    /// Read-only view of the store being mutated.
    #[must_use]
    pub fn store(&self) -> &LedgerStore {
        self.store
    }

    /// Check a transfer without applying it.
    ///
    /// # Errors
    /// - `InvalidIdentity` if `from` or `to` is the zero address
    /// - `InvalidAmount` if `amount` is zero
    /// - `InsufficientBalance` if `from` cannot cover `amount`
    pub fn validate(store: &LedgerStore, from: Address, to: Address, amount: Amount) -> Result<()> {
        if from.is_zero() || to.is_zero() {
            return Err(LedgerError::InvalidIdentity { index: None });
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount { index: None });
        }
        let available = store.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    /// Validate and apply a transfer from `from` to `to`.
    pub fn transfer(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<TransferRecord> {
        Self::validate(self.store, from, to, amount)?;
        self.apply(from, to, amount)
    }

    /// Delegated transfer: `spender` moves `amount` from `from` to `to`
    /// against its allowance. The allowance is deducted only after the
    /// balance movement succeeded.
    ///
    /// # Errors
    /// `InsufficientAllowance`, then any error of [`Self::transfer`].
    pub fn transfer_from(
        &mut self,
        allowances: &mut AllowanceBook,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<TransferRecord> {
        allowances.require(from, spender, amount)?;
        Self::validate(self.store, from, to, amount)?;
        let record = self.apply(from, to, amount)?;
        allowances.consume(from, spender, amount)?;
        Ok(record)
    }

    /// Apply a transfer that has already been validated. The store still
    /// refuses an uncovered debit, so a failure here leaves it unchanged.
    pub(crate) fn apply(
        &mut self,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<TransferRecord> {
        self.store.move_balance(from, to, amount)?;
        let record = self.log.record_transfer(from, to, amount);
        tracing::debug!(
            from = %from,
            to = %to,
            amount,
            sequence = record.sequence,
            "Transfer applied"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    fn setup(supply: Amount) -> (LedgerStore, EventLog) {
        (LedgerStore::genesis(addr(1), supply).unwrap(), EventLog::new())
    }

    #[test]
    fn transfer_moves_balance_and_records() {
        let (mut store, mut log) = setup(1_000);
        let record = TransferEngine::new(&mut store, &mut log)
            .transfer(addr(1), addr(2), 250)
            .unwrap();
        assert_eq!(
            record,
            TransferRecord {
                from: addr(1),
                to: addr(2),
                amount: 250,
                sequence: 0
            }
        );
        assert_eq!(store.balance_of(addr(1)), 750);
        assert_eq!(store.balance_of(addr(2)), 250);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn zero_amount_rejected() {
        let (mut store, mut log) = setup(1_000);
        let err = TransferEngine::new(&mut store, &mut log)
            .transfer(addr(1), addr(2), 0)
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidAmount { index: None });
        assert_eq!(store.balance_of(addr(1)), 1_000);
        assert!(log.is_empty());
    }

    #[test]
    fn zero_recipient_rejected() {
        let (mut store, mut log) = setup(1_000);
        let err = TransferEngine::new(&mut store, &mut log)
            .transfer(addr(1), Address::ZERO, 1)
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidIdentity { index: None });
        assert!(log.is_empty());
    }

    #[test]
    fn insufficient_balance_rejected() {
        let (mut store, mut log) = setup(100);
        let err = TransferEngine::new(&mut store, &mut log)
            .transfer(addr(2), addr(3), 1)
            .unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientBalance {
                needed: 1,
                available: 0
            }
        );
        assert!(log.is_empty());
    }

    #[test]
    fn self_transfer_records_without_value_change() {
        let (mut store, mut log) = setup(100);
        TransferEngine::new(&mut store, &mut log)
            .transfer(addr(1), addr(1), 100)
            .unwrap();
        assert_eq!(store.balance_of(addr(1)), 100);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn transfer_from_consumes_allowance_on_success_only() {
        let (mut store, mut log) = setup(1_000);
        let mut allowances = AllowanceBook::new();
        allowances.approve(addr(1), addr(9), 300, &mut log).unwrap();

        let mut engine = TransferEngine::new(&mut store, &mut log);
        engine
            .transfer_from(&mut allowances, addr(9), addr(1), addr(2), 200)
            .unwrap();
        assert_eq!(allowances.allowance(addr(1), addr(9)), 100);

        // Over allowance: rejected before any balance check.
        let err = engine
            .transfer_from(&mut allowances, addr(9), addr(1), addr(2), 101)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));

        // Zero recipient: allowance untouched.
        let err = engine
            .transfer_from(&mut allowances, addr(9), addr(1), Address::ZERO, 50)
            .unwrap_err();
        assert_eq!(err, LedgerError::InvalidIdentity { index: None });
        assert_eq!(allowances.allowance(addr(1), addr(9)), 100);
        assert_eq!(engine.store().balance_of(addr(2)), 200);
    }

    #[test]
    fn transfer_from_insufficient_balance_keeps_allowance() {
        let (mut store, mut log) = setup(100);
        let mut allowances = AllowanceBook::new();
        allowances.approve(addr(1), addr(9), 500, &mut log).unwrap();

        let err = TransferEngine::new(&mut store, &mut log)
            .transfer_from(&mut allowances, addr(9), addr(1), addr(2), 200)
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        assert_eq!(allowances.allowance(addr(1), addr(9)), 500);
        assert_eq!(store.balance_of(addr(1)), 100);
    }
}
