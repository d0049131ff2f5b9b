//! Delegated-spend approvals.
//!
//! Allowances are permissions, not funds: they never enter the supply sum.
//! An allowance of [`UNLIMITED_ALLOWANCE`] is never decremented by spending.

use std::collections::HashMap;

use batchtoken_types::constants::UNLIMITED_ALLOWANCE;
use batchtoken_types::{Address, Amount, LedgerError, Result};

use crate::event_log::EventLog;

/// Remaining approved amount per (owner, spender) pair.
#[derive(Debug, Clone, Default)]
pub struct AllowanceBook {
    /// Never contains a zero entry.
    allowances: HashMap<(Address, Address), Amount>,
}

impl AllowanceBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remaining amount `spender` may move out of `owner`'s balance.
    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances.get(&(owner, spender)).copied().unwrap_or(0)
    }

    /// Overwrite the allowance. Zero revokes.
    ///
    /// # Errors
    /// Returns `InvalidIdentity` if `owner` or `spender` is the zero address.
    pub fn approve(
        &mut self,
        owner: Address,
        spender: Address,
        amount: Amount,
        log: &mut EventLog,
    ) -> Result<()> {
        check_pair(owner, spender)?;
        self.set(owner, spender, amount);
        log.record_approval(owner, spender, amount);
        tracing::debug!(owner = %owner, spender = %spender, amount, "Allowance set");
        Ok(())
    }

    /// # Errors
    /// - `InvalidIdentity` for a zero owner or spender
    /// - `Overflow` if the allowance would exceed the amount range
    pub fn increase(
        &mut self,
        owner: Address,
        spender: Address,
        added: Amount,
        log: &mut EventLog,
    ) -> Result<()> {
        check_pair(owner, spender)?;
        let updated = self
            .allowance(owner, spender)
            .checked_add(added)
            .ok_or(LedgerError::Overflow)?;
        self.approve(owner, spender, updated, log)
    }

    /// # Errors
    /// - `InvalidIdentity` for a zero owner or spender
    /// - `InsufficientAllowance` if the allowance would go below zero
    pub fn decrease(
        &mut self,
        owner: Address,
        spender: Address,
        subtracted: Amount,
        log: &mut EventLog,
    ) -> Result<()> {
        check_pair(owner, spender)?;
        let available = self.allowance(owner, spender);
        let updated =
            available
                .checked_sub(subtracted)
                .ok_or(LedgerError::InsufficientAllowance {
                    needed: subtracted,
                    available,
                })?;
        self.approve(owner, spender, updated, log)
    }

    /// Check that `spender` may move `amount` from `owner`.
    ///
    /// # Errors
    /// Returns `InsufficientAllowance` if the allowance is lower than `amount`.
    pub fn require(&self, owner: Address, spender: Address, amount: Amount) -> Result<()> {
        let available = self.allowance(owner, spender);
        if available < amount {
            return Err(LedgerError::InsufficientAllowance {
                needed: amount,
                available,
            });
        }
        Ok(())
    }

    /// Deduct a completed delegated transfer. No event is emitted, matching
    /// the ERC20 convention that `transferFrom` only emits `Transfer`.
    ///
    /// # Errors
    /// Returns `InsufficientAllowance` if the allowance is lower than `amount`.
    pub fn consume(&mut self, owner: Address, spender: Address, amount: Amount) -> Result<()> {
        self.require(owner, spender, amount)?;
        let available = self.allowance(owner, spender);
        if available != UNLIMITED_ALLOWANCE {
            self.set(owner, spender, available - amount);
        }
        Ok(())
    }

    fn set(&mut self, owner: Address, spender: Address, amount: Amount) {
        if amount == 0 {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), amount);
        }
    }
}

fn check_pair(owner: Address, spender: Address) -> Result<()> {
    if owner.is_zero() || spender.is_zero() {
        return Err(LedgerError::InvalidIdentity { index: None });
    }
    Ok(())
}
