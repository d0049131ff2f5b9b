//! Ledger store: per-holder balances and the fixed total supply.
//!
//! A zero balance is equivalent to absence, so zero entries are pruned.
//! All mutations are atomic: either the full operation succeeds or
//! the store is unchanged.

use std::collections::HashMap;

use batchtoken_types::{constants, Address, Amount, LedgerError, Result};
use sha2::{Digest, Sha256};

/// Source of truth for all balance state.
///
/// The supply is minted once, to a single holder, by [`LedgerStore::genesis`].
/// After that the only way balances change is [`LedgerStore::move_balance`]
/// (or a `debit`/`credit` pair), so `Σ balances == total_supply` holds at
/// every observation point.
#[derive(Debug, Clone)]
pub struct LedgerStore {
    /// Per-holder balances. Never contains a zero entry.
    balances: HashMap<Address, Amount>,
    /// Fixed at genesis.
    total_supply: Amount,
}

impl LedgerStore {
    /// Create the store with `supply` credited to `holder`. This is the sole
    /// minting event.
    ///
    /// # Errors
    /// Returns `InvalidIdentity` if `holder` is the zero address.
    pub fn genesis(holder: Address, supply: Amount) -> Result<Self> {
        if holder.is_zero() {
            return Err(LedgerError::InvalidIdentity { index: None });
        }
        let mut balances = HashMap::new();
        if supply > 0 {
            balances.insert(holder, supply);
        }
        Ok(Self {
            balances,
            total_supply: supply,
        })
    }

    /// Balance of `holder`. Unknown holders have zero.
    #[must_use]
    pub fn balance_of(&self, holder: Address) -> Amount {
        self.balances.get(&holder).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Increase `holder`'s balance.
    ///
    /// # Errors
    /// Returns `Overflow` if the new balance would not fit in an [`Amount`].
    pub fn credit(&mut self, holder: Address, amount: Amount) -> Result<()> {
        let updated = self
            .balance_of(holder)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.set_balance(holder, updated);
        Ok(())
    }

    /// Decrease `holder`'s balance.
    ///
    /// # Errors
    /// Returns `InsufficientBalance` if `amount > balance_of(holder)`.
    pub fn debit(&mut self, holder: Address, amount: Amount) -> Result<()> {
        let available = self.balance_of(holder);
        let updated = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        self.set_balance(holder, updated);
        Ok(())
    }

    /// Debit `from` and credit `to` as one step.
    ///
    /// Both new balances are computed before either is written, so a failure
    /// leaves both holders untouched. Moving to oneself only checks the
    /// balance.
    ///
    /// # Errors
    /// - `InsufficientBalance` if `from` cannot cover `amount`
    /// - `Overflow` if `to`'s balance would overflow
    pub fn move_balance(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        let from_available = self.balance_of(from);
        let from_after =
            from_available
                .checked_sub(amount)
                .ok_or(LedgerError::InsufficientBalance {
                    needed: amount,
                    available: from_available,
                })?;
        if from == to {
            return Ok(());
        }
        let to_after = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;

        self.set_balance(from, from_after);
        self.set_balance(to, to_after);
        Ok(())
    }

    /// All holders with a non-zero balance, in no particular order.
    pub fn holders(&self) -> impl Iterator<Item = (Address, Amount)> + '_ {
        self.balances.iter().map(|(holder, amount)| (*holder, *amount))
    }

    /// Number of holders with a non-zero balance.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Sum of all balances.
    ///
    /// # Errors
    /// Returns `Overflow` if the sum does not fit, which can only happen if
    /// the conservation invariant is already broken.
    pub fn circulating_sum(&self) -> Result<Amount> {
        self.balances
            .values()
            .try_fold(0u128, |acc, amount| acc.checked_add(*amount))
            .ok_or(LedgerError::Overflow)
    }

    /// SHA-256 over the total supply and every (holder, balance) pair in
    /// address order. Two stores with equal balances have equal digests.
    #[must_use]
    pub fn state_digest(&self) -> [u8; 32] {
        let mut entries: Vec<(&Address, &Amount)> = self.balances.iter().collect();
        entries.sort_unstable_by_key(|(holder, _)| **holder);

        let mut hasher = Sha256::new();
        hasher.update(constants::STATE_DIGEST_DOMAIN);
        hasher.update(self.total_supply.to_le_bytes());
        for (holder, amount) in entries {
            hasher.update(holder.as_bytes());
            hasher.update(amount.to_le_bytes());
        }
        hasher.finalize().into()
    }

    /// Hex form of [`Self::state_digest`], for logs.
    #[must_use]
    pub fn state_digest_hex(&self) -> String {
        hex::encode(self.state_digest())
    }

    fn set_balance(&mut self, holder: Address, amount: Amount) {
        if amount == 0 {
            self.balances.remove(&holder);
        } else {
            self.balances.insert(holder, amount);
        }
    }
}
