//! Supply conservation invariant checker.
//!
//! Invariant enforced at every observation point:
//! ```text
//! Σ balance_of(h) for all holders h == total_supply
//! ```
//!
//! Total supply is fixed at genesis (there is no mint or burn), so the
//! expected value is recorded once and every later check compares the live
//! balance sum against it. A violation means something has gone
//! catastrophically wrong and is reported as `SupplyInvariantViolation`.

use batchtoken_types::{Amount, LedgerError, Result};

use crate::store::LedgerStore;

/// Holds the genesis supply and validates conservation against it.
#[derive(Debug, Clone, Copy)]
pub struct SupplyConservation {
    expected: Amount,
}

impl SupplyConservation {
    #[must_use]
    pub fn new(expected: Amount) -> Self {
        Self { expected }
    }

    #[must_use]
    pub fn expected_supply(&self) -> Amount {
        self.expected
    }

    /// Compare an observed balance sum against the genesis supply.
    ///
    /// # Errors
    /// Returns [`LedgerError::SupplyInvariantViolation`] if `actual ≠ expected`.
    pub fn verify(&self, actual: Amount) -> Result<()> {
        if actual != self.expected {
            return Err(LedgerError::SupplyInvariantViolation {
                reason: format!(
                    "balance sum {actual} != expected supply {}",
                    self.expected
                ),
            });
        }
        Ok(())
    }

    /// Check a live store: its recorded total supply and its balance sum
    /// must both equal the genesis supply.
    pub fn verify_store(&self, store: &LedgerStore) -> Result<()> {
        if store.total_supply() != self.expected {
            return Err(LedgerError::SupplyInvariantViolation {
                reason: format!(
                    "total supply changed from {} to {}",
                    self.expected,
                    store.total_supply()
                ),
            });
        }
        let actual = store
            .circulating_sum()
            .map_err(|_| LedgerError::SupplyInvariantViolation {
                reason: "balance sum overflows".into(),
            })?;
        self.verify(actual)
    }
}
