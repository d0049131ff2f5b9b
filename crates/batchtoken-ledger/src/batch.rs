//! Batch distribution — owner-gated, all-or-nothing, multi-recipient transfer.
//!
//! Each invocation is a miniature transaction:
//!
//! ```text
//! Validating ──ok──► Applying ──► Committed
//!     │
//!     └──err──► Rejected
//! ```
//!
//! Validation covers the whole batch before the first mutation:
//! 1. Caller is the owner (`Unauthorized`)
//! 2. Equal list lengths (`LengthMismatch`)
//! 3. Non-empty (`EmptyBatch`) and within the recipient cap (`BatchTooLarge`)
//! 4. Per index, in order: non-zero recipient (`InvalidIdentity`), then
//!    non-zero amount (`InvalidAmount`)
//! 5. Checked running sum (`Overflow`) covered by the caller's balance
//!    (`InsufficientBalance`)
//!
//! Once validation passes no transfer can fail: the source covers the sum,
//! and no recipient can overflow because every balance is bounded by the
//! total supply. Transfers are then applied in list order, duplicates
//! included, one Transfer record each.

use std::fmt;

use batchtoken_types::{constants, Address, Amount, LedgerError, Result, TransferRecord};
use serde::{Deserialize, Serialize};

use crate::access::AccessController;
use crate::store::LedgerStore;
use crate::transfer::TransferEngine;

/// Lifecycle of one batch invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchPhase {
    Validating,
    Applying,
    Committed,
    Rejected,
}

impl fmt::Display for BatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validating => write!(f, "VALIDATING"),
            Self::Applying => write!(f, "APPLYING"),
            Self::Committed => write!(f, "COMMITTED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

/// Outcome of a committed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReceipt {
    pub source: Address,
    /// One record per (recipient, amount) pair, in input order.
    pub records: Vec<TransferRecord>,
    /// Sum of all amounts debited from `source`.
    pub total: Amount,
}

impl BatchReceipt {
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Validates and applies batch distributions on behalf of the owner.
pub struct BatchDistributor<'a> {
    access: &'a AccessController,
    max_recipients: usize,
}

impl<'a> BatchDistributor<'a> {
    #[must_use]
    pub fn new(access: &'a AccessController) -> Self {
        Self {
            access,
            max_recipients: constants::MAX_BATCH_RECIPIENTS,
        }
    }

    /// Override the recipient cap.
    #[must_use]
    pub fn with_max_recipients(mut self, max_recipients: usize) -> Self {
        self.max_recipients = max_recipients;
        self
    }

    /// Run the whole-batch pre-check without mutating anything.
    /// Returns the batch total on success.
    pub fn validate(
        &self,
        store: &LedgerStore,
        caller: Address,
        recipients: &[Address],
        amounts: &[Amount],
    ) -> Result<Amount> {
        self.access.require_owner(caller)?;

        if recipients.len() != amounts.len() {
            return Err(LedgerError::LengthMismatch {
                recipients: recipients.len(),
                amounts: amounts.len(),
            });
        }
        if recipients.is_empty() {
            return Err(LedgerError::EmptyBatch);
        }
        if recipients.len() > self.max_recipients {
            return Err(LedgerError::BatchTooLarge {
                len: recipients.len(),
                max: self.max_recipients,
            });
        }

        let mut total: Amount = 0;
        for (index, (recipient, amount)) in recipients.iter().zip(amounts).enumerate() {
            if recipient.is_zero() {
                return Err(LedgerError::InvalidIdentity { index: Some(index) });
            }
            if *amount == 0 {
                return Err(LedgerError::InvalidAmount { index: Some(index) });
            }
            total = total.checked_add(*amount).ok_or(LedgerError::Overflow)?;
        }

        let available = store.balance_of(caller);
        if total > available {
            return Err(LedgerError::InsufficientBalance {
                needed: total,
                available,
            });
        }
        Ok(total)
    }

    /// Validate the whole batch, then apply every transfer in order.
    ///
    /// # Errors
    /// Any precondition error listed in the module docs. On error the store
    /// and event log are unchanged.
    pub fn distribute(
        &self,
        engine: &mut TransferEngine<'_>,
        caller: Address,
        recipients: &[Address],
        amounts: &[Amount],
    ) -> Result<BatchReceipt> {
        tracing::debug!(
            phase = %BatchPhase::Validating,
            caller = %caller,
            recipients = recipients.len(),
            "Batch distribution started"
        );

        let total = match self.validate(engine.store(), caller, recipients, amounts) {
            Ok(total) => total,
            Err(err) => {
                tracing::warn!(
                    phase = %BatchPhase::Rejected,
                    caller = %caller,
                    recipients = recipients.len(),
                    error = %err,
                    "Batch distribution rejected"
                );
                return Err(err);
            }
        };

        tracing::debug!(phase = %BatchPhase::Applying, total, "Batch validated");

        let mut records = Vec::with_capacity(recipients.len());
        for (recipient, amount) in recipients.iter().zip(amounts) {
            records.push(engine.apply(caller, *recipient, *amount)?);
        }

        tracing::info!(
            phase = %BatchPhase::Committed,
            source = %caller,
            transfers = records.len(),
            total,
            "Batch distribution committed"
        );

        Ok(BatchReceipt {
            source: caller,
            records,
            total,
        })
    }
}
