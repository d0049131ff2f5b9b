//! Error types for the batchtoken ledger.
//!
//! All errors use the `BT_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Access control errors
//! - 2xx: Input validation errors
//! - 3xx: Balance errors
//! - 4xx: Batch distribution errors
//! - 5xx: Allowance errors
//! - 8xx: Invariant errors
//! - 9xx: General / internal errors
//!
//! Every error aborts the invocation that raised it with no state change.

use thiserror::Error;

use crate::{Address, Amount};

/// Central error enum for all ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    // =================================================================
    // Access Control Errors (1xx)
    // =================================================================
    /// The caller is not the owner and the operation is owner-only.
    #[error("BT_ERR_100: Unauthorized: {caller} is not the owner")]
    Unauthorized { caller: Address },

    // =================================================================
    // Input Errors (2xx)
    // =================================================================
    /// An identity was the zero sentinel. `index` is set when the identity
    /// came from a batch recipient list.
    #[error("BT_ERR_200: Invalid identity{}", at_index(.index))]
    InvalidIdentity { index: Option<usize> },

    /// An amount was zero. `index` is set for batch amounts.
    #[error("BT_ERR_201: Invalid amount{}", at_index(.index))]
    InvalidAmount { index: Option<usize> },

    // =================================================================
    // Balance Errors (3xx)
    // =================================================================
    /// Not enough balance to cover the debit.
    #[error("BT_ERR_300: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    /// Arithmetic would exceed the representable amount range.
    #[error("BT_ERR_301: Amount overflow")]
    Overflow,

    // =================================================================
    // Batch Errors (4xx)
    // =================================================================
    /// Recipient and amount lists differ in length.
    #[error("BT_ERR_400: Length mismatch: {recipients} recipients, {amounts} amounts")]
    LengthMismatch { recipients: usize, amounts: usize },

    /// The batch has no entries.
    #[error("BT_ERR_401: Empty batch")]
    EmptyBatch,

    /// The batch exceeds the per-invocation recipient cap.
    #[error("BT_ERR_402: Batch too large: {len} recipients, max {max}")]
    BatchTooLarge { len: usize, max: usize },

    // =================================================================
    // Allowance Errors (5xx)
    // =================================================================
    /// The spender's allowance does not cover the amount.
    #[error("BT_ERR_500: Insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: Amount, available: Amount },

    // =================================================================
    // Invariant Errors (8xx)
    // =================================================================
    /// Supply conservation invariant violated. Critical.
    #[error("BT_ERR_800: Supply invariant violation: {reason}")]
    SupplyInvariantViolation { reason: String },

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Invalid token configuration.
    #[error("BT_ERR_900: Configuration error: {0}")]
    Configuration(String),

    /// Serialization / deserialization error.
    #[error("BT_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// I/O error.
    #[error("BT_ERR_902: I/O error: {0}")]
    Io(String),
}

fn at_index(index: &Option<usize>) -> String {
    index.map_or_else(String::new, |i| format!(" at index {i}"))
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
