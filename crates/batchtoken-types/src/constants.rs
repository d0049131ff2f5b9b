//! System-wide constants for the batchtoken ledger.

/// Conventional decimal precision for ERC20-style tokens.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Largest decimal precision whose scale factor (`10^decimals`) fits in an
/// [`Amount`](crate::Amount).
pub const MAX_DECIMALS: u8 = 38;

/// Maximum recipients accepted by a single batch distribution.
///
/// Each recipient costs one balance write and one event, so the batch size
/// bounds the work done by a single invocation.
pub const MAX_BATCH_RECIPIENTS: usize = 500;

/// Allowance value treated as "unlimited": `transfer_from` never decrements it.
pub const UNLIMITED_ALLOWANCE: u128 = u128::MAX;

/// Length of a holder identity in bytes.
pub const ADDRESS_LEN: usize = 20;

/// Domain separator mixed into the ledger state digest.
pub const STATE_DIGEST_DOMAIN: &[u8] = b"batchtoken-ledger-state-v1";
