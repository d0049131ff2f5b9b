//! Holder identities and amounts.
//!
//! An [`Address`] is an opaque 20-byte value. The all-zero address is a
//! sentinel: nothing can be sent to it, spent from it, or made owner.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::ADDRESS_LEN;
use crate::{LedgerError, Result};

/// Token quantity in base units (`human × 10^decimals`).
pub type Amount = u128;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// Identity of a holder, spender or owner.
///
/// Serialized as a `0x`-prefixed lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Default)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero sentinel address.
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Whether this is the zero sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    /// Deterministic address whose low 8 bytes hold `n` big-endian.
    #[must_use]
    pub fn from_low_u64(n: u64) -> Self {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 8..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    /// Short form for log lines (`0x` + first 4 bytes).
    #[must_use]
    pub fn short(&self) -> String {
        format!("0x{}", hex::encode(&self.0[..4]))
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Address {
    /// Random non-zero address.
    #[must_use]
    pub fn random() -> Self {
        loop {
            let addr = Self(rand::random::<[u8; ADDRESS_LEN]>());
            if !addr.is_zero() {
                return addr;
            }
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl FromStr for Address {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let bytes = hex::decode(digits)
            .map_err(|e| LedgerError::Serialization(format!("invalid address {s:?}: {e}")))?;
        let bytes: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|v: Vec<u8>| {
            LedgerError::Serialization(format!(
                "invalid address {s:?}: expected {ADDRESS_LEN} bytes, got {}",
                v.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
