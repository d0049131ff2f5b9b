//! Token deployment configuration.
//!
//! These are constructor-time parameters supplied by the deployment
//! tooling. There is no runtime reconfiguration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{constants, Address, Amount, LedgerError, Result};

/// Constructor parameters for a token ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Display name (e.g., "My Token").
    pub name: String,
    /// Ticker symbol (e.g., "MTK").
    pub symbol: String,
    /// Decimal precision of the base unit.
    #[serde(default = "default_decimals")]
    pub decimals: u8,
    /// Initial supply in whole tokens, before decimal scaling.
    pub initial_supply: Amount,
    /// Deployer identity. Receives the whole supply and ownership.
    pub owner: Address,
}

fn default_decimals() -> u8 {
    constants::DEFAULT_DECIMALS
}

impl TokenConfig {
    /// Create a config with the default 18 decimals.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        initial_supply: Amount,
        owner: Address,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals: constants::DEFAULT_DECIMALS,
            initial_supply,
            owner,
        }
    }

    /// Builder-style override of the decimal precision.
    #[must_use]
    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals;
        self
    }

    /// Parse a config from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check the parameters without deploying anything.
    ///
    /// # Errors
    /// - `Configuration` for an empty name/symbol or out-of-range decimals
    /// - `InvalidIdentity` for a zero owner
    /// - `Overflow` if the scaled supply does not fit in an [`Amount`]
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(LedgerError::Configuration("token name is empty".into()));
        }
        if self.symbol.trim().is_empty() {
            return Err(LedgerError::Configuration("token symbol is empty".into()));
        }
        if self.decimals > constants::MAX_DECIMALS {
            return Err(LedgerError::Configuration(format!(
                "decimals {} exceeds max {}",
                self.decimals,
                constants::MAX_DECIMALS
            )));
        }
        if self.owner.is_zero() {
            return Err(LedgerError::InvalidIdentity { index: None });
        }
        self.scaled_supply().map(|_| ())
    }

    /// Total supply in base units: `initial_supply × 10^decimals`.
    pub fn scaled_supply(&self) -> Result<Amount> {
        let factor = scale_factor(self.decimals)?;
        self.initial_supply
            .checked_mul(factor)
            .ok_or(LedgerError::Overflow)
    }
}

/// `10^decimals` as an [`Amount`].
pub fn scale_factor(decimals: u8) -> Result<Amount> {
    Amount::from(10u8)
        .checked_pow(u32::from(decimals))
        .ok_or(LedgerError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Address {
        Address::from_low_u64(0xD0)
    }

    #[test]
    fn scaled_supply_applies_decimals() {
        let cfg = TokenConfig::new("My Token", "MTK", 1_000_000, owner());
        assert_eq!(cfg.decimals, 18);
        assert_eq!(cfg.scaled_supply().unwrap(), 1_000_000 * 10u128.pow(18));

        let cfg = cfg.with_decimals(0);
        assert_eq!(cfg.scaled_supply().unwrap(), 1_000_000);
    }

    #[test]
    fn scaled_supply_overflow_rejected() {
        let cfg = TokenConfig::new("Big", "BIG", u128::MAX / 10, owner()).with_decimals(2);
        assert_eq!(cfg.scaled_supply().unwrap_err(), LedgerError::Overflow);
        assert_eq!(cfg.validate().unwrap_err(), LedgerError::Overflow);
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        let base = TokenConfig::new("My Token", "MTK", 1, owner());
        assert!(base.validate().is_ok());

        let mut cfg = base.clone();
        cfg.name = "  ".into();
        assert!(matches!(cfg.validate(), Err(LedgerError::Configuration(_))));

        let mut cfg = base.clone();
        cfg.symbol = String::new();
        assert!(matches!(cfg.validate(), Err(LedgerError::Configuration(_))));

        let cfg = base.clone().with_decimals(39);
        assert!(matches!(cfg.validate(), Err(LedgerError::Configuration(_))));

        let mut cfg = base;
        cfg.owner = Address::ZERO;
        assert_eq!(
            cfg.validate().unwrap_err(),
            LedgerError::InvalidIdentity { index: None }
        );
    }

    #[test]
    fn json_config_defaults_decimals() {
        let json = r#"{
            "name": "My Token",
            "symbol": "MTK",
            "initial_supply": 1000000,
            "owner": "0x00000000000000000000000000000000000000d0"
        }"#;
        let cfg = TokenConfig::from_json_str(json).unwrap();
        assert_eq!(cfg.decimals, 18);
        assert_eq!(cfg.owner, owner());
        assert_eq!(cfg.initial_supply, 1_000_000);
    }

    #[test]
    fn json_config_bad_owner_is_serialization_error() {
        let json = r#"{"name":"T","symbol":"T","initial_supply":1,"owner":"0x12"}"#;
        assert!(matches!(
            TokenConfig::from_json_str(json),
            Err(LedgerError::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = TokenConfig::from_json_file("/nonexistent/batchtoken.json").unwrap_err();
        assert!(matches!(err, LedgerError::Io(_)));
    }
}
