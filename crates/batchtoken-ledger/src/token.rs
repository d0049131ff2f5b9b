//! The token facade: external entry points over the ledger components.
//!
//! Every entry point takes the invoking identity as `caller`; authenticating
//! that identity is the host environment's job. Mutating entry points take
//! `&mut self`, so invocations are totally ordered and each one runs against
//! the state committed by the previous one.

use batchtoken_types::{
    format_units, parse_units, Address, Amount, LedgerEvent, Result, TokenConfig, TransferRecord,
};

use crate::access::AccessController;
use crate::allowance::AllowanceBook;
use crate::batch::{BatchDistributor, BatchReceipt};
use crate::event_log::EventLog;
use crate::store::LedgerStore;
use crate::supply_conservation::SupplyConservation;
use crate::transfer::TransferEngine;

/// A deployed ERC20-style token with owner-gated batch distribution.
#[derive(Debug, Clone)]
pub struct Token {
    name: String,
    symbol: String,
    decimals: u8,
    store: LedgerStore,
    access: AccessController,
    allowances: AllowanceBook,
    log: EventLog,
    supply: SupplyConservation,
}

impl Token {
    /// Deploy a token: validate the config, mint the scaled supply to the
    /// owner and record the genesis events (ownership, then mint).
    ///
    /// # Errors
    /// Any error of [`TokenConfig::validate`].
    pub fn deploy(config: TokenConfig) -> Result<Self> {
        config.validate()?;
        let supply = config.scaled_supply()?;

        let store = LedgerStore::genesis(config.owner, supply)?;
        let access = AccessController::new(config.owner)?;
        let mut log = EventLog::new();
        log.record_ownership_transferred(Address::ZERO, config.owner);
        log.record_transfer(Address::ZERO, config.owner, supply);

        tracing::info!(
            name = %config.name,
            symbol = %config.symbol,
            decimals = config.decimals,
            total_supply = supply,
            owner = %config.owner,
            "Token deployed"
        );

        Ok(Self {
            name: config.name,
            symbol: config.symbol,
            decimals: config.decimals,
            store,
            access,
            allowances: AllowanceBook::new(),
            log,
            supply: SupplyConservation::new(supply),
        })
    }

    // -----------------------------------------------------------------
    // Read-only entry points
    // -----------------------------------------------------------------

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    #[must_use]
    pub fn total_supply(&self) -> Amount {
        self.store.total_supply()
    }

    #[must_use]
    pub fn balance_of(&self, holder: Address) -> Amount {
        self.store.balance_of(holder)
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.access.owner()
    }

    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances.allowance(owner, spender)
    }

    // -----------------------------------------------------------------
    // Mutating entry points
    // -----------------------------------------------------------------

    /// Move `amount` from `caller` to `to`.
    pub fn transfer(
        &mut self,
        caller: Address,
        to: Address,
        amount: Amount,
    ) -> Result<TransferRecord> {
        TransferEngine::new(&mut self.store, &mut self.log).transfer(caller, to, amount)
    }

    /// Let `spender` move up to `amount` of `caller`'s balance.
    pub fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> Result<()> {
        self.allowances.approve(caller, spender, amount, &mut self.log)
    }

    pub fn increase_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        added: Amount,
    ) -> Result<()> {
        self.allowances
            .increase(caller, spender, added, &mut self.log)
    }

    pub fn decrease_allowance(
        &mut self,
        caller: Address,
        spender: Address,
        subtracted: Amount,
    ) -> Result<()> {
        self.allowances
            .decrease(caller, spender, subtracted, &mut self.log)
    }

    /// Move `amount` from `from` to `to`, spending `caller`'s allowance.
    pub fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<TransferRecord> {
        TransferEngine::new(&mut self.store, &mut self.log).transfer_from(
            &mut self.allowances,
            caller,
            from,
            to,
            amount,
        )
    }

    /// Owner-only: send `amounts[i]` to `recipients[i]` for every `i`, all or
    /// nothing.
    pub fn batch_distribute(
        &mut self,
        caller: Address,
        recipients: &[Address],
        amounts: &[Amount],
    ) -> Result<BatchReceipt> {
        let mut engine = TransferEngine::new(&mut self.store, &mut self.log);
        BatchDistributor::new(&self.access).distribute(&mut engine, caller, recipients, amounts)
    }

    /// Owner-only: hand ownership (and batch rights) to `new_owner`.
    pub fn transfer_ownership(&mut self, caller: Address, new_owner: Address) -> Result<()> {
        self.access
            .transfer_ownership(caller, new_owner, &mut self.log)
    }

    // -----------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------

    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        self.log.events()
    }

    #[must_use]
    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    #[must_use]
    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Digest of all balances; unchanged by any failed call.
    #[must_use]
    pub fn state_digest(&self) -> [u8; 32] {
        self.store.state_digest()
    }

    /// Check `Σ balances == total_supply`.
    pub fn verify_conservation(&self) -> Result<()> {
        self.supply.verify_store(&self.store)
    }

    /// Render base units in this token's precision (e.g. `"1000.5"`).
    pub fn format_amount(&self, amount: Amount) -> Result<String> {
        format_units(amount, self.decimals)
    }

    /// Parse a human-readable quantity into this token's base units.
    pub fn parse_amount(&self, value: &str) -> Result<Amount> {
        parse_units(value, self.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use batchtoken_types::{EventKind, LedgerError};

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    fn deploy(initial_supply: Amount, decimals: u8) -> Token {
        let config =
            TokenConfig::new("My Token", "MTK", initial_supply, addr(1)).with_decimals(decimals);
        Token::deploy(config).unwrap()
    }

    #[test]
    fn deploy_exposes_metadata_and_supply() {
        let token = deploy(1_000_000, 18);
        assert_eq!(token.name(), "My Token");
        assert_eq!(token.symbol(), "MTK");
        assert_eq!(token.decimals(), 18);
        assert_eq!(token.total_supply(), 1_000_000 * 10u128.pow(18));
        assert_eq!(token.balance_of(addr(1)), token.total_supply());
        assert_eq!(token.balance_of(addr(2)), 0);
        assert_eq!(token.owner(), addr(1));
        token.verify_conservation().unwrap();
    }

    #[test]
    fn deploy_records_genesis_events() {
        let token = deploy(5, 0);
        let kinds: Vec<EventKind> = token.events().iter().map(LedgerEvent::kind).collect();
        assert_eq!(kinds, vec![EventKind::OwnershipTransferred, EventKind::Transfer]);
        let mint = token.event_log().transfers().next().copied().unwrap();
        assert_eq!(mint.from, Address::ZERO);
        assert_eq!(mint.to, addr(1));
        assert_eq!(mint.amount, 5);
    }

    #[test]
    fn deploy_rejects_zero_owner() {
        let err = Token::deploy(TokenConfig::new("T", "T", 1, Address::ZERO)).unwrap_err();
        assert_eq!(err, LedgerError::InvalidIdentity { index: None });
    }

    #[test]
    fn amount_helpers_use_token_decimals() {
        let token = deploy(1, 6);
        assert_eq!(token.parse_amount("2.5").unwrap(), 2_500_000);
        assert_eq!(token.format_amount(2_500_000).unwrap(), "2.5");
    }

    #[test]
    fn ownership_transfer_moves_batch_rights() {
        let mut token = deploy(100, 0);
        token.transfer_ownership(addr(1), addr(2)).unwrap();
        assert_eq!(token.owner(), addr(2));

        // Old owner still holds the funds but may no longer batch.
        let err = token.batch_distribute(addr(1), &[addr(3)], &[1]).unwrap_err();
        assert_eq!(err, LedgerError::Unauthorized { caller: addr(1) });

        // New owner may batch but has no balance yet.
        let err = token.batch_distribute(addr(2), &[addr(3)], &[1]).unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientBalance { .. }));
        token.transfer(addr(1), addr(2), 10).unwrap();
        token.batch_distribute(addr(2), &[addr(3)], &[10]).unwrap();
        assert_eq!(token.balance_of(addr(3)), 10);
        token.verify_conservation().unwrap();
    }
}
