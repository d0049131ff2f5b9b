//! # batchtoken-ledger
//!
//! The token ledger core: balances, ownership, allowances, single
//! transfers, and owner-gated atomic batch distribution.
//!
//! ## Architecture
//!
//! 1. **LedgerStore**: per-holder balances and the fixed total supply
//! 2. **AccessController**: the single owner identity and owner-only gating
//! 3. **AllowanceBook**: delegated-spend approvals per (owner, spender)
//! 4. **TransferEngine**: the only balance-mutating primitive after genesis
//! 5. **BatchDistributor**: validate-whole-batch, then apply-in-order
//! 6. **EventLog**: append-only, sequence-numbered ledger events
//! 7. **SupplyConservation**: `Σ balances == totalSupply` check
//!
//! [`Token`] wires these together behind the external entry points.
//!
//! ## Call Flow
//!
//! ```text
//! caller → Token.batch_distribute() → AccessController.require_owner()
//!        → BatchDistributor.validate() → TransferEngine.apply() × N → EventLog
//! ```
//!
//! Every mutating entry point takes `&mut Token`, so invocations against one
//! ledger are serialized by the borrow checker and each either commits fully
//! or returns an error with no state change.

pub mod access;
pub mod allowance;
pub mod batch;
pub mod event_log;
pub mod store;
pub mod supply_conservation;
pub mod token;
pub mod transfer;

pub use access::AccessController;
pub use allowance::AllowanceBook;
pub use batch::{BatchDistributor, BatchPhase, BatchReceipt};
pub use event_log::EventLog;
pub use store::LedgerStore;
pub use supply_conservation::SupplyConservation;
pub use token::Token;
pub use transfer::TransferEngine;
