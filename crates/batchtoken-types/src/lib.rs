//! # batchtoken-types
//!
//! Shared types, errors, and configuration for the **batchtoken** ledger.
//!
//! This crate is the leaf dependency of the workspace. It defines:
//!
//! - **Identities**: [`Address`], the 20-byte holder identity, and [`Amount`]
//! - **Events**: [`LedgerEvent`], [`TransferRecord`]
//! - **Configuration**: [`TokenConfig`]
//! - **Unit conversion**: [`parse_units`], [`format_units`]
//! - **Errors**: [`LedgerError`] with `BT_ERR_` prefix codes
//! - **Constants**: system-wide limits and defaults

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod units;

// Re-export all primary types at crate root for ergonomic imports:
//   use batchtoken_types::{Address, Amount, LedgerError, TokenConfig, ...};

pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use units::*;

// Constants are accessed via `batchtoken_types::constants::FOO`
// (not re-exported to avoid name collisions).
