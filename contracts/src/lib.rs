//! Elastic Vault Contracts
//!
//! Casper-native vault for a rebasing (elastic supply) token.
//!
//! ## Architecture
//!
//! - **ElasticVault**: Deposits, timelocked withdrawals, rebase handling and surplus sales
//! - **EefiToken**: CEP-18 reward token minted by the vault
//! - **StakingPool**: LP staking pool receiving its share of vault profits
//! - **DividendLedger**: Bond-value reward accounting shared by vault and pool
//!
//! ## Rebase Handling
//!
//! Every `rebase` compares the elastic supply with the last reconciled value:
//! - Positive: the surplus is earmarked and later sold for EEFI and OHM
//! - Negative / equilibrium: EEFI is minted while the rebase score allows it

#![cfg_attr(target_arch = "wasm32", no_std)]

#[cfg(target_arch = "wasm32")]
extern crate alloc;

// Re-export odra for downstream usage
pub use odra;

// Core module declarations
pub mod types;
pub mod errors;
pub mod events;
pub mod interfaces;
pub mod elastic;
pub mod rebase;
pub mod deposit_queue;
pub mod token_storage;
pub mod access_control;
pub mod cep18_ledger;

// Contract modules
pub mod dividend;
pub mod vault;
pub mod eefi_token;
pub mod staking_pool;
