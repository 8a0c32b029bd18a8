//! Common types used across the vault contracts.

use odra::prelude::*;
use odra::casper_types::account::AccountHash;
use odra::casper_types::U256;
use crate::errors::VaultError;

/// One day in milliseconds (Casper block time unit)
pub const DAY_MS: u64 = 86_400_000;

/// 10^9, scales 9-decimal elastic amounts to 18-decimal reward amounts
pub const DECIMAL_FACTOR: u64 = 1_000_000_000;

/// Vault lifecycle status
#[odra::odra_type]
#[derive(Copy)]
pub enum VaultStatus {
    /// Constructed, pools and treasury not bound yet
    Uninitialized,
    /// Pools and treasury bound, no trade gateway
    Initialized,
    /// Trade gateway bound, `sell` available
    Operational,
}

/// Rotatable vault address roles
#[odra::odra_type]
#[derive(Copy)]
pub enum AddressRole {
    /// Trade gateway used by `sell`
    Trader,
    /// Account allowed to call `rebase` and `sell`
    AuthorizedTrader,
}

/// Vault parameters.
///
/// Times are milliseconds, percentages are whole percent and the deposit fee
/// is in basis points.
#[odra::odra_type]
pub struct VaultConfig {
    /// Lock applied to each deposit entry
    pub lock_period: u64,
    /// Minimum spacing between two `rebase` calls
    pub rebase_period: u64,
    /// Delay between an address change request and its commit
    pub address_change_cooldown: u64,
    /// Elastic units per reward token minted on deposit
    pub deposit_rate: u64,
    /// Share of deposit mint sent to the treasury (bps)
    pub deposit_fee_bps: u32,
    /// Mint divisor after a negative rebase
    pub negative_rebase_rate: u64,
    /// Mint divisor after an equilibrium rebase
    pub equilibrium_rebase_rate: u64,
    /// Rebase mint share for vault EEFI rewards
    pub rebase_rewards_pct: u8,
    /// Rebase mint share for the LP staking pool
    pub rebase_lp_pct: u8,
    /// Surplus share sold for EEFI
    pub sell_eefi_pct: u8,
    /// Surplus share sold for OHM
    pub sell_ohm_pct: u8,
    /// Purchased EEFI share kept by the treasury (rest is burned)
    pub eefi_treasury_pct: u8,
    /// Purchased OHM share for vault OHM rewards
    pub ohm_rewards_pct: u8,
    /// Purchased OHM share for the LP staking pool
    pub ohm_lp_pct: u8,
    /// Rebase score bound
    pub score_cap: i64,
    pub positive_weight: i64,
    pub negative_weight: i64,
    /// Fixed score decrement applied on equilibrium
    pub equilibrium_penalty: i64,
    /// Minting allowed while score >= threshold
    pub minting_threshold: i64,
    /// EEFI minted to the treasury on `initialize`
    pub initial_mint: U256,
    /// Stored surplus must exceed this for `sell`
    pub min_sell_amount: U256,
    /// Decimals of the share unit used by the reward ledgers
    pub stake_decimals: u8,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            lock_period: 90 * DAY_MS,
            rebase_period: DAY_MS,
            address_change_cooldown: DAY_MS,
            deposit_rate: 10_000,
            deposit_fee_bps: 65,
            negative_rebase_rate: 100_000,
            equilibrium_rebase_rate: 10_000,
            rebase_rewards_pct: 45,
            rebase_lp_pct: 35,
            sell_eefi_pct: 45,
            sell_ohm_pct: 50,
            eefi_treasury_pct: 10,
            ohm_rewards_pct: 50,
            ohm_lp_pct: 35,
            score_cap: 1_000,
            positive_weight: 2,
            negative_weight: 1,
            equilibrium_penalty: 5,
            minting_threshold: -500,
            initial_mint: U256::from(170_000u64) * U256::from(10u64).pow(U256::from(18u64)),
            min_sell_amount: U256::zero(),
            stake_decimals: 9,
        }
    }
}

impl VaultConfig {
    pub fn validate(&self) -> Result<(), VaultError> {
        let splits_ok = self.rebase_rewards_pct as u16 + self.rebase_lp_pct as u16 <= 100
            && self.sell_eefi_pct as u16 + self.sell_ohm_pct as u16 <= 100
            && self.eefi_treasury_pct <= 100
            && self.ohm_rewards_pct as u16 + self.ohm_lp_pct as u16 <= 100
            && self.deposit_fee_bps <= 10_000;
        let rates_ok = self.deposit_rate > 0
            && self.negative_rebase_rate > 0
            && self.equilibrium_rebase_rate > 0
            && self.rebase_period > 0;
        let score_ok = self.score_cap >= 0
            && self.positive_weight >= 0
            && self.negative_weight >= 0
            && self.equilibrium_penalty >= 0
            && self.minting_threshold >= -self.score_cap
            && self.minting_threshold <= self.score_cap;

        if splits_ok && rates_ok && score_ok && self.stake_decimals <= 18 {
            Ok(())
        } else {
            Err(VaultError::InvalidConfig)
        }
    }
}

/// The all-zero account address, never a valid participant
pub fn zero_address() -> Address {
    Address::Account(AccountHash::default())
}

pub fn is_zero_address(address: &Address) -> bool {
    *address == zero_address()
}
