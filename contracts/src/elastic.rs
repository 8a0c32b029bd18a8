//! Elastic supply share accounting.
//!
//! Converts raw elastic-token amounts into supply-invariant shares. Shares are
//! expressed against a fixed `MAX_SHARE_SUPPLY`, so a uniform rebase of the
//! underlying token changes the value of a share but never the share count.

use odra::casper_types::U256;
use crate::errors::VaultError;

/// Fixed share denominator: 10,000,000 * 10^12
pub const MAX_SHARE_SUPPLY: u128 = 10_000_000_000_000_000_000;

/// Shares minted for `amount` at the given elastic supply.
pub fn shares_for_amount(amount: U256, current_supply: U256) -> Result<U256, VaultError> {
    if current_supply.is_zero() {
        return Err(VaultError::ZeroSupply);
    }
    Ok(amount * U256::from(MAX_SHARE_SUPPLY) / current_supply)
}

/// Raw amount represented by `shares` at the given elastic supply.
pub fn amount_for_shares(shares: U256, current_supply: U256) -> Result<U256, VaultError> {
    if current_supply.is_zero() {
        return Err(VaultError::ZeroSupply);
    }
    Ok(shares * current_supply / U256::from(MAX_SHARE_SUPPLY))
}

/// Pro-rata part of `holdings` owned by `shares` out of `total_shares`.
///
/// Used for withdrawals once the surplus earmark has been separated from the
/// vault balance, so depositors never draw on tokens reserved for sale.
pub fn pro_rata_amount(shares: U256, total_shares: U256, holdings: U256) -> Result<U256, VaultError> {
    if total_shares.is_zero() || shares > total_shares {
        return Err(VaultError::InsufficientBalance);
    }
    Ok(holdings * shares / total_shares)
}
