//! Surplus earmark for positive rebases.
//!
//! The surplus stays in the vault's own elastic balance. It is tracked in
//! shares so the earmark rebases together with the tokens it refers to.
//!
//! Growth is settled against the last supply the vault observed, so every
//! deposit or withdrawal sees depositor holdings with pending growth already
//! set aside. A supply drop is borne by depositors.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::elastic::{amount_for_shares, shares_for_amount};
use crate::errors::VaultError;
use crate::rebase::{surplus, RATIO_SCALE};

#[odra::odra_type]
#[derive(Default)]
pub struct TokenStorage {
    /// Earmarked surplus, in shares
    pub shares: U256,
    /// Raw amount stored over the vault's lifetime
    pub lifetime_stored: U256,
    /// Raw amount drained by sales over the vault's lifetime
    pub lifetime_sold: U256,
    /// Elastic supply at the last settlement
    pub settled_supply: U256,
}

impl TokenStorage {
    /// Earmarks `amount` raw tokens at the given supply.
    pub fn store(&mut self, amount: U256, current_supply: U256) -> Result<(), VaultError> {
        self.shares += shares_for_amount(amount, current_supply)?;
        self.lifetime_stored += amount;
        Ok(())
    }

    /// Earmarks depositor growth since the last settled supply and returns
    /// the raw amount stored by this call.
    pub fn settle(&mut self, current_supply: U256, vault_balance: U256) -> Result<U256, VaultError> {
        if current_supply.is_zero() {
            return Err(VaultError::ZeroSupply);
        }
        let mut stored = U256::zero();
        if !self.settled_supply.is_zero() && current_supply > self.settled_supply {
            let holdings = self.holdings(current_supply, vault_balance)?;
            let ratio = self.settled_supply * U256::from(RATIO_SCALE) / current_supply;
            stored = surplus(holdings, ratio);
            if !stored.is_zero() {
                self.store(stored, current_supply)?;
            }
        }
        self.settled_supply = current_supply;
        Ok(stored)
    }

    /// Raw amount currently earmarked, capped by the vault balance.
    pub fn stored_amount(&self, current_supply: U256, vault_balance: U256) -> Result<U256, VaultError> {
        Ok(amount_for_shares(self.shares, current_supply)?.min(vault_balance))
    }

    /// Vault balance left for depositors once the earmark is removed.
    pub fn holdings(&self, current_supply: U256, vault_balance: U256) -> Result<U256, VaultError> {
        Ok(vault_balance - self.stored_amount(current_supply, vault_balance)?)
    }

    /// Clears the earmark and returns the raw amount it covered.
    pub fn drain(&mut self, current_supply: U256, vault_balance: U256) -> Result<U256, VaultError> {
        let amount = self.stored_amount(current_supply, vault_balance)?;
        self.shares = U256::zero();
        self.lifetime_sold += amount;
        Ok(amount)
    }
}
