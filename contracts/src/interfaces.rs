//! External contract interfaces used by the vault and the staking pool.

use odra::prelude::*;
use odra::casper_types::U256;

/// CEP-18 token interface (elastic token, OHM, LP stake token)
#[odra::external_contract]
pub trait Cep18Token {
    fn transfer(&mut self, recipient: Address, amount: U256) -> bool;
    fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool;
    fn approve(&mut self, spender: Address, amount: U256) -> bool;
    fn allowance(&self, owner: Address, spender: Address) -> U256;
    fn balance_of(&self, account: Address) -> U256;
    fn total_supply(&self) -> U256;
}

/// Reward token with minter-gated issuance
#[odra::external_contract]
pub trait MintableToken {
    fn mint(&mut self, to: Address, amount: U256);
    fn burn(&mut self, amount: U256);
    fn transfer(&mut self, recipient: Address, amount: U256) -> bool;
    fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool;
    fn balance_of(&self, account: Address) -> U256;
}

/// Swap venue used to liquidate the stored surplus.
///
/// Pulls `amount_in` of `asset_in` from the caller via allowance and sends
/// the purchased `asset_out` back to the caller.
#[odra::external_contract]
pub trait TradeGateway {
    fn sell(&mut self, asset_in: Address, asset_out: Address, amount_in: U256, min_out: U256) -> U256;
}

/// Pool that distributes reward balances it receives
#[odra::external_contract]
pub trait RewardPool {
    fn forward(&mut self);
}

/// Token balance snapshot used for received-amount accounting
#[odra::odra_type]
#[derive(Default)]
pub struct BalanceSnapshot {
    /// Balance before operation
    pub before: U256,
    /// Balance after operation
    pub after: U256,
}

impl BalanceSnapshot {
    pub fn received(&self) -> U256 {
        self.after.saturating_sub(self.before)
    }

    /// Amount that left the account between the two reads
    pub fn spent(&self) -> U256 {
        self.before.saturating_sub(self.after)
    }
}
