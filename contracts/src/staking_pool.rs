//! LP Staking Pool Contract
//!
//! Stakers lock an LP token and earn the LP share of vault profits in two
//! reward assets (EEFI and OHM), each tracked by its own dividend ledger.
//!
//! Profits arrive either through `distribute_eefi`/`distribute_ohm` (pulled
//! from the caller) or as plain transfers followed by `forward()`, which
//! distributes any balance the ledgers do not already owe.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::dividend::DividendLedger;
use crate::errors::VaultError;
use crate::events::{PoolStaked, PoolUnstaked, ProfitEefi, ProfitOhm};
use crate::interfaces::Cep18TokenContractRef;
use crate::types::is_zero_address;

/// LP Staking Pool Contract
#[odra::module(events = [PoolStaked, PoolUnstaked, ProfitEefi, ProfitOhm])]
pub struct StakingPool {
    /// LP token staked by users
    stake_token: Var<Address>,
    eefi_token: Var<Address>,
    ohm_token: Var<Address>,
    eefi_rewards: SubModule<DividendLedger>,
    ohm_rewards: SubModule<DividendLedger>,
}

#[odra::module]
impl StakingPool {
    pub fn init(&mut self, stake_token: Address, stake_decimals: u8, eefi_token: Address, ohm_token: Address) {
        for token in [&stake_token, &eefi_token, &ohm_token] {
            if is_zero_address(token) {
                self.env().revert(VaultError::InvalidAddress);
            }
        }
        self.stake_token.set(stake_token);
        self.eefi_token.set(eefi_token);
        self.ohm_token.set(ohm_token);
        self.eefi_rewards.init(stake_decimals);
        self.ohm_rewards.init(stake_decimals);
    }

    // ========== Staking ==========

    pub fn stake(&mut self, amount: U256) {
        let caller = self.env().caller();
        self.stake_for(caller, amount);
    }

    /// Stake on behalf of `account`, paid by the caller
    pub fn stake_for(&mut self, account: Address, amount: U256) {
        let payer = self.env().caller();

        self.eefi_rewards.stake_for(account, amount);
        self.ohm_rewards.stake_for(account, amount);
        let total = self.eefi_rewards.total_staked_for(account);
        self.env().emit_event(PoolStaked { account, amount, total });

        let token = self.address_of(&self.stake_token);
        let this = self.env().self_address();
        if !Cep18TokenContractRef::new(self.env().clone(), token).transfer_from(payer, this, amount) {
            self.env().revert(VaultError::TransferFailed);
        }
    }

    /// Return staked LP tokens; accrued rewards stay claimable
    pub fn unstake(&mut self, amount: U256) {
        let caller = self.env().caller();

        self.eefi_rewards.unstake_from(caller, amount);
        self.ohm_rewards.unstake_from(caller, amount);
        let total = self.eefi_rewards.total_staked_for(caller);
        self.env().emit_event(PoolUnstaked { account: caller, amount, total });

        let token = self.address_of(&self.stake_token);
        self.send(token, caller, amount);
    }

    // ========== Rewards ==========

    pub fn distribute_eefi(&mut self, amount: U256) {
        self.eefi_rewards.distribute(amount);
        self.env().emit_event(ProfitEefi { amount });

        let token = self.address_of(&self.eefi_token);
        self.pull(token, amount);
    }

    pub fn distribute_ohm(&mut self, amount: U256) {
        self.ohm_rewards.distribute(amount);
        self.env().emit_event(ProfitOhm { amount });

        let token = self.address_of(&self.ohm_token);
        self.pull(token, amount);
    }

    /// Distribute reward balances received by plain transfer
    pub fn forward(&mut self) {
        let this = self.env().self_address();

        let eefi_token = self.address_of(&self.eefi_token);
        let eefi_balance = Cep18TokenContractRef::new(self.env().clone(), eefi_token).balance_of(this);
        let eefi_new = eefi_balance.saturating_sub(self.eefi_rewards.reserved());
        if !eefi_new.is_zero() {
            self.eefi_rewards.distribute(eefi_new);
            self.env().emit_event(ProfitEefi { amount: eefi_new });
        }

        let ohm_token = self.address_of(&self.ohm_token);
        let ohm_balance = Cep18TokenContractRef::new(self.env().clone(), ohm_token).balance_of(this);
        let ohm_new = ohm_balance.saturating_sub(self.ohm_rewards.reserved());
        if !ohm_new.is_zero() {
            self.ohm_rewards.distribute(ohm_new);
            self.env().emit_event(ProfitOhm { amount: ohm_new });
        }
    }

    /// Withdraw rewards accrued on `amount` staked units
    pub fn withdraw(&mut self, amount: U256) {
        let caller = self.env().caller();
        let eefi = self.eefi_rewards.withdraw_from(caller, amount);
        let ohm = self.ohm_rewards.withdraw_from(caller, amount);

        if !eefi.is_zero() {
            let token = self.address_of(&self.eefi_token);
            self.send(token, caller, eefi);
        }
        if !ohm.is_zero() {
            let token = self.address_of(&self.ohm_token);
            self.send(token, caller, ohm);
        }
    }

    // ========== Queries ==========

    /// Accrued rewards as (ohm, eefi)
    pub fn get_reward(&self, account: Address) -> (U256, U256) {
        (self.ohm_rewards.get_reward(account), self.eefi_rewards.get_reward(account))
    }

    pub fn total_staked(&self) -> U256 {
        self.eefi_rewards.total_staked()
    }

    pub fn total_staked_for(&self, account: Address) -> U256 {
        self.eefi_rewards.total_staked_for(account)
    }

    pub fn token(&self) -> Option<Address> {
        self.stake_token.get()
    }

    // ========== Internal Functions ==========

    fn address_of(&self, slot: &Var<Address>) -> Address {
        match slot.get() {
            Some(address) => address,
            None => self.env().revert(VaultError::NotInitialized),
        }
    }

    fn pull(&self, token: Address, amount: U256) {
        let payer = self.env().caller();
        let this = self.env().self_address();
        if !Cep18TokenContractRef::new(self.env().clone(), token).transfer_from(payer, this, amount) {
            self.env().revert(VaultError::TransferFailed);
        }
    }

    fn send(&self, token: Address, recipient: Address, amount: U256) {
        if !Cep18TokenContractRef::new(self.env().clone(), token).transfer(recipient, amount) {
            self.env().revert(VaultError::TransferFailed);
        }
    }
}
