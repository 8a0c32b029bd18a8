//! Bond-value dividend ledger.
//!
//! Distributes a reward asset across a changing set of stakers in O(1):
//!
//! - `bond_value` grows by `amount * precision / total_staked` on every
//!   distribution, so a staker's pending reward is
//!   `(bond_value - snapshot) * stake / precision`
//! - every stake change first checkpoints pending rewards into `claimable`,
//!   then resets the snapshot, so rewards are never paid twice
//! - the indivisible remainder of a distribution is carried in
//!   `to_distribute` and added to the next one
//!
//! `reserved` tracks the reward asset the ledger still owes (distributed but
//! not withdrawn, remainder included). Owners use it to tell owed funds from
//! stray balances.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::types::is_zero_address;

/// Starting bond value
pub const INITIAL_BOND_VALUE: u64 = 1_000_000;

/// Global ledger state
#[odra::odra_type]
pub struct LedgerState {
    /// Accumulated reward per `precision` stake units
    pub bond_value: U256,
    /// Sum of all stakes
    pub total_staked: U256,
    /// Remainder carried to the next distribution
    pub to_distribute: U256,
    /// Number of accounts with a non-zero stake
    pub investor_count: u32,
    /// 10^stake_decimals
    pub precision: U256,
    /// Reward asset owed by the ledger
    pub reserved: U256,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Per-account stake record
#[odra::odra_type]
#[derive(Default)]
pub struct StakeRecord {
    pub amount: U256,
    pub bond_value_snapshot: U256,
    /// Rewards checkpointed by earlier stake changes
    pub claimable: U256,
}

impl LedgerState {
    pub fn new(stake_decimals: u8) -> Self {
        Self {
            bond_value: U256::from(INITIAL_BOND_VALUE),
            total_staked: U256::zero(),
            to_distribute: U256::zero(),
            investor_count: 0,
            precision: U256::from(10u64).pow(U256::from(stake_decimals)),
            reserved: U256::zero(),
        }
    }

    /// Reward accrued since the record's snapshot
    pub fn pending(&self, record: &StakeRecord) -> U256 {
        self.bond_value.saturating_sub(record.bond_value_snapshot) * record.amount / self.precision
    }

    /// Total reward currently withdrawable by the record's owner
    pub fn reward_of(&self, record: &StakeRecord) -> U256 {
        record.claimable + self.pending(record)
    }

    fn checkpoint(&self, record: &mut StakeRecord) {
        record.claimable += self.pending(record);
        record.bond_value_snapshot = self.bond_value;
    }

    pub fn stake(&mut self, account: &Address, record: &mut StakeRecord, amount: U256) -> Result<(), VaultError> {
        Self::check_input(account, amount)?;

        self.checkpoint(record);
        if record.amount.is_zero() {
            self.investor_count += 1;
        }
        record.amount += amount;
        self.total_staked += amount;
        Ok(())
    }

    pub fn unstake(&mut self, account: &Address, record: &mut StakeRecord, amount: U256) -> Result<(), VaultError> {
        Self::check_input(account, amount)?;
        if amount > record.amount {
            return Err(VaultError::InsufficientStake);
        }

        self.checkpoint(record);
        record.amount -= amount;
        self.total_staked -= amount;
        if record.amount.is_zero() {
            self.investor_count = self.investor_count.saturating_sub(1);
        }
        Ok(())
    }

    /// Distributes `amount` plus the carried remainder.
    ///
    /// Returns the bond value increment. With no stakers everything is held
    /// in `to_distribute`.
    pub fn distribute(&mut self, amount: U256) -> Result<U256, VaultError> {
        if amount.is_zero() {
            return Err(VaultError::InvalidAmount);
        }
        self.reserved += amount;

        let temp = self.to_distribute + amount;
        if self.total_staked.is_zero() {
            self.to_distribute = temp;
            return Ok(U256::zero());
        }

        let increment = temp * self.precision / self.total_staked;
        let distributed = increment * self.total_staked / self.precision;
        self.bond_value += increment;
        self.to_distribute = temp - distributed;
        Ok(increment)
    }

    /// Pays the accrued reward pro-rata to `amount` stake units.
    pub fn withdraw(&mut self, account: &Address, record: &mut StakeRecord, amount: U256) -> Result<U256, VaultError> {
        Self::check_input(account, amount)?;
        if amount > record.amount {
            return Err(VaultError::InsufficientStake);
        }

        self.checkpoint(record);
        let share = record.claimable * amount / record.amount;
        Ok(self.pay_out(record, share))
    }

    /// Pays everything accrued, including rewards of an emptied stake.
    pub fn withdraw_all(&mut self, account: &Address, record: &mut StakeRecord) -> Result<U256, VaultError> {
        if is_zero_address(account) {
            return Err(VaultError::InvalidAddress);
        }

        self.checkpoint(record);
        let share = record.claimable;
        Ok(self.pay_out(record, share))
    }

    fn pay_out(&mut self, record: &mut StakeRecord, share: U256) -> U256 {
        // Per-account flooring can exceed the floored total by dust
        let payout = share.min(self.reserved);
        record.claimable -= payout;
        self.reserved -= payout;
        payout
    }

    fn check_input(account: &Address, amount: U256) -> Result<(), VaultError> {
        if is_zero_address(account) {
            return Err(VaultError::InvalidAddress);
        }
        if amount.is_zero() {
            return Err(VaultError::InvalidAmount);
        }
        Ok(())
    }
}

/// Dividend ledger sub-module.
///
/// Holds accounting only; the owning contract moves the reward asset for
/// every payout returned here.
#[odra::module]
pub struct DividendLedger {
    state: Var<LedgerState>,
    stakes: Mapping<Address, StakeRecord>,
}

#[odra::module]
impl DividendLedger {
    pub fn init(&mut self, stake_decimals: u8) {
        self.state.set(LedgerState::new(stake_decimals));
    }

    pub fn stake_for(&mut self, account: Address, amount: U256) {
        let mut state = self.state();
        let mut record = self.record(&account);
        if let Err(error) = state.stake(&account, &mut record, amount) {
            self.env().revert(error);
        }
        self.stakes.set(&account, record);
        self.state.set(state);
    }

    pub fn unstake_from(&mut self, account: Address, amount: U256) {
        let mut state = self.state();
        let mut record = self.record(&account);
        if let Err(error) = state.unstake(&account, &mut record, amount) {
            self.env().revert(error);
        }
        self.stakes.set(&account, record);
        self.state.set(state);
    }

    pub fn distribute(&mut self, amount: U256) -> U256 {
        let mut state = self.state();
        let increment = match state.distribute(amount) {
            Ok(increment) => increment,
            Err(error) => self.env().revert(error),
        };
        self.state.set(state);
        increment
    }

    pub fn withdraw_from(&mut self, account: Address, amount: U256) -> U256 {
        let mut state = self.state();
        let mut record = self.record(&account);
        let payout = match state.withdraw(&account, &mut record, amount) {
            Ok(payout) => payout,
            Err(error) => self.env().revert(error),
        };
        self.stakes.set(&account, record);
        self.state.set(state);
        payout
    }

    pub fn withdraw_all(&mut self, account: Address) -> U256 {
        let mut state = self.state();
        let mut record = self.record(&account);
        let payout = match state.withdraw_all(&account, &mut record) {
            Ok(payout) => payout,
            Err(error) => self.env().revert(error),
        };
        self.stakes.set(&account, record);
        self.state.set(state);
        payout
    }

    pub fn get_reward(&self, account: Address) -> U256 {
        self.state().reward_of(&self.record(&account))
    }

    pub fn total_staked(&self) -> U256 {
        self.state().total_staked
    }

    pub fn total_staked_for(&self, account: Address) -> U256 {
        self.record(&account).amount
    }

    pub fn bond_value(&self) -> U256 {
        self.state().bond_value
    }

    pub fn to_distribute(&self) -> U256 {
        self.state().to_distribute
    }

    pub fn investor_count(&self) -> u32 {
        self.state().investor_count
    }

    pub fn reserved(&self) -> U256 {
        self.state().reserved
    }

    fn state(&self) -> LedgerState {
        self.state.get().unwrap_or_default()
    }

    fn record(&self, account: &Address) -> StakeRecord {
        self.stakes.get(account).unwrap_or_default()
    }
}
