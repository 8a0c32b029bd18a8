//! Timelocked deposit queue.
//!
//! Each depositor owns one queue of share entries. An entry can be withdrawn
//! once `lock_period` has passed since it was pushed. Withdrawals consume the
//! newest unlocked entries first and never touch locked ones.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;

/// A single deposit
#[odra::odra_type]
pub struct DepositEntry {
    /// Shares credited by the deposit
    pub amount: U256,
    /// Block time of the deposit (ms)
    pub timestamp: u64,
}

/// Per-account deposit queue
#[odra::odra_type]
#[derive(Default)]
pub struct DepositQueue {
    pub entries: Vec<DepositEntry>,
    /// Sum of all entry amounts
    pub total: U256,
}

impl DepositQueue {
    pub fn push(&mut self, amount: U256, now: u64) {
        self.entries.push(DepositEntry { amount, timestamp: now });
        self.total += amount;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shares withdrawable at `now`
    pub fn unlocked_total(&self, now: u64, lock_period: u64) -> U256 {
        self.entries
            .iter()
            .filter(|entry| Self::is_unlocked(entry, now, lock_period))
            .fold(U256::zero(), |acc, entry| acc + entry.amount)
    }

    /// Removes `requested` shares from unlocked entries, newest first.
    ///
    /// Fully consumed entries are swapped with the last entry and popped.
    /// Nothing is modified when an error is returned.
    pub fn pop_unlocked(&mut self, requested: U256, now: u64, lock_period: u64) -> Result<(), VaultError> {
        if requested.is_zero() {
            return Err(VaultError::InvalidAmount);
        }
        if requested > self.total {
            return Err(VaultError::InsufficientBalance);
        }

        let unlocked = self.unlocked_total(now, lock_period);
        if unlocked.is_zero() {
            return Err(VaultError::NoUnlockedDeposits);
        }
        if unlocked < requested {
            return Err(VaultError::InsufficientBalance);
        }

        let mut remaining = requested;
        let mut index = self.entries.len();
        while index > 0 && !remaining.is_zero() {
            index -= 1;
            if !Self::is_unlocked(&self.entries[index], now, lock_period) {
                continue;
            }

            let entry_amount = self.entries[index].amount;
            if entry_amount > remaining {
                self.entries[index].amount = entry_amount - remaining;
                remaining = U256::zero();
            } else {
                remaining -= entry_amount;
                // Entries above `index` were already visited, so the swapped-in
                // last entry is never revisited.
                self.entries.swap_remove(index);
            }
        }

        self.total -= requested;
        Ok(())
    }

    fn is_unlocked(entry: &DepositEntry, now: u64, lock_period: u64) -> bool {
        now.saturating_sub(entry.timestamp) >= lock_period
    }
}
