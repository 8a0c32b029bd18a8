//! Rebase classification and reward policy.
//!
//! Compares the elastic supply against the last reconciled value, keeps a
//! bounded momentum score and derives every amount the vault moves after a
//! rebase or a sale:
//!
//! - positive rebase: the surplus share of holdings, set aside for `sell`
//! - negative or equilibrium rebase: reward tokens minted against holdings
//!   while the score is at or above the minting threshold
//! - fixed percentage splits, with the integer-division remainder always
//!   assigned to the treasury

use odra::prelude::*;
use odra::casper_types::U256;
use crate::errors::VaultError;
use crate::types::{VaultConfig, DECIMAL_FACTOR};

/// Fixed-point scale of the change ratio (1e18)
pub const RATIO_SCALE: u128 = 1_000_000_000_000_000_000;

/// Supply change direction
#[odra::odra_type]
#[derive(Copy)]
pub enum RebaseClass {
    Positive,
    Negative,
    Equilibrium,
}

/// Reconciled supply state, mutated only by `rebase`
#[odra::odra_type]
#[derive(Default)]
pub struct RebaseState {
    /// Elastic supply at the last rebase
    pub last_supply: U256,
    /// Block time of the last rebase (ms)
    pub last_rebase_call: u64,
    /// Block time of the last positive rebase (ms)
    pub last_positive: u64,
    /// Momentum score in [-cap, cap]
    pub rebase_score: i64,
}

/// Result of one rebase step
#[derive(Debug, Clone, PartialEq)]
pub struct RebaseOutcome {
    pub class: RebaseClass,
    pub previous_supply: U256,
    pub current_supply: U256,
    /// previous / current, scaled by `RATIO_SCALE`
    pub change_ratio: U256,
    pub score: i64,
    pub minting_allowed: bool,
}

impl RebaseState {
    pub fn new(supply: U256, now: u64) -> Self {
        Self {
            last_supply: supply,
            last_rebase_call: now,
            last_positive: now,
            rebase_score: 0,
        }
    }

    pub fn minting_allowed(&self, config: &VaultConfig) -> bool {
        self.rebase_score >= config.minting_threshold
    }

    /// Applies the supply observed at `now`.
    pub fn advance(&mut self, current_supply: U256, now: u64, config: &VaultConfig) -> Result<RebaseOutcome, VaultError> {
        if now.saturating_sub(self.last_rebase_call) < config.rebase_period {
            return Err(VaultError::CooldownNotElapsed);
        }
        if current_supply.is_zero() || self.last_supply.is_zero() {
            return Err(VaultError::ZeroSupply);
        }

        let previous_supply = self.last_supply;
        let change_ratio = previous_supply * U256::from(RATIO_SCALE) / current_supply;
        let class = classify(previous_supply, current_supply);
        let delta = score_delta(class, previous_supply, current_supply, config);
        self.rebase_score = clamp_score(self.rebase_score, delta, config.score_cap);

        self.last_supply = current_supply;
        self.last_rebase_call = now;
        if class == RebaseClass::Positive {
            self.last_positive = now;
        }

        Ok(RebaseOutcome {
            class,
            previous_supply,
            current_supply,
            change_ratio,
            score: self.rebase_score,
            minting_allowed: self.minting_allowed(config),
        })
    }
}

pub fn classify(last_supply: U256, current_supply: U256) -> RebaseClass {
    if current_supply > last_supply {
        RebaseClass::Positive
    } else if current_supply < last_supply {
        RebaseClass::Negative
    } else {
        RebaseClass::Equilibrium
    }
}

/// Signed score change for one rebase.
///
/// Positive and negative rebases move the score by their magnitude in
/// permille times the class weight. Equilibrium always subtracts a fixed
/// penalty so the score cannot be parked by skipping supply changes.
pub fn score_delta(class: RebaseClass, last_supply: U256, current_supply: U256, config: &VaultConfig) -> i64 {
    let cap = config.score_cap.max(0) as u64;
    let permille = if last_supply.is_zero() {
        cap
    } else {
        let diff = if current_supply > last_supply {
            current_supply - last_supply
        } else {
            last_supply - current_supply
        };
        let permille = diff * U256::from(1_000u64) / last_supply;
        if permille > U256::from(cap) { cap } else { permille.as_u64() }
    };
    let magnitude = permille as i64;

    match class {
        RebaseClass::Positive => magnitude.saturating_mul(config.positive_weight),
        RebaseClass::Negative => magnitude.saturating_mul(config.negative_weight).saturating_neg(),
        RebaseClass::Equilibrium => config.equilibrium_penalty.saturating_neg(),
    }
}

fn clamp_score(score: i64, delta: i64, cap: i64) -> i64 {
    let cap = cap.max(0);
    score.saturating_add(delta).clamp(-cap, cap)
}

/// Part of `holdings` created by a positive rebase.
pub fn surplus(holdings: U256, change_ratio: U256) -> U256 {
    let kept = holdings * change_ratio / U256::from(RATIO_SCALE);
    holdings.saturating_sub(kept)
}

/// Reward tokens minted after a non-positive rebase.
pub fn rebase_mint_amount(holdings: U256, class: RebaseClass, config: &VaultConfig) -> U256 {
    let rate = match class {
        RebaseClass::Positive => return U256::zero(),
        RebaseClass::Negative => config.negative_rebase_rate,
        RebaseClass::Equilibrium => config.equilibrium_rebase_rate,
    };
    holdings / U256::from(rate) * U256::from(DECIMAL_FACTOR)
}

/// Reward tokens minted for a deposit: (to depositor, fee to treasury).
pub fn deposit_mint(amount: U256, config: &VaultConfig) -> (U256, U256) {
    let to_mint = amount * U256::from(DECIMAL_FACTOR) / U256::from(config.deposit_rate);
    let fee = to_mint * U256::from(config.deposit_fee_bps) / U256::from(10_000u64);
    (to_mint - fee, fee)
}

pub fn percent(amount: U256, pct: u8) -> U256 {
    amount * U256::from(pct) / U256::from(100u64)
}

/// Destinations of reward tokens minted on rebase
#[derive(Debug, Clone, PartialEq)]
pub struct MintSplit {
    pub rewards: U256,
    pub staking_pool: U256,
    pub treasury: U256,
}

impl MintSplit {
    pub fn new(total: U256, config: &VaultConfig) -> Self {
        let rewards = percent(total, config.rebase_rewards_pct);
        let staking_pool = percent(total, config.rebase_lp_pct);
        Self { rewards, staking_pool, treasury: total - rewards - staking_pool }
    }
}

/// Allocation of the drained surplus
#[derive(Debug, Clone, PartialEq)]
pub struct SaleSplit {
    pub for_eefi: U256,
    pub for_ohm: U256,
    pub for_treasury: U256,
}

impl SaleSplit {
    pub fn new(stored: U256, config: &VaultConfig) -> Self {
        let for_eefi = percent(stored, config.sell_eefi_pct);
        let for_ohm = percent(stored, config.sell_ohm_pct);
        Self { for_eefi, for_ohm, for_treasury: stored - for_eefi - for_ohm }
    }
}

/// Allocation of purchased EEFI
#[derive(Debug, Clone, PartialEq)]
pub struct EefiSplit {
    pub treasury: U256,
    pub burn: U256,
}

impl EefiSplit {
    pub fn new(purchased: U256, config: &VaultConfig) -> Self {
        let treasury = percent(purchased, config.eefi_treasury_pct);
        Self { treasury, burn: purchased - treasury }
    }
}

/// Allocation of purchased OHM
#[derive(Debug, Clone, PartialEq)]
pub struct OhmSplit {
    pub rewards: U256,
    pub staking_pool: U256,
    pub treasury: U256,
}

impl OhmSplit {
    pub fn new(purchased: U256, config: &VaultConfig) -> Self {
        let rewards = percent(purchased, config.ohm_rewards_pct);
        let staking_pool = percent(purchased, config.ohm_lp_pct);
        Self { rewards, staking_pool, treasury: purchased - rewards - staking_pool }
    }
}
