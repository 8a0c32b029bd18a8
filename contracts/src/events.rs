//! Events emitted by the vault and the staking pool.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::rebase::RebaseClass;
use crate::types::AddressRole;

/// Elastic tokens deposited into the vault
#[odra::event]
pub struct Staked {
    pub account: Address,
    /// Raw elastic amount
    pub amount: U256,
    /// Shares credited
    pub shares: U256,
    /// Account shares after the deposit
    pub total_after: U256,
}

#[odra::event]
pub struct Withdrawal {
    pub account: Address,
    pub amount_paid: U256,
    pub remaining_entries: u32,
}

#[odra::event]
pub struct Claimed {
    pub account: Address,
    pub eefi: U256,
    pub ohm: U256,
}

#[odra::event]
pub struct RebaseScore {
    pub score: i64,
}

#[odra::event]
pub struct RebaseApplied {
    pub class: RebaseClass,
    pub previous_supply: U256,
    pub current_supply: U256,
    /// Surplus earmarked for sale (positive rebases)
    pub stored: U256,
    /// Reward tokens minted (non-positive rebases)
    pub minted: U256,
}

#[odra::event]
pub struct Burn {
    pub amount: U256,
}

#[odra::event]
pub struct ProfitEefi {
    pub amount: U256,
}

#[odra::event]
pub struct ProfitOhm {
    pub amount: U256,
}

#[odra::event]
pub struct SaleEefi {
    pub amount_in: U256,
    pub amount_out: U256,
}

#[odra::event]
pub struct SaleOhm {
    pub amount_in: U256,
    pub amount_out: U256,
}

#[odra::event]
pub struct VaultInitialized {
    pub staking_pool: Address,
    pub treasury: Address,
    pub initial_mint: U256,
}

#[odra::event]
pub struct AddressChangeRequested {
    pub role: AddressRole,
    pub address: Address,
    pub requested_at: u64,
}

#[odra::event]
pub struct AddressChanged {
    pub role: AddressRole,
    pub address: Address,
}

/// LP tokens staked in the staking pool
#[odra::event]
pub struct PoolStaked {
    pub account: Address,
    pub amount: U256,
    pub total: U256,
}

#[odra::event]
pub struct PoolUnstaked {
    pub account: Address,
    pub amount: U256,
    pub total: U256,
}
