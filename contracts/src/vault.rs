//! Elastic Vault Contract
//!
//! Holds depositors' elastic tokens and turns supply changes into rewards:
//!
//! - deposits are converted to supply-independent shares and locked per entry
//! - a positive rebase earmarks the surplus, which `sell` later swaps for
//!   EEFI and OHM through the trade gateway
//! - a negative or equilibrium rebase mints EEFI while the rebase score
//!   allows it
//! - vault rewards are paid out through two dividend ledgers keyed on shares
//!
//! ## Roles
//!
//! - **Owner**: deployer; binds pools and rotates trader addresses
//! - **Authorized trader**: may call `rebase` and `sell`
//! - **Trader**: the trade gateway contract used by `sell`

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::access_control::AddressRotation;
use crate::deposit_queue::DepositQueue;
use crate::dividend::DividendLedger;
use crate::elastic::{pro_rata_amount, shares_for_amount};
use crate::errors::{OrRevert, VaultError};
use crate::events::{
    AddressChangeRequested, AddressChanged, Burn, Claimed, ProfitEefi, ProfitOhm,
    RebaseApplied, RebaseScore, SaleEefi, SaleOhm, Staked, VaultInitialized, Withdrawal,
};
use crate::interfaces::{
    BalanceSnapshot, Cep18TokenContractRef, MintableTokenContractRef, RewardPoolContractRef,
    TradeGatewayContractRef,
};
use crate::rebase::{
    deposit_mint, rebase_mint_amount, EefiSplit, MintSplit, OhmSplit, RebaseClass,
    RebaseState, SaleSplit,
};
use crate::token_storage::TokenStorage;
use crate::types::{is_zero_address, AddressRole, VaultConfig, VaultStatus};

/// Elastic Vault Contract
#[odra::module(events = [
    Staked, Withdrawal, Claimed, RebaseScore, RebaseApplied, Burn, ProfitEefi, ProfitOhm,
    SaleEefi, SaleOhm, VaultInitialized, AddressChangeRequested, AddressChanged
])]
pub struct ElasticVault {
    owner: Var<Address>,
    /// Rebasing token accepted as deposit
    elastic_token: Var<Address>,
    eefi_token: Var<Address>,
    ohm_token: Var<Address>,
    /// LP staking pool receiving its share of profits
    staking_pool: Var<Address>,
    treasury: Var<Address>,
    config: Var<VaultConfig>,
    status: Var<VaultStatus>,
    /// Trade gateway used by `sell`
    trader: Var<AddressRotation>,
    /// Account allowed to call `rebase` and `sell`
    authorized_trader: Var<AddressRotation>,
    rebase_state: Var<RebaseState>,
    storage: Var<TokenStorage>,
    /// account -> locked share entries
    deposits: Mapping<Address, DepositQueue>,
    eefi_rewards: SubModule<DividendLedger>,
    ohm_rewards: SubModule<DividendLedger>,
    /// Reentrancy guard for `rebase` and `sell`
    locked: Var<bool>,
}

#[odra::module]
impl ElasticVault {
    /// Initialize the vault; the deployer becomes owner and authorized trader
    pub fn init(&mut self, elastic_token: Address, eefi_token: Address, ohm_token: Address, config: VaultConfig) {
        config.validate().or_revert(&self.env());
        for token in [&elastic_token, &eefi_token, &ohm_token] {
            if is_zero_address(token) {
                self.env().revert(VaultError::InvalidAddress);
            }
        }

        let caller = self.env().caller();
        self.owner.set(caller);
        self.elastic_token.set(elastic_token);
        self.eefi_token.set(eefi_token);
        self.ohm_token.set(ohm_token);
        self.eefi_rewards.init(config.stake_decimals);
        self.ohm_rewards.init(config.stake_decimals);
        self.config.set(config);
        self.status.set(VaultStatus::Uninitialized);
        self.trader.set(AddressRotation::new(None));
        self.authorized_trader.set(AddressRotation::new(Some(caller)));
        self.storage.set(TokenStorage::default());
        self.locked.set(false);
    }

    /// Bind the staking pool and treasury, optionally the trade gateway, and
    /// mint the initial EEFI allocation to the treasury. Callable once.
    pub fn initialize(&mut self, staking_pool: Address, treasury: Address, trader: Option<Address>) {
        self.require_owner();
        if self.status() != VaultStatus::Uninitialized {
            self.env().revert(VaultError::AlreadyInitialized);
        }
        if is_zero_address(&staking_pool) || is_zero_address(&treasury) {
            self.env().revert(VaultError::InvalidAddress);
        }
        if trader.as_ref().is_some_and(is_zero_address) {
            self.env().revert(VaultError::InvalidAddress);
        }

        let supply = self.elastic().total_supply();
        if supply.is_zero() {
            self.env().revert(VaultError::ZeroSupply);
        }

        let config = self.config();
        self.rebase_state.set(RebaseState::new(supply, self.env().get_block_time()));
        self.storage.set(TokenStorage { settled_supply: supply, ..Default::default() });
        self.staking_pool.set(staking_pool);
        self.treasury.set(treasury);
        self.trader.set(AddressRotation::new(trader));
        self.status.set(if trader.is_some() {
            VaultStatus::Operational
        } else {
            VaultStatus::Initialized
        });

        self.env().emit_event(VaultInitialized {
            staking_pool,
            treasury,
            initial_mint: config.initial_mint,
        });

        if !config.initial_mint.is_zero() {
            self.eefi().mint(treasury, config.initial_mint);
        }
    }

    // ========== Address Rotation ==========

    pub fn set_trader_request(&mut self, trader: Address) {
        self.require_owner();
        self.require_initialized();
        let now = self.env().get_block_time();
        let mut rotation = self.trader.get_or_default();
        rotation.request(trader, now).or_revert(&self.env());
        self.trader.set(rotation);

        self.env().emit_event(AddressChangeRequested {
            role: AddressRole::Trader,
            address: trader,
            requested_at: now,
        });
    }

    /// Commit the pending trade gateway; the vault becomes operational
    pub fn set_trader(&mut self) {
        self.require_owner();
        self.require_initialized();
        let cooldown = self.config().address_change_cooldown;
        let mut rotation = self.trader.get_or_default();
        let trader = rotation.commit(self.env().get_block_time(), cooldown).or_revert(&self.env());
        self.trader.set(rotation);
        self.status.set(VaultStatus::Operational);

        self.env().emit_event(AddressChanged { role: AddressRole::Trader, address: trader });
    }

    pub fn set_authorized_trader_request(&mut self, account: Address) {
        self.require_owner();
        let now = self.env().get_block_time();
        let mut rotation = self.authorized_trader.get_or_default();
        rotation.request(account, now).or_revert(&self.env());
        self.authorized_trader.set(rotation);

        self.env().emit_event(AddressChangeRequested {
            role: AddressRole::AuthorizedTrader,
            address: account,
            requested_at: now,
        });
    }

    pub fn set_authorized_trader(&mut self) {
        self.require_owner();
        let cooldown = self.config().address_change_cooldown;
        let mut rotation = self.authorized_trader.get_or_default();
        let account = rotation.commit(self.env().get_block_time(), cooldown).or_revert(&self.env());
        self.authorized_trader.set(rotation);

        self.env().emit_event(AddressChanged { role: AddressRole::AuthorizedTrader, address: account });
    }

    // ========== Deposits ==========

    /// Deposit `amount` elastic tokens (requires allowance to the vault)
    pub fn make_deposit(&mut self, amount: U256) {
        self.require_initialized();
        if amount.is_zero() {
            self.env().revert(VaultError::InvalidAmount);
        }

        let account = self.env().caller();
        let now = self.env().get_block_time();
        let (supply, _) = self.settle_storage();
        let shares = shares_for_amount(amount, supply).or_revert(&self.env());
        if shares.is_zero() {
            self.env().revert(VaultError::InvalidAmount);
        }

        let mut queue = self.deposits.get(&account).unwrap_or_default();
        queue.push(shares, now);
        let total_after = queue.total;
        self.deposits.set(&account, queue);
        self.eefi_rewards.stake_for(account, shares);
        self.ohm_rewards.stake_for(account, shares);

        self.env().emit_event(Staked { account, amount, shares, total_after });

        let this = self.env().self_address();
        if !self.elastic().transfer_from(account, this, amount) {
            self.env().revert(VaultError::TransferFailed);
        }

        let config = self.config();
        if self.rebase_state().minting_allowed(&config) {
            let (to_depositor, fee) = deposit_mint(amount, &config);
            if !fee.is_zero() {
                let treasury = self.address_of(&self.treasury);
                self.eefi().mint(treasury, fee);
            }
            if !to_depositor.is_zero() {
                self.eefi().mint(account, to_depositor);
            }
        }
    }

    /// Withdraw `shares` from unlocked deposit entries
    pub fn withdraw(&mut self, shares: U256) {
        self.withdraw_internal(shares, U256::zero());
    }

    /// Same as `withdraw`, reverting when the payout is below `min_out`
    pub fn withdraw_underlying(&mut self, shares: U256, min_out: U256) {
        self.withdraw_internal(shares, min_out);
    }

    /// Pay out the caller's accrued EEFI and OHM rewards
    pub fn claim(&mut self) -> (U256, U256) {
        self.require_initialized();
        let account = self.env().caller();
        let eefi = self.eefi_rewards.withdraw_all(account);
        let ohm = self.ohm_rewards.withdraw_all(account);

        self.env().emit_event(Claimed { account, eefi, ohm });

        if !eefi.is_zero() && !self.eefi().transfer(account, eefi) {
            self.env().revert(VaultError::TransferFailed);
        }
        if !ohm.is_zero() {
            let ohm_token = self.address_of(&self.ohm_token);
            self.send(ohm_token, account, ohm);
        }
        (eefi, ohm)
    }

    // ========== Trader Operations ==========

    /// Reconcile the elastic supply change since the last rebase
    pub fn rebase(&mut self) {
        self.enter();
        self.require_authorized_trader();
        self.require_initialized();

        let config = self.config();
        let this = self.env().self_address();
        let supply = self.elastic().total_supply();
        let balance = self.elastic().balance_of(this);

        let mut storage = self.token_storage();
        let mut state = self.rebase_state();
        let outcome = state
            .advance(supply, self.env().get_block_time(), &config)
            .or_revert(&self.env());
        let stored = storage.settle(supply, balance).or_revert(&self.env());
        let holdings = storage.holdings(supply, balance).or_revert(&self.env());

        let mut minted = U256::zero();
        let mut split = None;
        match outcome.class {
            RebaseClass::Negative | RebaseClass::Equilibrium if outcome.minting_allowed => {
                minted = rebase_mint_amount(holdings, outcome.class, &config);
                if !minted.is_zero() {
                    let mint = MintSplit::new(minted, &config);
                    if !mint.rewards.is_zero() {
                        self.eefi_rewards.distribute(mint.rewards);
                    }
                    split = Some(mint);
                }
            }
            _ => {}
        }
        self.rebase_state.set(state);
        self.storage.set(storage);

        self.env().emit_event(RebaseScore { score: outcome.score });
        self.env().emit_event(RebaseApplied {
            class: outcome.class,
            previous_supply: outcome.previous_supply,
            current_supply: outcome.current_supply,
            stored,
            minted,
        });

        if let Some(mint) = split {
            if !mint.rewards.is_zero() {
                self.eefi().mint(this, mint.rewards);
            }
            if !mint.staking_pool.is_zero() {
                let pool = self.address_of(&self.staking_pool);
                self.eefi().mint(pool, mint.staking_pool);
                RewardPoolContractRef::new(self.env().clone(), pool).forward();
                self.env().emit_event(ProfitEefi { amount: mint.staking_pool });
            }
            if !mint.treasury.is_zero() {
                let treasury = self.address_of(&self.treasury);
                self.eefi().mint(treasury, mint.treasury);
            }
        }

        self.exit();
    }

    /// Sell the stored surplus for EEFI and OHM and distribute the proceeds
    pub fn sell(&mut self, min_eefi: U256, min_ohm: U256) -> (U256, U256) {
        self.enter();
        self.require_authorized_trader();
        self.require_initialized();

        let gateway = match self.trader.get_or_default().current {
            Some(gateway) => gateway,
            None => self.env().revert(VaultError::TraderNotSet),
        };
        let config = self.config();
        let this = self.env().self_address();
        let supply = self.elastic().total_supply();
        let balance = self.elastic().balance_of(this);

        let mut storage = self.token_storage();
        storage.settle(supply, balance).or_revert(&self.env());
        let stored = storage.stored_amount(supply, balance).or_revert(&self.env());
        if stored.is_zero() || stored <= config.min_sell_amount {
            self.env().revert(VaultError::ThresholdNotReached);
        }
        storage.drain(supply, balance).or_revert(&self.env());
        self.storage.set(storage);

        let sale = SaleSplit::new(stored, &config);
        let elastic = self.address_of(&self.elastic_token);
        let eefi_token = self.address_of(&self.eefi_token);
        let ohm_token = self.address_of(&self.ohm_token);

        if !self.elastic().approve(gateway, sale.for_eefi + sale.for_ohm) {
            self.env().revert(VaultError::TransferFailed);
        }
        let eefi_bought = self.swap(gateway, elastic, eefi_token, sale.for_eefi, min_eefi);
        let ohm_bought = self.swap(gateway, elastic, ohm_token, sale.for_ohm, min_ohm);

        let eefi_split = EefiSplit::new(eefi_bought, &config);
        let ohm_split = OhmSplit::new(ohm_bought, &config);
        if !ohm_split.rewards.is_zero() {
            self.ohm_rewards.distribute(ohm_split.rewards);
        }

        self.env().emit_event(SaleEefi { amount_in: sale.for_eefi, amount_out: eefi_bought });
        self.env().emit_event(SaleOhm { amount_in: sale.for_ohm, amount_out: ohm_bought });

        let treasury = self.address_of(&self.treasury);
        if !eefi_split.treasury.is_zero() {
            self.send(eefi_token, treasury, eefi_split.treasury);
        }
        if !eefi_split.burn.is_zero() {
            self.eefi().burn(eefi_split.burn);
            self.env().emit_event(Burn { amount: eefi_split.burn });
        }
        if !ohm_split.staking_pool.is_zero() {
            let pool = self.address_of(&self.staking_pool);
            self.send(ohm_token, pool, ohm_split.staking_pool);
            RewardPoolContractRef::new(self.env().clone(), pool).forward();
            self.env().emit_event(ProfitOhm { amount: ohm_split.staking_pool });
        }
        if !ohm_split.treasury.is_zero() {
            self.send(ohm_token, treasury, ohm_split.treasury);
        }
        if !sale.for_treasury.is_zero() {
            self.send(elastic, treasury, sale.for_treasury);
        }

        self.exit();
        (eefi_bought, ohm_bought)
    }

    // ========== Queries ==========

    /// Accrued rewards as (eefi, ohm)
    pub fn get_reward(&self, account: Address) -> (U256, U256) {
        (self.eefi_rewards.get_reward(account), self.ohm_rewards.get_reward(account))
    }

    /// Shares held by `account` across all deposit entries
    pub fn total_staked_for(&self, account: Address) -> U256 {
        self.deposits.get(&account).unwrap_or_default().total
    }

    pub fn total_staked(&self) -> U256 {
        self.eefi_rewards.total_staked()
    }

    pub fn deposit_count(&self, account: Address) -> u32 {
        self.deposits.get(&account).unwrap_or_default().len() as u32
    }

    /// Shares of `account` past their lock
    pub fn unlocked_balance(&self, account: Address) -> U256 {
        let lock_period = self.config().lock_period;
        self.deposits
            .get(&account)
            .unwrap_or_default()
            .unlocked_total(self.env().get_block_time(), lock_period)
    }

    pub fn rebase_state(&self) -> RebaseState {
        self.rebase_state.get_or_default()
    }

    /// Raw elastic amount currently earmarked for sale
    pub fn stored_surplus(&self) -> U256 {
        let this = self.env().self_address();
        let supply = self.elastic().total_supply();
        let balance = self.elastic().balance_of(this);
        let mut storage = self.token_storage();
        storage
            .settle(supply, balance)
            .and_then(|_| storage.stored_amount(supply, balance))
            .unwrap_or_default()
    }

    pub fn token_storage(&self) -> TokenStorage {
        self.storage.get_or_default()
    }

    pub fn status(&self) -> VaultStatus {
        self.status.get().unwrap_or(VaultStatus::Uninitialized)
    }

    pub fn config(&self) -> VaultConfig {
        self.config.get().unwrap_or_default()
    }

    pub fn minting_allowed(&self) -> bool {
        self.rebase_state().minting_allowed(&self.config())
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner.get()
    }

    pub fn staking_pool(&self) -> Option<Address> {
        self.staking_pool.get()
    }

    pub fn treasury(&self) -> Option<Address> {
        self.treasury.get()
    }

    pub fn trader(&self) -> Option<Address> {
        self.trader.get_or_default().current
    }

    pub fn pending_trader(&self) -> Option<Address> {
        self.trader.get_or_default().pending
    }

    pub fn authorized_trader(&self) -> Option<Address> {
        self.authorized_trader.get_or_default().current
    }

    pub fn eefi_bond_value(&self) -> U256 {
        self.eefi_rewards.bond_value()
    }

    pub fn ohm_bond_value(&self) -> U256 {
        self.ohm_rewards.bond_value()
    }

    // ========== Internal Functions ==========

    fn withdraw_internal(&mut self, shares: U256, min_out: U256) {
        self.require_initialized();
        let account = self.env().caller();
        let (_, holdings) = self.settle_storage();

        let config = self.config();
        let mut queue = self.deposits.get(&account).unwrap_or_default();
        queue
            .pop_unlocked(shares, self.env().get_block_time(), config.lock_period)
            .or_revert(&self.env());

        let amount = pro_rata_amount(shares, self.eefi_rewards.total_staked(), holdings)
            .or_revert(&self.env());
        if amount < min_out {
            self.env().revert(VaultError::SlippageNotMet);
        }

        let remaining_entries = queue.len() as u32;
        self.deposits.set(&account, queue);
        self.eefi_rewards.unstake_from(account, shares);
        self.ohm_rewards.unstake_from(account, shares);

        self.env().emit_event(Withdrawal { account, amount_paid: amount, remaining_entries });

        if !amount.is_zero() {
            let elastic = self.address_of(&self.elastic_token);
            self.send(elastic, account, amount);
        }
    }

    /// Swap `amount_in` of `asset_in`, measuring both legs by balance
    fn swap(&self, gateway: Address, asset_in: Address, asset_out: Address, amount_in: U256, min_out: U256) -> U256 {
        let this = self.env().self_address();
        let in_token = Cep18TokenContractRef::new(self.env().clone(), asset_in);
        let out_token = Cep18TokenContractRef::new(self.env().clone(), asset_out);
        let mut paid = BalanceSnapshot {
            before: in_token.balance_of(this),
            after: U256::zero(),
        };
        let mut snapshot = BalanceSnapshot {
            before: out_token.balance_of(this),
            after: U256::zero(),
        };
        if !amount_in.is_zero() {
            TradeGatewayContractRef::new(self.env().clone(), gateway)
                .sell(asset_in, asset_out, amount_in, min_out);
        }
        paid.after = in_token.balance_of(this);
        snapshot.after = out_token.balance_of(this);

        // a short pull would leave unsold surplus counted as holdings
        if paid.spent() < amount_in {
            self.env().revert(VaultError::TransferFailed);
        }
        let received = snapshot.received();
        if received < min_out {
            self.env().revert(VaultError::SlippageNotMet);
        }
        received
    }

    fn elastic(&self) -> Cep18TokenContractRef {
        let address = self.address_of(&self.elastic_token);
        Cep18TokenContractRef::new(self.env().clone(), address)
    }

    fn eefi(&self) -> MintableTokenContractRef {
        let address = self.address_of(&self.eefi_token);
        MintableTokenContractRef::new(self.env().clone(), address)
    }

    fn send(&self, token: Address, recipient: Address, amount: U256) {
        if !Cep18TokenContractRef::new(self.env().clone(), token).transfer(recipient, amount) {
            self.env().revert(VaultError::TransferFailed);
        }
    }

    fn address_of(&self, slot: &Var<Address>) -> Address {
        match slot.get() {
            Some(address) => address,
            None => self.env().revert(VaultError::NotInitialized),
        }
    }

    fn require_owner(&self) {
        if self.owner.get() != Some(self.env().caller()) {
            self.env().revert(VaultError::Unauthorized);
        }
    }

    fn require_authorized_trader(&self) {
        if !self.authorized_trader.get_or_default().is(&self.env().caller()) {
            self.env().revert(VaultError::Unauthorized);
        }
    }

    fn require_initialized(&self) {
        if self.status() == VaultStatus::Uninitialized {
            self.env().revert(VaultError::NotInitialized);
        }
    }

    /// Settles pending growth into the earmark.
    ///
    /// Returns the current supply and the balance left for depositors, which
    /// withdrawals are paid from.
    fn settle_storage(&mut self) -> (U256, U256) {
        let this = self.env().self_address();
        let supply = self.elastic().total_supply();
        let balance = self.elastic().balance_of(this);
        let mut storage = self.token_storage();
        storage.settle(supply, balance).or_revert(&self.env());
        let holdings = storage.holdings(supply, balance).or_revert(&self.env());
        self.storage.set(storage);
        (supply, holdings)
    }

    fn enter(&mut self) {
        if self.locked.get_or_default() {
            self.env().revert(VaultError::ReentrantCall);
        }
        self.locked.set(true);
    }

    fn exit(&mut self) {
        self.locked.set(false);
    }
}
