//! EEFI Reward Token Contract
//!
//! CEP-18 compatible reward token. Issuance is restricted to authorized
//! minters (the vault); any holder can burn its own balance.

use odra::prelude::*;
use odra::casper_types::U256;
use crate::cep18_ledger::Cep18Ledger;
use crate::errors::VaultError;

const TOKEN_NAME: &str = "Elastic Finance Token";
const TOKEN_SYMBOL: &str = "EEFI";
const TOKEN_DECIMALS: u8 = 18;

/// EEFI reward token
#[odra::module]
pub struct EefiToken {
    ledger: SubModule<Cep18Ledger>,
    admin: Var<Address>,
    minters: Mapping<Address, bool>,
}

#[odra::module]
impl EefiToken {
    /// Initialize the token; the deployer becomes admin
    pub fn init(&mut self) {
        self.admin.set(self.env().caller());
        self.ledger.init(String::from(TOKEN_NAME), String::from(TOKEN_SYMBOL), TOKEN_DECIMALS);
    }

    // ========== CEP-18 Standard Functions ==========

    pub fn name(&self) -> String {
        String::from(TOKEN_NAME)
    }

    pub fn symbol(&self) -> String {
        String::from(TOKEN_SYMBOL)
    }

    pub fn decimals(&self) -> u8 {
        TOKEN_DECIMALS
    }

    pub fn total_supply(&self) -> U256 {
        self.ledger.total_supply()
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.ledger.balance_of(account)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.ledger.allowance(owner, spender)
    }

    pub fn transfer(&mut self, recipient: Address, amount: U256) -> bool {
        let sender = self.env().caller();
        self.ledger.transfer(sender, recipient, amount);
        true
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let owner = self.env().caller();
        self.ledger.approve(owner, spender, amount);
        true
    }

    /// Transfer tokens from owner to recipient (requires allowance)
    pub fn transfer_from(&mut self, owner: Address, recipient: Address, amount: U256) -> bool {
        let spender = self.env().caller();
        self.ledger.spend_allowance(owner, spender, amount);
        self.ledger.transfer(owner, recipient, amount);
        true
    }

    // ========== Issuance ==========

    /// Mint new tokens (authorized minters only)
    pub fn mint(&mut self, to: Address, amount: U256) {
        if !self.is_minter(self.env().caller()) {
            self.env().revert(VaultError::Unauthorized);
        }
        self.ledger.mint(to, amount);
    }

    /// Burn tokens from caller
    pub fn burn(&mut self, amount: U256) {
        let caller = self.env().caller();
        self.ledger.burn(caller, amount);
    }

    // ========== Admin Functions ==========

    pub fn add_minter(&mut self, minter: Address) {
        self.require_admin();
        self.minters.set(&minter, true);
    }

    pub fn remove_minter(&mut self, minter: Address) {
        self.require_admin();
        self.minters.set(&minter, false);
    }

    pub fn is_minter(&self, account: Address) -> bool {
        self.minters.get(&account).unwrap_or(false)
    }

    pub fn get_admin(&self) -> Option<Address> {
        self.admin.get()
    }

    fn require_admin(&self) {
        if self.admin.get() != Some(self.env().caller()) {
            self.env().revert(VaultError::Unauthorized);
        }
    }
}
