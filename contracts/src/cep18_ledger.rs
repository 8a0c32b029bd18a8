//! CEP-18 balance book.
//!
//! Shared by every fungible token in the workspace. Balances and allowances
//! live in Odra mappings, and each write is mirrored to the standard CEP-18
//! named keys and dictionaries so wallets can read the token directly.

use odra::prelude::*;
use odra::casper_types::{U256, Key};
use odra::casper_types::bytesrepr::ToBytes;
use crate::errors::VaultError;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;

const NAME_KEY: &str = "name";
const SYMBOL_KEY: &str = "symbol";
const DECIMALS_KEY: &str = "decimals";
const TOTAL_SUPPLY_KEY: &str = "total_supply";
const BALANCES_DICT: &str = "balances";
const ALLOWANCES_DICT: &str = "allowances";

#[odra::module]
pub struct Cep18Ledger {
    supply: Var<U256>,
    balances: Mapping<Address, U256>,
    /// (owner, spender) -> amount
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl Cep18Ledger {
    /// Publish the token metadata and create the empty CEP-18 dictionaries
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        self.env().init_dictionary(BALANCES_DICT);
        self.env().init_dictionary(ALLOWANCES_DICT);
        self.env().set_named_value(NAME_KEY, name);
        self.env().set_named_value(SYMBOL_KEY, symbol);
        self.env().set_named_value(DECIMALS_KEY, decimals);
        self.write_supply(U256::zero());
    }

    pub fn total_supply(&self) -> U256 {
        self.supply.get_or_default()
    }

    pub fn balance_of(&self, account: Address) -> U256 {
        self.balances.get(&account).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    pub fn transfer(&mut self, from: Address, to: Address, amount: U256) {
        self.debit(from, amount);
        self.credit(to, amount);
    }

    pub fn approve(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);
        let key = allowance_key(owner, spender);
        self.env().set_dictionary_value(ALLOWANCES_DICT, key.as_bytes(), amount);
    }

    /// Consume `amount` of the allowance `owner` granted to `spender`
    pub fn spend_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        let allowance = self.allowance(owner, spender);
        if allowance < amount {
            self.env().revert(VaultError::InsufficientBalance);
        }
        self.approve(owner, spender, allowance - amount);
    }

    pub fn mint(&mut self, to: Address, amount: U256) {
        self.credit(to, amount);
        self.write_supply(self.total_supply() + amount);
    }

    pub fn burn(&mut self, from: Address, amount: U256) {
        self.debit(from, amount);
        self.write_supply(self.total_supply() - amount);
    }

    fn credit(&mut self, account: Address, amount: U256) {
        let balance = self.balance_of(account) + amount;
        self.write_balance(account, balance);
    }

    fn debit(&mut self, account: Address, amount: U256) {
        let balance = self.balance_of(account);
        if balance < amount {
            self.env().revert(VaultError::InsufficientBalance);
        }
        self.write_balance(account, balance - amount);
    }

    fn write_balance(&mut self, account: Address, balance: U256) {
        self.balances.set(&account, balance);
        let key = balance_key(account);
        self.env().set_dictionary_value(BALANCES_DICT, key.as_bytes(), balance);
    }

    fn write_supply(&mut self, supply: U256) {
        self.supply.set(supply);
        self.env().set_named_value(TOTAL_SUPPLY_KEY, supply);
    }
}

/// Dictionary key of `owner`'s balance: base64 of the serialized `Key`.
pub fn balance_key(owner: Address) -> String {
    BASE64_STANDARD.encode(key_bytes(owner))
}

/// Dictionary key of an allowance: base64 of owner then spender `Key` bytes.
pub fn allowance_key(owner: Address, spender: Address) -> String {
    let mut bytes = key_bytes(owner);
    bytes.extend_from_slice(&key_bytes(spender));
    BASE64_STANDARD.encode(bytes)
}

fn key_bytes(address: Address) -> Vec<u8> {
    Key::from(address).to_bytes().unwrap_or_default()
}
