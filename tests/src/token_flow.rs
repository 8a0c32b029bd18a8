//! EEFI reward token scenarios on OdraVM.

use odra::casper_types::U256;
use odra::host::{Deployer, NoArgs};
use odra::prelude::*;
use pretty_assertions::assert_eq;

use elastic_vault_contracts::eefi_token::EefiToken;
use elastic_vault_contracts::errors::VaultError;

fn u(value: u64) -> U256 {
    U256::from(value)
}

#[test]
fn test_mint_requires_minter() {
    let env = odra_test::env();
    let admin = env.get_account(0);
    let alice = env.get_account(1);
    let mut eefi = EefiToken::deploy(&env, NoArgs);

    let result = eefi.try_mint(alice, u(100));
    assert_eq!(result.unwrap_err(), VaultError::Unauthorized.into());

    eefi.add_minter(admin);
    eefi.mint(alice, u(100));
    assert_eq!(eefi.balance_of(alice), u(100));
    assert_eq!(eefi.total_supply(), u(100));

    eefi.remove_minter(admin);
    assert!(!eefi.is_minter(admin));
    let result = eefi.try_mint(alice, u(1));
    assert_eq!(result.unwrap_err(), VaultError::Unauthorized.into());

    env.set_caller(alice);
    let result = eefi.try_add_minter(alice);
    assert_eq!(result.unwrap_err(), VaultError::Unauthorized.into());
}

#[test]
fn test_transfer_from_spends_allowance() {
    let env = odra_test::env();
    let admin = env.get_account(0);
    let (alice, bob) = (env.get_account(1), env.get_account(2));
    let mut eefi = EefiToken::deploy(&env, NoArgs);
    eefi.add_minter(admin);
    eefi.mint(alice, u(1_000));

    env.set_caller(alice);
    eefi.approve(bob, u(300));

    env.set_caller(bob);
    assert!(eefi.transfer_from(alice, bob, u(200)));
    assert_eq!(eefi.allowance(alice, bob), u(100));
    assert_eq!(eefi.balance_of(alice), u(800));
    assert_eq!(eefi.balance_of(bob), u(200));

    let result = eefi.try_transfer_from(alice, bob, u(101));
    assert_eq!(result.unwrap_err(), VaultError::InsufficientBalance.into());
}

#[test]
fn test_burn_reduces_supply() {
    let env = odra_test::env();
    let admin = env.get_account(0);
    let alice = env.get_account(1);
    let mut eefi = EefiToken::deploy(&env, NoArgs);
    eefi.add_minter(admin);
    eefi.mint(alice, u(500));

    env.set_caller(alice);
    eefi.burn(u(200));
    assert_eq!(eefi.balance_of(alice), u(300));
    assert_eq!(eefi.total_supply(), u(300));

    let result = eefi.try_burn(u(301));
    assert_eq!(result.unwrap_err(), VaultError::InsufficientBalance.into());
    assert_eq!(eefi.symbol(), "EEFI");
}
