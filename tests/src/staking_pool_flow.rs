//! LP staking pool scenarios on OdraVM.

use odra::casper_types::U256;
use odra::host::{Deployer, HostEnv, HostRef};
use odra::prelude::*;
use pretty_assertions::assert_eq;

use elastic_vault_contracts::errors::VaultError;
use elastic_vault_contracts::staking_pool::{StakingPool, StakingPoolHostRef, StakingPoolInitArgs};
use elastic_vault_contracts::types::zero_address;

use crate::mocks::*;

fn u(value: u64) -> U256 {
    U256::from(value)
}

struct PoolFixture {
    env: HostEnv,
    lp: MockTokenHostRef,
    eefi: MockTokenHostRef,
    ohm: MockTokenHostRef,
    pool: StakingPoolHostRef,
    funder: Address,
    alice: Address,
    bob: Address,
}

fn setup() -> PoolFixture {
    let env = odra_test::env();
    let funder = env.get_account(0);
    let alice = env.get_account(1);
    let bob = env.get_account(2);
    env.set_caller(funder);

    let mut lp = MockToken::deploy(&env, MockTokenInitArgs { symbol: String::from("LP") });
    let mut eefi = MockToken::deploy(&env, MockTokenInitArgs { symbol: String::from("EEFI") });
    let mut ohm = MockToken::deploy(&env, MockTokenInitArgs { symbol: String::from("OHM") });
    let pool = StakingPool::deploy(
        &env,
        StakingPoolInitArgs {
            stake_token: lp.address().clone(),
            stake_decimals: 9,
            eefi_token: eefi.address().clone(),
            ohm_token: ohm.address().clone(),
        },
    );

    lp.mint(alice, u(1_000_000_000_000));
    lp.mint(bob, u(1_000_000_000_000));
    eefi.mint(funder, u(1_000_000_000_000_000));
    ohm.mint(funder, u(1_000_000_000_000_000));

    PoolFixture { env, lp, eefi, ohm, pool, funder, alice, bob }
}

fn stake(fx: &mut PoolFixture, account: Address, amount: U256) {
    fx.env.set_caller(account);
    fx.lp.approve(fx.pool.address().clone(), amount);
    fx.pool.stake(amount);
    fx.env.set_caller(fx.funder);
}

#[test]
fn test_init_rejects_zero_tokens() {
    let env = odra_test::env();
    let lp = MockToken::deploy(&env, MockTokenInitArgs { symbol: String::from("LP") });
    let eefi = MockToken::deploy(&env, MockTokenInitArgs { symbol: String::from("EEFI") });

    let result = StakingPool::try_deploy(
        &env,
        StakingPoolInitArgs {
            stake_token: lp.address().clone(),
            stake_decimals: 9,
            eefi_token: eefi.address().clone(),
            ohm_token: zero_address(),
        },
    );
    assert_eq!(result.err(), Some(VaultError::InvalidAddress.into()));

    let result = StakingPool::try_deploy(
        &env,
        StakingPoolInitArgs {
            stake_token: zero_address(),
            stake_decimals: 9,
            eefi_token: eefi.address().clone(),
            ohm_token: eefi.address().clone(),
        },
    );
    assert_eq!(result.err(), Some(VaultError::InvalidAddress.into()));
}

#[test]
fn test_stake_and_unstake() {
    let mut fx = setup();
    let alice = fx.alice;

    stake(&mut fx, alice, u(100_000_000_000));
    assert_eq!(fx.pool.total_staked(), u(100_000_000_000));
    assert_eq!(fx.pool.total_staked_for(alice), u(100_000_000_000));
    assert_eq!(fx.pool.token(), Some(fx.lp.address().clone()));

    fx.env.set_caller(alice);
    fx.pool.unstake(u(40_000_000_000));
    assert_eq!(fx.pool.total_staked_for(alice), u(60_000_000_000));
    assert_eq!(fx.lp.balance_of(alice), u(940_000_000_000));

    let result = fx.pool.try_unstake(u(60_000_000_001));
    assert_eq!(result.unwrap_err(), VaultError::InsufficientStake.into());
}

#[test]
fn test_distribute_splits_by_stake() {
    let mut fx = setup();
    let (alice, bob) = (fx.alice, fx.bob);
    stake(&mut fx, alice, u(100_000_000_000));
    stake(&mut fx, bob, u(50_000_000_000));

    let amount = u(1_500_000_000_000);
    fx.ohm.approve(fx.pool.address().clone(), amount);
    fx.pool.distribute_ohm(amount);

    assert_eq!(fx.pool.get_reward(alice), (u(1_000_000_000_000), U256::zero()));
    assert_eq!(fx.pool.get_reward(bob), (u(500_000_000_000), U256::zero()));
    assert_eq!(fx.ohm.balance_of(fx.pool.address().clone()), amount);
}

#[test]
fn test_forward_distributes_unowed_balance() {
    let mut fx = setup();
    let alice = fx.alice;
    stake(&mut fx, alice, u(100_000_000_000));

    let pool = fx.pool.address().clone();
    fx.eefi.transfer(pool, u(2_000_000_000_000));
    fx.pool.forward();
    assert_eq!(fx.pool.get_reward(alice), (U256::zero(), u(2_000_000_000_000)));

    // already owed balance is not distributed twice
    fx.pool.forward();
    assert_eq!(fx.pool.get_reward(alice), (U256::zero(), u(2_000_000_000_000)));
}

#[test]
fn test_withdraw_pays_rewards_pro_rata() {
    let mut fx = setup();
    let alice = fx.alice;
    stake(&mut fx, alice, u(100_000_000_000));

    let pool = fx.pool.address().clone();
    fx.eefi.transfer(pool, u(1_000_000_000_000));
    fx.ohm.transfer(pool, u(3_000_000_000_000));
    fx.pool.forward();

    fx.env.set_caller(alice);
    fx.pool.withdraw(u(50_000_000_000));
    assert_eq!(fx.eefi.balance_of(alice), u(500_000_000_000));
    assert_eq!(fx.ohm.balance_of(alice), u(1_500_000_000_000));
    assert_eq!(fx.pool.total_staked_for(alice), u(100_000_000_000));

    fx.pool.withdraw(u(100_000_000_000));
    assert_eq!(fx.eefi.balance_of(alice), u(1_000_000_000_000));
    assert_eq!(fx.ohm.balance_of(alice), u(3_000_000_000_000));
    assert_eq!(fx.pool.get_reward(alice), (U256::zero(), U256::zero()));
}
