//! Deploy the vault contracts to Casper livenet/testnet using Odra livenet environment.
//!
//! Usage:
//!   cargo run --bin deploy_livenet --release
//!
//! Requires .env file with:
//!   ODRA_CASPER_LIVENET_SECRET_KEY_PATH=/path/to/secret_key.pem
//!   ODRA_CASPER_LIVENET_NODE_ADDRESS=https://node.testnet.casper.network
//!   ODRA_CASPER_LIVENET_CHAIN_NAME=casper-test
//!   ODRA_CASPER_LIVENET_PAYMENT_AMOUNT=200000000000
//!   ELASTIC_TOKEN=hash-...        (rebasing deposit token)
//!   OHM_TOKEN=hash-...            (second reward asset)
//!   LP_TOKEN=hash-...             (token staked in the LP pool)
//!   TREASURY=account-hash-...
//!   TRADE_GATEWAY=hash-...        (optional)

use odra::host::{Deployer, HostRef, NoArgs};
use odra::prelude::*;

use elastic_vault_contracts::eefi_token::EefiToken;
use elastic_vault_contracts::staking_pool::{StakingPool, StakingPoolInitArgs};
use elastic_vault_contracts::types::VaultConfig;
use elastic_vault_contracts::vault::{ElasticVault, ElasticVaultInitArgs};

fn address_from_env(key: &str) -> Option<Address> {
    let value = std::env::var(key).ok()?;
    match value.parse::<Address>() {
        Ok(address) => Some(address),
        Err(_) => panic!("{} is not a valid address: {}", key, value),
    }
}

fn required_address(key: &str) -> Address {
    address_from_env(key).unwrap_or_else(|| panic!("{} must be set", key))
}

fn main() {
    // Load environment from .env file
    dotenv::dotenv().ok();

    println!("=== Elastic Vault Livenet Deployment ===");
    println!();

    // Initialize Odra livenet environment
    let env = odra_casper_livenet_env::env();

    // Configure payment amount for deployments/calls (required for Casper 2.0 txs)
    let payment_amount: u64 = std::env::var("ODRA_CASPER_LIVENET_PAYMENT_AMOUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(200_000_000_000);
    env.set_gas(payment_amount);

    let deployer = env.caller();
    println!("Deployer: {:?}", deployer);

    let elastic_token = required_address("ELASTIC_TOKEN");
    let ohm_token = required_address("OHM_TOKEN");
    let lp_token = required_address("LP_TOKEN");
    let treasury = required_address("TREASURY");
    let trade_gateway = address_from_env("TRADE_GATEWAY");
    println!("Elastic token: {:?}", elastic_token);
    println!("OHM token:     {:?}", ohm_token);
    println!("LP token:      {:?}", lp_token);
    println!("Treasury:      {:?}", treasury);
    println!("Trade gateway: {:?}", trade_gateway);
    println!();

    let config = VaultConfig::default();

    // ==================== Phase 1: Reward Token and Pool ====================
    println!("=== Phase 1: Deploying Reward Token and Staking Pool ===");
    println!();

    println!("Deploying EefiToken...");
    let mut eefi = EefiToken::deploy(&env, NoArgs);
    let eefi_addr = eefi.address().clone();
    println!("EefiToken deployed at: {:?}", eefi_addr);

    println!("Deploying StakingPool...");
    let pool = StakingPool::deploy(
        &env,
        StakingPoolInitArgs {
            stake_token: lp_token,
            stake_decimals: 18,
            eefi_token: eefi_addr,
            ohm_token,
        },
    );
    let pool_addr = pool.address().clone();
    println!("StakingPool deployed at: {:?}", pool_addr);
    println!();

    // ==================== Phase 2: Vault ====================
    println!("=== Phase 2: Deploying Vault ===");
    println!();

    println!("Deploying ElasticVault...");
    let mut vault = ElasticVault::deploy(
        &env,
        ElasticVaultInitArgs {
            elastic_token,
            eefi_token: eefi_addr,
            ohm_token,
            config,
        },
    );
    let vault_addr = vault.address().clone();
    println!("ElasticVault deployed at: {:?}", vault_addr);
    println!();

    // ==================== Phase 3: Wiring ====================
    println!("=== Phase 3: Wiring ===");
    println!();

    println!("Granting EEFI minter role to vault...");
    eefi.add_minter(vault_addr);
    println!("Done.");

    println!("Initializing vault...");
    vault.initialize(pool_addr, treasury, trade_gateway);
    println!("Done. Status: {:?}", vault.status());

    println!();
    println!("=== Deployment Complete ===");
    println!();
    println!("Contract Addresses:");
    println!("  EefiToken:     {:?}", eefi_addr);
    println!("  StakingPool:   {:?}", pool_addr);
    println!("  ElasticVault:  {:?}", vault_addr);
}
