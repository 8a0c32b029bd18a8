//! Vault error definitions.

use odra::prelude::*;
use odra::ContractEnv;

/// Elastic vault errors
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VaultError {
    // Input errors (1xx)
    InvalidAddress = 100,
    InvalidAmount = 101,
    ZeroSupply = 102,
    InvalidConfig = 103,

    // Lifecycle errors (2xx)
    AlreadyInitialized = 200,
    NotInitialized = 201,
    TraderNotSet = 202,

    // Timing errors (3xx)
    CooldownNotElapsed = 300,
    NoPendingChange = 301,

    // Balance errors (4xx)
    InsufficientBalance = 400,
    InsufficientStake = 401,
    NoUnlockedDeposits = 402,
    ThresholdNotReached = 403,

    // Trading and token errors (5xx)
    SlippageNotMet = 500,
    TransferFailed = 501,

    // Access errors (6xx)
    Unauthorized = 600,
    ReentrantCall = 601,
}

impl VaultError {
    pub const fn message(&self) -> &'static str {
        match self {
            // Input
            VaultError::InvalidAddress => "Invalid address",
            VaultError::InvalidAmount => "Amount must be greater than zero",
            VaultError::ZeroSupply => "Elastic supply is zero",
            VaultError::InvalidConfig => "Invalid configuration parameter",

            // Lifecycle
            VaultError::AlreadyInitialized => "Vault already initialized",
            VaultError::NotInitialized => "Vault not initialized",
            VaultError::TraderNotSet => "Trade gateway not set",

            // Timing
            VaultError::CooldownNotElapsed => "Cooldown not elapsed",
            VaultError::NoPendingChange => "No pending address change",

            // Balances
            VaultError::InsufficientBalance => "Not enough balance",
            VaultError::InsufficientStake => "Not enough staked",
            VaultError::NoUnlockedDeposits => "No unlocked deposits found",
            VaultError::ThresholdNotReached => "Stored surplus below threshold",

            // Trading
            VaultError::SlippageNotMet => "Minimal expected amount not acquired",
            VaultError::TransferFailed => "Token transfer failed",

            // Access
            VaultError::Unauthorized => "Unauthorized caller",
            VaultError::ReentrantCall => "Reentrant call",
        }
    }
}

impl core::fmt::Display for VaultError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<VaultError> for OdraError {
    fn from(error: VaultError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error as u16)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error as u16, error.message())
        }
    }
}

/// Reverts the running contract call on `Err`
pub trait OrRevert<T> {
    fn or_revert(self, env: &ContractEnv) -> T;
}

impl<T> OrRevert<T> for Result<T, VaultError> {
    fn or_revert(self, env: &ContractEnv) -> T {
        match self {
            Ok(value) => value,
            Err(error) => env.revert(error),
        }
    }
}
