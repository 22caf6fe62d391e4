//! Error types for staking predeploy generation

use alloy_primitives::U256;
use thiserror::Error;

/// Result type for predeploy operations
pub type Result<T> = core::result::Result<T, PredeployError>;

/// Errors that can occur while computing the staking contract genesis state
#[derive(Debug, Error)]
pub enum PredeployError {
    #[error("Invalid validator address {0:?}: expected 20 bytes of hex")]
    InvalidValidatorAddress(String),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Value for {name} does not fit in 64 bits: {value}")]
    ParameterOutOfRange { name: &'static str, value: U256 },

    #[error("Minimum validator count {min} exceeds maximum {max}")]
    InvalidValidatorBounds { min: u64, max: u64 },

    #[error("Validator list of length {0} exceeds the representable index range")]
    TooManyValidators(usize),

    #[error("Total staked amount overflows uint256")]
    TotalStakeOverflow,
}
