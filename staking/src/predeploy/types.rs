//! Inputs and outputs of the staking predeploy builder

use core::str::FromStr;
use std::collections::BTreeMap;

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::layout::{DEFAULT_MAX_VALIDATOR_COUNT, DEFAULT_MIN_VALIDATOR_COUNT};
use crate::predeploy::error::{PredeployError, Result};

/// Bounds on the validator set size written into the contract at genesis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredeployParams {
    pub min_validator_count: u64,
    pub max_validator_count: u64,
}

impl PredeployParams {
    /// Create a new parameter set, rejecting `min > max`
    pub fn new(min_validator_count: u64, max_validator_count: u64) -> Result<Self> {
        let params = Self {
            min_validator_count,
            max_validator_count,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parse both bounds from decimal or `0x`-prefixed hex strings
    pub fn parse(min_validator_count: &str, max_validator_count: &str) -> Result<Self> {
        Self::new(
            parse_count("minValidatorCount", min_validator_count)?,
            parse_count("maxValidatorCount", max_validator_count)?,
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_validator_count > self.max_validator_count {
            return Err(PredeployError::InvalidValidatorBounds {
                min: self.min_validator_count,
                max: self.max_validator_count,
            });
        }
        Ok(())
    }
}

impl Default for PredeployParams {
    fn default() -> Self {
        Self {
            min_validator_count: DEFAULT_MIN_VALIDATOR_COUNT,
            max_validator_count: DEFAULT_MAX_VALIDATOR_COUNT,
        }
    }
}

fn parse_count(name: &'static str, raw: &str) -> Result<u64> {
    let value = U256::from_str(raw.trim()).map_err(|_| PredeployError::InvalidParameter {
        name,
        value: raw.to_string(),
    })?;

    u64::try_from(value).map_err(|_| PredeployError::ParameterOutOfRange { name, value })
}

/// Parse a validator address, rejecting anything that is not exactly 20 bytes
pub fn parse_validator(raw: &str) -> Result<Address> {
    Address::from_str(raw.trim())
        .map_err(|_| PredeployError::InvalidValidatorAddress(raw.to_string()))
}

/// Parse a comma separated validator list, preserving order
pub fn parse_validators(raw: &str) -> Result<Vec<Address>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_validator)
        .collect()
}

/// Final storage of the staking contract together with the stake it holds
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StakingStorage {
    /// Storage key to storage value
    pub storage: BTreeMap<B256, B256>,
    /// Sum of all stakes credited at genesis
    pub total_staked: U256,
}
