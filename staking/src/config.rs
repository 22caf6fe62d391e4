//! Genesis generation settings, read from a TOML file with environment overrides

use std::collections::BTreeMap;
use std::path::Path;

use alloy_primitives::{Address, U256};
use color_eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::layout::{
    DEFAULT_MAX_VALIDATOR_COUNT, DEFAULT_MIN_VALIDATOR_COUNT, STAKING_CONTRACT_ADDRESS,
};
use crate::predeploy::{PredeployParams, Result as PredeployResult};

/// Prefix of the environment variables overriding file settings, e.g. `STAKING__CHAIN_ID`
pub const ENV_PREFIX: &str = "STAKING";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Chain id written into the chain config
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,

    /// Address the staking contract is predeployed at
    #[serde(default = "default_contract_address")]
    pub contract_address: Address,

    #[serde(default = "default_min_validator_count")]
    pub min_validator_count: u64,

    #[serde(default = "default_max_validator_count")]
    pub max_validator_count: u64,

    /// Genesis validators, in registration order
    #[serde(default)]
    pub validators: Vec<Address>,

    /// Block gas limit of the genesis block
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,

    /// Additional prefunded accounts
    #[serde(default)]
    pub alloc: BTreeMap<Address, U256>,
}

fn default_chain_id() -> u64 {
    100
}

fn default_contract_address() -> Address {
    STAKING_CONTRACT_ADDRESS
}

fn default_min_validator_count() -> u64 {
    DEFAULT_MIN_VALIDATOR_COUNT
}

fn default_max_validator_count() -> u64 {
    DEFAULT_MAX_VALIDATOR_COUNT
}

fn default_gas_limit() -> u64 {
    5_242_880
}

impl Default for GenesisConfig {
    fn default() -> Self {
        Self {
            chain_id: default_chain_id(),
            contract_address: default_contract_address(),
            min_validator_count: default_min_validator_count(),
            max_validator_count: default_max_validator_count(),
            validators: Vec::new(),
            gas_limit: default_gas_limit(),
            alloc: BTreeMap::new(),
        }
    }
}

impl GenesisConfig {
    /// Validator count bounds, validated
    pub fn params(&self) -> PredeployResult<PredeployParams> {
        PredeployParams::new(self.min_validator_count, self.max_validator_count)
    }
}

pub fn load_config(path: impl AsRef<Path>, prefix: Option<&str>) -> eyre::Result<GenesisConfig> {
    ::config::Config::builder()
        .add_source(::config::File::from(path.as_ref()))
        .add_source(::config::Environment::with_prefix(prefix.unwrap_or(ENV_PREFIX)).separator("__"))
        .build()?
        .try_deserialize()
        .map_err(Into::into)
}
