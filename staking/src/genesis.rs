//! Chain genesis assembly around the predeployed staking contract

use std::collections::BTreeMap;
use std::path::Path;

use alloy_genesis::{ChainConfig, Genesis, GenesisAccount};
use alloy_primitives::U256;
use color_eyre::eyre::{eyre, Result};
use tracing::{debug, info};

use crate::config::GenesisConfig;
use crate::layout::StakingLayout;
use crate::predeploy::predeploy_staking_contract;

/// Build a genesis with the staking contract pre-staked by the configured validators
pub fn build_genesis(config: &GenesisConfig) -> Result<Genesis> {
    let params = config.params()?;
    let staking_account =
        predeploy_staking_contract(&StakingLayout::default(), &config.validators, &params)?;

    let mut alloc: BTreeMap<_, _> = config
        .alloc
        .iter()
        .map(|(address, balance)| {
            (
                *address,
                GenesisAccount {
                    balance: *balance,
                    ..Default::default()
                },
            )
        })
        .collect();

    if alloc
        .insert(config.contract_address, staking_account)
        .is_some()
    {
        return Err(eyre!(
            "prefunded account {} collides with the staking contract address",
            config.contract_address
        ));
    }

    debug!(
        accounts = alloc.len(),
        validators = config.validators.len(),
        "Assembled genesis allocation"
    );

    let genesis = Genesis {
        config: ChainConfig {
            chain_id: config.chain_id,
            homestead_block: Some(0),
            eip150_block: Some(0),
            eip155_block: Some(0),
            eip158_block: Some(0),
            byzantium_block: Some(0),
            constantinople_block: Some(0),
            petersburg_block: Some(0),
            istanbul_block: Some(0),
            berlin_block: Some(0),
            london_block: Some(0),
            ..Default::default()
        },
        alloc,
        difficulty: U256::from(1u64),
        ..Default::default()
    }
    .with_gas_limit(config.gas_limit);

    Ok(genesis)
}

/// Write `genesis` as pretty-printed JSON, creating parent directories
pub fn write_genesis(genesis: &Genesis, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let genesis_json = serde_json::to_string_pretty(genesis)?;
    std::fs::write(path, genesis_json)?;
    info!("Genesis configuration written to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::{address, Address};

    use super::*;
    use crate::layout::{DEFAULT_STAKED_BALANCE, STAKING_CONTRACT_ADDRESS};

    const VALIDATOR: Address = address!("0x70997970C51812dc3A010C7d01b50e0d17dc79C8");

    #[test]
    fn places_staking_account() {
        let config = GenesisConfig {
            chain_id: 42,
            validators: vec![VALIDATOR],
            alloc: BTreeMap::from([(VALIDATOR, U256::from(5u64))]),
            ..Default::default()
        };

        let genesis = build_genesis(&config).unwrap();
        assert_eq!(genesis.config.chain_id, 42);
        assert_eq!(genesis.alloc.len(), 2);
        assert_eq!(genesis.alloc[&VALIDATOR].balance, U256::from(5u64));

        let staking = &genesis.alloc[&STAKING_CONTRACT_ADDRESS];
        assert_eq!(staking.balance, DEFAULT_STAKED_BALANCE);
        assert_eq!(staking.storage.as_ref().map(|s| s.len()), Some(8));
    }

    #[test]
    fn rejects_alloc_collision() {
        let config = GenesisConfig {
            alloc: BTreeMap::from([(STAKING_CONTRACT_ADDRESS, U256::from(1u64))]),
            ..Default::default()
        };
        assert!(build_genesis(&config).is_err());
    }

    #[test]
    fn writes_genesis_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("genesis.json");

        let genesis = build_genesis(&GenesisConfig::default()).unwrap();
        write_genesis(&genesis, &path).unwrap();

        let written: Genesis =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.alloc, genesis.alloc);
        assert_eq!(written.gas_limit, genesis.gas_limit);
    }
}
