//! Genesis accounts produced by actually executing the staking contract

use std::collections::{BTreeMap, BTreeSet};

use alloy_genesis::GenesisAccount;
use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};
use tracing::debug;

use crate::artifact::ContractArtifact;
use crate::layout::StakingLayout;
use crate::oracle::{CallRequest, CreationRequest, EphemeralChain, Result};
use crate::predeploy::PredeployParams;
use crate::slots::StorageSlotCalculator;

sol! {
    interface IStaking {
        function stake() external payable;
    }
}

const STAKE_GAS_LIMIT: u64 = 1_000_000;

/// Deploy an artifact's init code on a fresh chain and capture the result.
///
/// The account keeps the artifact's deployed bytecode as its code, and the
/// balance, nonce and storage left behind by the creation transaction.
pub fn deploy_from_artifact(artifact: &ContractArtifact, gas_limit: u64) -> Result<GenesisAccount> {
    let mut chain = EphemeralChain::new();

    let address = chain.execute_creation(CreationRequest {
        code: artifact.bytecode.clone(),
        sender: Address::ZERO,
        value: U256::ZERO,
        gas_limit,
    })?;

    let account = GenesisAccount {
        code: Some(artifact.deployed_bytecode.clone()),
        ..chain.genesis_account(address)
    };

    debug!(
        %address,
        slots = account.storage.as_ref().map_or(0, |s| s.len()),
        "Harvested artifact deployment"
    );

    Ok(account)
}

/// Replay genesis staking through the EVM.
///
/// Installs the runtime code at `contract`, writes the validator count bounds,
/// then has each validator call `stake()` with the default stake, in order.
pub fn replay_stakes(
    layout: &StakingLayout,
    validators: &[Address],
    params: &PredeployParams,
    contract: Address,
) -> Result<GenesisAccount> {
    params.validate()?;

    let mut chain = EphemeralChain::new();
    chain.install_code(contract, layout.code.clone());

    chain.set_storage(
        contract,
        StorageSlotCalculator::scalar_slot(layout.slots.min_num_validators),
        U256::from(params.min_validator_count).into(),
    )?;
    chain.set_storage(
        contract,
        StorageSlotCalculator::scalar_slot(layout.slots.max_num_validators),
        U256::from(params.max_validator_count).into(),
    )?;

    let input = Bytes::from(IStaking::stakeCall {}.abi_encode());

    for (index, validator) in validators.iter().enumerate() {
        chain.fund(*validator, layout.default_stake);
        chain.execute_call(CallRequest {
            to: contract,
            input: input.clone(),
            sender: *validator,
            value: layout.default_stake,
            gas_limit: STAKE_GAS_LIMIT,
        })?;
        debug!(%validator, index, "Replayed stake");
    }

    Ok(chain.genesis_account(contract))
}

/// A storage cell whose value differs between two storage maps
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotMismatch {
    pub key: B256,
    pub expected: B256,
    pub actual: B256,
}

/// Compare two storage maps, treating absent keys as zero-valued
pub fn diff_storage(
    expected: &BTreeMap<B256, B256>,
    actual: &BTreeMap<B256, B256>,
) -> Vec<SlotMismatch> {
    let keys: BTreeSet<&B256> = expected.keys().chain(actual.keys()).collect();

    keys.into_iter()
        .filter_map(|key| {
            let expected = expected.get(key).copied().unwrap_or_default();
            let actual = actual.get(key).copied().unwrap_or_default();
            (expected != actual).then_some(SlotMismatch {
                key: *key,
                expected,
                actual,
            })
        })
        .collect()
}
