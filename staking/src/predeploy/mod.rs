//! # Staking Predeploy Generator
//!
//! Computes the storage of the staking contract after every genesis validator
//! has called `stake()` with the default stake, without running the EVM.

pub mod error;
pub mod storage;
pub mod types;

use std::collections::{BTreeMap, HashMap};

use alloy_genesis::GenesisAccount;
use alloy_primitives::{Address, U256};
pub use error::{PredeployError, Result};
pub use types::{parse_validator, parse_validators, PredeployParams, StakingStorage};
use tracing::{debug, warn};

use crate::layout::StakingLayout;
use crate::predeploy::storage::{set_validator_bounds, set_validator_stake};

/// Generate the staking contract storage for the given ordered validator list.
///
/// Validators are registered in input order, so position `i` becomes
/// `_validators[i]`. Repeated addresses are kept: each occurrence takes its own
/// array slot while the per-address entries reflect the last occurrence.
pub fn generate_storage_data(
    layout: &StakingLayout,
    validators: &[Address],
    params: &PredeployParams,
) -> Result<StakingStorage> {
    params.validate()?;

    u64::try_from(validators.len())
        .map_err(|_| PredeployError::TooManyValidators(validators.len()))?;

    let mut first_seen = HashMap::with_capacity(validators.len());
    for (index, address) in validators.iter().enumerate() {
        if let Some(first) = first_seen.insert(*address, index) {
            warn!(
                %address,
                first,
                index,
                "Duplicate genesis validator, per-address entries keep the last occurrence"
            );
        }
    }

    let mut storage = BTreeMap::new();
    let mut total_staked = U256::ZERO;

    for (index, address) in (0u64..).zip(validators.iter().copied()) {
        total_staked = total_staked
            .checked_add(layout.default_stake)
            .ok_or(PredeployError::TotalStakeOverflow)?;

        set_validator_stake(
            &mut storage,
            &layout.slots,
            address,
            index,
            layout.default_stake,
            total_staked,
        );
        debug!(%address, index, %total_staked, "Staked genesis validator");
    }

    set_validator_bounds(
        &mut storage,
        &layout.slots,
        params.min_validator_count,
        params.max_validator_count,
    );

    Ok(StakingStorage {
        storage,
        total_staked,
    })
}

/// Build the genesis account of the staking contract with `validators` pre-staked
pub fn predeploy_staking_contract(
    layout: &StakingLayout,
    validators: &[Address],
    params: &PredeployParams,
) -> Result<GenesisAccount> {
    let StakingStorage {
        storage,
        total_staked,
    } = generate_storage_data(layout, validators, params)?;

    debug!(
        validators = validators.len(),
        slots = storage.len(),
        %total_staked,
        "Generated staking contract storage"
    );

    Ok(GenesisAccount {
        balance: total_staked,
        code: Some(layout.code.clone()),
        storage: Some(storage),
        ..Default::default()
    })
}
