//! Storage writes replicating `stake()` on the staking contract

use std::collections::BTreeMap;

use alloy_primitives::{Address, B256, U256};

use crate::layout::StakingSlots;
use crate::slots::{StorageIndexes, StorageSlotCalculator};

fn word(value: U256) -> B256 {
    B256::from(value.to_be_bytes::<32>())
}

/// Record the state left behind by validator `address` staking `stake` as the
/// `index`-th registration, with `total_staked` already including its stake.
pub(crate) fn set_validator_stake(
    storage: &mut BTreeMap<B256, B256>,
    slots: &StakingSlots,
    address: Address,
    index: u64,
    stake: U256,
    total_staked: U256,
) {
    let indexes = StorageIndexes::new(slots, address, index);

    // _validators.push(address)
    storage.insert(indexes.validators_index, address.into_word());
    storage.insert(
        indexes.validators_array_size_index,
        word(U256::from(index) + U256::from(1u64)),
    );

    // _addressToIsValidator[address] = true
    storage.insert(indexes.address_to_is_validator_index, word(U256::from(1u64)));

    // _addressToStakedAmount[address] += stake
    storage.insert(indexes.address_to_staked_amount_index, word(stake));

    // _addressToValidatorIndex[address] = _validators.length before the push
    storage.insert(indexes.address_to_validator_index_index, word(U256::from(index)));

    // _stakedAmount += stake
    storage.insert(indexes.staked_amount_index, word(total_staked));
}

/// Record the minimum and maximum validator counts
pub(crate) fn set_validator_bounds(
    storage: &mut BTreeMap<B256, B256>,
    slots: &StakingSlots,
    min_validator_count: u64,
    max_validator_count: u64,
) {
    storage.insert(
        StorageSlotCalculator::scalar_slot(slots.min_num_validators),
        word(U256::from(min_validator_count)),
    );
    storage.insert(
        StorageSlotCalculator::scalar_slot(slots.max_num_validators),
        word(U256::from(max_validator_count)),
    );
}
