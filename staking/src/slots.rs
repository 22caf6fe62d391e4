//! Storage key derivation for the staking contract.
//!
//! Follows the Solidity storage layout rules:
//! - value types live directly at their declared slot,
//! - `mapping(address => T)` entries live at `keccak256(pad32(key) ++ pad32(slot))`,
//! - dynamic array elements live at `keccak256(pad32(slot)) + index`, with the
//!   array length stored at the slot itself.
//!
//! See <https://docs.soliditylang.org/en/latest/internals/layout_in_storage.html>.

use alloy_primitives::{keccak256, Address, B256, U256};

use crate::layout::StakingSlots;

/// Storage slot calculator for Solidity mappings and arrays
pub struct StorageSlotCalculator;

impl StorageSlotCalculator {
    /// Key of a value stored directly at `slot`
    pub fn scalar_slot(slot: u64) -> B256 {
        B256::from(U256::from(slot).to_be_bytes::<32>())
    }

    /// Key holding the length of the dynamic array declared at `slot`
    pub fn array_length_slot(slot: u64) -> B256 {
        Self::scalar_slot(slot)
    }

    /// Base key of the elements of the dynamic array declared at `slot`
    pub fn array_base_slot(slot: u64) -> B256 {
        keccak256(Self::scalar_slot(slot))
    }

    /// Key of element `offset` of a dynamic array, given the array base key.
    ///
    /// The addition is carried out on the 256-bit integer and wraps, which is
    /// what the EVM does for `base + index` in storage addressing.
    pub fn array_element_slot(base: B256, offset: u64) -> B256 {
        let element = U256::from_be_bytes(base.0).wrapping_add(U256::from(offset));
        B256::from(element.to_be_bytes::<32>())
    }

    /// Key of the entry for `key` in the `mapping(address => _)` declared at `slot`
    pub fn mapping_slot(key: Address, slot: u64) -> B256 {
        let mut preimage = [0u8; 64];
        preimage[..32].copy_from_slice(key.into_word().as_slice());
        preimage[32..].copy_from_slice(Self::scalar_slot(slot).as_slice());
        keccak256(preimage)
    }
}

/// Storage keys touched when registering a single validator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StorageIndexes {
    /// `_validators[index]`
    pub validators_index: B256,
    /// `_validators.length`
    pub validators_array_size_index: B256,
    /// `_addressToIsValidator[address]`
    pub address_to_is_validator_index: B256,
    /// `_addressToStakedAmount[address]`
    pub address_to_staked_amount_index: B256,
    /// `_addressToValidatorIndex[address]`
    pub address_to_validator_index_index: B256,
    /// `_stakedAmount`
    pub staked_amount_index: B256,
}

impl StorageIndexes {
    /// Derive the keys for the validator `address` sitting at position `index`
    pub fn new(slots: &StakingSlots, address: Address, index: u64) -> Self {
        Self {
            validators_index: StorageSlotCalculator::array_element_slot(
                StorageSlotCalculator::array_base_slot(slots.validators),
                index,
            ),
            validators_array_size_index: StorageSlotCalculator::array_length_slot(
                slots.validators,
            ),
            address_to_is_validator_index: StorageSlotCalculator::mapping_slot(
                address,
                slots.address_to_is_validator,
            ),
            address_to_staked_amount_index: StorageSlotCalculator::mapping_slot(
                address,
                slots.address_to_staked_amount,
            ),
            address_to_validator_index_index: StorageSlotCalculator::mapping_slot(
                address,
                slots.address_to_validator_index,
            ),
            staked_amount_index: StorageSlotCalculator::scalar_slot(slots.staked_amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use alloy_primitives::b256;

    use super::*;

    #[test]
    fn scalar_slot_is_left_padded() {
        assert_eq!(StorageSlotCalculator::scalar_slot(0), B256::ZERO);
        assert_eq!(
            StorageSlotCalculator::scalar_slot(6),
            b256!("0x0000000000000000000000000000000000000000000000000000000000000006")
        );
        assert_eq!(
            StorageSlotCalculator::array_length_slot(0),
            StorageSlotCalculator::scalar_slot(0)
        );
    }

    #[test]
    fn array_base_matches_known_hashes() {
        assert_eq!(
            StorageSlotCalculator::array_base_slot(0),
            b256!("0x290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563")
        );
        assert_eq!(
            StorageSlotCalculator::array_base_slot(1),
            b256!("0xb10e2d527612073b26eecdfd717e6a320cf44b4afac2b0732d9fcbe2b7fa0cf6")
        );
    }

    #[test]
    fn array_element_adds_offset() {
        let base = StorageSlotCalculator::array_base_slot(0);
        assert_eq!(StorageSlotCalculator::array_element_slot(base, 0), base);
        assert_eq!(
            StorageSlotCalculator::array_element_slot(base, 2),
            b256!("0x290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e565")
        );
    }

    #[test]
    fn array_element_wraps_past_max_key() {
        let last = B256::repeat_byte(0xff);
        assert_eq!(
            StorageSlotCalculator::array_element_slot(last, 1),
            B256::ZERO
        );
        assert_eq!(
            StorageSlotCalculator::array_element_slot(last, 3),
            StorageSlotCalculator::scalar_slot(2)
        );
    }

    #[test]
    fn mapping_slot_hashes_address_then_slot() {
        let address = Address::repeat_byte(0xaa);

        let mut preimage = Vec::with_capacity(64);
        preimage.extend_from_slice(&[0u8; 12]);
        preimage.extend_from_slice(address.as_slice());
        preimage.extend_from_slice(&[0u8; 31]);
        preimage.push(2);

        assert_eq!(
            StorageSlotCalculator::mapping_slot(address, 2),
            keccak256(&preimage)
        );
        assert_ne!(
            StorageSlotCalculator::mapping_slot(address, 2),
            StorageSlotCalculator::mapping_slot(address, 3)
        );
    }

    #[test]
    fn mapping_slots_do_not_collide() {
        let slots = StakingSlots::default();
        let mut seen = HashSet::new();

        for i in 0u64..2_000 {
            let address = Address::from_word(keccak256(i.to_be_bytes()));
            for slot in [
                slots.address_to_is_validator,
                slots.address_to_staked_amount,
                slots.address_to_validator_index,
            ] {
                assert!(
                    seen.insert(StorageSlotCalculator::mapping_slot(address, slot)),
                    "collision for {address} at slot {slot}"
                );
            }
        }
    }

    #[test]
    fn storage_indexes_use_layout_slots() {
        let slots = StakingSlots::default();
        let address = Address::repeat_byte(0x11);
        let indexes = StorageIndexes::new(&slots, address, 3);

        assert_eq!(
            indexes.validators_index,
            StorageSlotCalculator::array_element_slot(
                StorageSlotCalculator::array_base_slot(0),
                3
            )
        );
        assert_eq!(indexes.validators_array_size_index, B256::ZERO);
        assert_eq!(
            indexes.address_to_is_validator_index,
            StorageSlotCalculator::mapping_slot(address, 1)
        );
        assert_eq!(
            indexes.address_to_staked_amount_index,
            StorageSlotCalculator::mapping_slot(address, 2)
        );
        assert_eq!(
            indexes.address_to_validator_index_index,
            StorageSlotCalculator::mapping_slot(address, 3)
        );
        assert_eq!(
            indexes.staked_amount_index,
            StorageSlotCalculator::scalar_slot(4)
        );
    }
}
