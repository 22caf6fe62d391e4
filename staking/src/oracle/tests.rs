use std::io::Write;

use alloy_primitives::{address, bytes, Address, Bytes, B256, U256};

use super::{
    deploy_from_artifact, CallRequest, CreationRequest, EphemeralChain, OracleError,
    DEFAULT_CREATION_GAS_LIMIT,
};
use crate::artifact::ContractArtifact;

/// `sstore(0, 42)` followed by returning [`RUNTIME`]
const INIT_CODE: Bytes = bytes!("602a600055600a8060106000396000f3602a60005260206000f3");

/// `return(mstore(0, 42), 32)`
const RUNTIME: Bytes = bytes!("602a60005260206000f3");

const DEPLOYER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

fn creation(code: Bytes) -> CreationRequest {
    CreationRequest {
        code,
        sender: DEPLOYER,
        value: U256::ZERO,
        gas_limit: DEFAULT_CREATION_GAS_LIMIT,
    }
}

#[test_log::test]
fn test_creation_commits_state() {
    let mut chain = EphemeralChain::new();
    let address = chain.execute_creation(creation(INIT_CODE)).unwrap();

    assert_eq!(address, DEPLOYER.create(0));
    assert_eq!(chain.nonce(DEPLOYER), 1);
    assert_eq!(chain.nonce(address), 1);
    assert_eq!(chain.code(address), Some(RUNTIME));

    let storage = chain.storage(address);
    assert_eq!(storage.len(), 1);
    assert_eq!(storage[&B256::ZERO], B256::from(U256::from(42u64)));

    // Sender nonce is tracked across transactions
    let second = chain.execute_creation(creation(INIT_CODE)).unwrap();
    assert_eq!(second, DEPLOYER.create(1));
}

#[test_log::test]
fn test_creation_revert_is_reported() {
    let mut chain = EphemeralChain::new();
    let result = chain.execute_creation(creation(bytes!("60006000fd")));
    assert!(matches!(result, Err(OracleError::Reverted(_))));
}

#[test_log::test]
fn test_insufficient_balance_is_rejected() {
    let mut chain = EphemeralChain::new();
    let result = chain.execute_creation(CreationRequest {
        value: U256::from(1u64),
        ..creation(INIT_CODE)
    });
    assert!(matches!(result, Err(OracleError::Transaction(_))));
}

#[test_log::test]
fn test_call_installed_code() {
    let target = address!("0x0000000000000000000000000000000000001001");
    let mut chain = EphemeralChain::new();
    chain.install_code(target, RUNTIME);
    chain.fund(DEPLOYER, U256::from(5u64));

    let output = chain
        .execute_call(CallRequest {
            to: target,
            input: Bytes::new(),
            sender: DEPLOYER,
            value: U256::from(3u64),
            gas_limit: 100_000,
        })
        .unwrap();

    assert_eq!(output, Bytes::from(B256::from(U256::from(42u64)).to_vec()));
    assert_eq!(chain.balance(target), U256::from(3u64));
    assert_eq!(chain.balance(DEPLOYER), U256::from(2u64));
    assert_eq!(chain.code(target), Some(RUNTIME));
}

#[test_log::test]
fn test_set_storage_is_harvested() {
    let target = Address::repeat_byte(0x42);
    let mut chain = EphemeralChain::new();
    chain.install_code(target, RUNTIME);
    chain
        .set_storage(target, B256::with_last_byte(5), B256::with_last_byte(9))
        .unwrap();
    chain
        .set_storage(target, B256::with_last_byte(6), B256::ZERO)
        .unwrap();

    let account = chain.genesis_account(target);
    let storage = account.storage.unwrap();
    assert_eq!(storage.len(), 1);
    assert_eq!(storage[&B256::with_last_byte(5)], B256::with_last_byte(9));
    assert_eq!(account.nonce, None);
}

#[test_log::test]
fn test_deploy_from_artifact() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"bytecode": "{INIT_CODE}", "deployedBytecode": "{RUNTIME}"}}"#
    )
    .unwrap();

    let artifact = ContractArtifact::from_file(file.path()).unwrap();
    let account = deploy_from_artifact(&artifact, DEFAULT_CREATION_GAS_LIMIT).unwrap();

    assert_eq!(account.code, Some(RUNTIME));
    assert_eq!(account.balance, U256::ZERO);
    assert_eq!(account.nonce, Some(1));
    assert_eq!(
        account.storage.unwrap()[&B256::ZERO],
        B256::from(U256::from(42u64))
    );
}

#[test]
fn test_diff_storage_treats_absent_as_zero() {
    use std::collections::BTreeMap;

    use super::{diff_storage, SlotMismatch};

    let expected = BTreeMap::from([
        (B256::with_last_byte(1), B256::ZERO),
        (B256::with_last_byte(2), B256::with_last_byte(7)),
        (B256::with_last_byte(3), B256::with_last_byte(1)),
    ]);
    let actual = BTreeMap::from([
        (B256::with_last_byte(2), B256::with_last_byte(7)),
        (B256::with_last_byte(4), B256::with_last_byte(1)),
    ]);

    assert_eq!(
        diff_storage(&expected, &actual),
        vec![
            SlotMismatch {
                key: B256::with_last_byte(3),
                expected: B256::with_last_byte(1),
                actual: B256::ZERO,
            },
            SlotMismatch {
                key: B256::with_last_byte(4),
                expected: B256::ZERO,
                actual: B256::with_last_byte(1),
            },
        ]
    );
}
