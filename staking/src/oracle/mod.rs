//! # Execution Oracle
//!
//! Runs contract code on an ephemeral in-memory EVM and harvests the resulting
//! account state. Used as a reference to check the direct storage computation
//! and to build genesis accounts straight from compiled artifacts.

pub mod error;
pub mod replay;
#[cfg(test)]
mod tests;

use std::collections::BTreeMap;

use alloy_genesis::GenesisAccount;
use alloy_primitives::{Address, Bytes, B256, U256};
pub use error::{OracleError, Result};
pub use replay::{deploy_from_artifact, diff_storage, replay_stakes, SlotMismatch};
use revm::bytecode::Bytecode;
use revm::context::{Context, TxEnv};
use revm::context_interface::result::{ExecutionResult, Output};
use revm::database::{CacheDB, EmptyDB};
use revm::primitives::TxKind;
use revm::state::AccountInfo;
use revm::{ExecuteCommitEvm, MainBuilder, MainContext};
use tracing::debug;

/// Gas limit used for creation transactions unless overridden
pub const DEFAULT_CREATION_GAS_LIMIT: u64 = 10_000_000;

/// Contract creation transaction
#[derive(Clone, Debug)]
pub struct CreationRequest {
    pub code: Bytes,
    pub sender: Address,
    pub value: U256,
    pub gas_limit: u64,
}

/// Message call transaction
#[derive(Clone, Debug)]
pub struct CallRequest {
    pub to: Address,
    pub input: Bytes,
    pub sender: Address,
    pub value: U256,
    pub gas_limit: u64,
}

/// In-memory chain state that lives only for the duration of one computation
#[derive(Debug, Default)]
pub struct EphemeralChain {
    db: CacheDB<EmptyDB>,
}

impl EphemeralChain {
    pub fn new() -> Self {
        Self::default()
    }

    fn account_info(&self, address: Address) -> AccountInfo {
        self.db
            .cache
            .accounts
            .get(&address)
            .map(|account| account.info.clone())
            .unwrap_or_default()
    }

    /// Set the balance of `address`
    pub fn fund(&mut self, address: Address, balance: U256) {
        let mut info = self.account_info(address);
        info.balance = balance;
        self.db.insert_account_info(address, info);
    }

    /// Place runtime `code` at `address` without running any init code
    pub fn install_code(&mut self, address: Address, code: Bytes) {
        let bytecode = Bytecode::new_raw(code);
        let mut info = self.account_info(address);
        info.code_hash = bytecode.hash_slow();
        info.code = Some(bytecode);
        self.db.insert_account_info(address, info);
    }

    /// Write a single storage cell of `address`
    pub fn set_storage(&mut self, address: Address, key: B256, value: B256) -> Result<()> {
        self.db
            .insert_account_storage(address, key.into(), value.into())
            .map_err(|e| OracleError::Database(e.to_string()))
    }

    fn transact(&mut self, tx: TxEnv) -> Result<Output> {
        let db = core::mem::take(&mut self.db);
        let mut evm = Context::mainnet().with_db(db).build_mainnet();
        let outcome = evm.transact_commit(tx);
        self.db = evm.ctx.journaled_state.database;

        match outcome.map_err(|e| OracleError::Transaction(e.to_string()))? {
            ExecutionResult::Success { output, .. } => Ok(output),
            ExecutionResult::Revert { output, .. } => Err(OracleError::Reverted(output)),
            ExecutionResult::Halt { reason, .. } => Err(OracleError::Halted(format!("{reason:?}"))),
        }
    }

    /// Execute a contract creation transaction and commit its effects
    pub fn execute_creation(&mut self, request: CreationRequest) -> Result<Address> {
        let tx = TxEnv {
            caller: request.sender,
            kind: TxKind::Create,
            data: request.code,
            value: request.value,
            gas_limit: request.gas_limit,
            nonce: self.nonce(request.sender),
            ..Default::default()
        };

        match self.transact(tx)? {
            Output::Create(_, Some(address)) => {
                debug!(%address, sender = %request.sender, "Contract created");
                Ok(address)
            }
            _ => Err(OracleError::NoContractCreated),
        }
    }

    /// Execute a message call and commit its effects, returning the call output
    pub fn execute_call(&mut self, request: CallRequest) -> Result<Bytes> {
        let tx = TxEnv {
            caller: request.sender,
            kind: TxKind::Call(request.to),
            data: request.input,
            value: request.value,
            gas_limit: request.gas_limit,
            nonce: self.nonce(request.sender),
            ..Default::default()
        };

        match self.transact(tx)? {
            Output::Call(output) | Output::Create(output, _) => Ok(output),
        }
    }

    /// Committed non-zero storage of `address`
    pub fn storage(&self, address: Address) -> BTreeMap<B256, B256> {
        self.db
            .cache
            .accounts
            .get(&address)
            .map(|account| {
                account
                    .storage
                    .iter()
                    .filter(|(_, value)| !value.is_zero())
                    .map(|(key, value)| (B256::from(*key), B256::from(*value)))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn balance(&self, address: Address) -> U256 {
        self.account_info(address).balance
    }

    pub fn nonce(&self, address: Address) -> u64 {
        self.account_info(address).nonce
    }

    /// Runtime code deployed at `address`, if any
    pub fn code(&self, address: Address) -> Option<Bytes> {
        self.account_info(address)
            .code
            .map(|code| code.original_bytes())
            .filter(|code| !code.is_empty())
    }

    /// Package the committed state of `address` as a genesis account
    pub fn genesis_account(&self, address: Address) -> GenesisAccount {
        let nonce = self.nonce(address);
        GenesisAccount {
            balance: self.balance(address),
            nonce: (nonce != 0).then_some(nonce),
            code: self.code(address),
            storage: Some(self.storage(address)),
            ..Default::default()
        }
    }
}
