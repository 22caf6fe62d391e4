//! Genesis state generation for the proof-of-stake staking contract.
//!
//! The storage a validator registry contract would hold after a series of
//! `stake()` calls is computed directly from the contract's storage layout,
//! then placed into a genesis account.

use std::path::PathBuf;

use alloy_genesis::GenesisAccount;
use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use tracing::{info, warn};

use crate::artifact::ContractArtifact;
use crate::config::load_config;
use crate::genesis::{build_genesis, write_genesis};
use crate::layout::{
    StakingLayout, DEFAULT_MAX_VALIDATOR_COUNT, DEFAULT_MIN_VALIDATOR_COUNT,
    STAKING_CONTRACT_ADDRESS,
};
use crate::oracle::{deploy_from_artifact, diff_storage, replay_stakes, DEFAULT_CREATION_GAS_LIMIT};
use crate::predeploy::{parse_validators, predeploy_staking_contract, PredeployParams};

pub mod artifact;
pub mod config;
pub mod genesis;
pub mod layout;
pub mod oracle;
pub mod predeploy;
pub mod slots;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Account(cmd) => cmd.run(),
            Commands::Genesis(cmd) => cmd.run(),
            Commands::Artifact(cmd) => cmd.run(),
            Commands::Verify(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the staking contract genesis account
    Account(AccountCmd),

    /// Generate a complete genesis file from a configuration file
    Genesis(GenesisCmd),

    /// Build a genesis account by deploying a compiled artifact on an in-memory EVM
    Artifact(ArtifactCmd),

    /// Check the computed storage against an EVM replay of the same stakes
    Verify(VerifyCmd),
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct StakingArgs {
    /// Comma separated validator addresses, in registration order
    #[clap(long, default_value = "")]
    validators: String,
    /// Minimum number of validators (decimal or 0x-prefixed hex)
    #[clap(long, default_value_t = DEFAULT_MIN_VALIDATOR_COUNT.to_string())]
    min: String,
    /// Maximum number of validators (decimal or 0x-prefixed hex)
    #[clap(long, default_value_t = DEFAULT_MAX_VALIDATOR_COUNT.to_string())]
    max: String,
}

impl StakingArgs {
    fn parse_inputs(&self) -> Result<(Vec<Address>, PredeployParams)> {
        Ok((
            parse_validators(&self.validators)?,
            PredeployParams::parse(&self.min, &self.max)?,
        ))
    }
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct AccountCmd {
    #[command(flatten)]
    staking: StakingArgs,
    /// Write the account JSON here instead of stdout
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl AccountCmd {
    fn run(&self) -> Result<()> {
        let (validators, params) = self.staking.parse_inputs()?;
        let account = predeploy_staking_contract(&StakingLayout::default(), &validators, &params)?;
        emit_account(&account, self.output.as_ref())
    }
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct GenesisCmd {
    /// Path to the TOML configuration file
    #[clap(short, long)]
    config: PathBuf,
    /// Path of the genesis file to write
    #[clap(short, long, default_value = "./assets/genesis.json")]
    output: PathBuf,
}

impl GenesisCmd {
    fn run(&self) -> Result<()> {
        let config = load_config(&self.config, None)?;
        let genesis = build_genesis(&config)?;
        write_genesis(&genesis, &self.output)
    }
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ArtifactCmd {
    /// Path to the compiled contract artifact (JSON)
    #[clap(short, long)]
    path: PathBuf,
    /// Gas limit of the creation transaction
    #[clap(long, default_value_t = DEFAULT_CREATION_GAS_LIMIT)]
    gas_limit: u64,
    /// Write the account JSON here instead of stdout
    #[clap(short, long)]
    output: Option<PathBuf>,
}

impl ArtifactCmd {
    fn run(&self) -> Result<()> {
        let artifact = ContractArtifact::from_file(&self.path)?;
        let account = deploy_from_artifact(&artifact, self.gas_limit)?;
        emit_account(&account, self.output.as_ref())
    }
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct VerifyCmd {
    #[command(flatten)]
    staking: StakingArgs,
}

impl VerifyCmd {
    fn run(&self) -> Result<()> {
        let (validators, params) = self.staking.parse_inputs()?;
        let layout = StakingLayout::default();

        let computed = predeploy_staking_contract(&layout, &validators, &params)?;
        let replayed = replay_stakes(&layout, &validators, &params, STAKING_CONTRACT_ADDRESS)?;

        let mismatches = diff_storage(
            &computed.storage.unwrap_or_default(),
            &replayed.storage.unwrap_or_default(),
        );
        for mismatch in &mismatches {
            warn!(
                key = %mismatch.key,
                expected = %mismatch.expected,
                actual = %mismatch.actual,
                "Storage mismatch"
            );
        }

        if computed.balance != replayed.balance {
            return Err(eyre!(
                "balance mismatch: computed {}, replayed {}",
                computed.balance,
                replayed.balance
            ));
        }
        if !mismatches.is_empty() {
            return Err(eyre!("{} storage slots differ", mismatches.len()));
        }

        info!(
            validators = validators.len(),
            "Computed storage matches EVM replay"
        );
        Ok(())
    }
}

fn emit_account(account: &GenesisAccount, output: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(account)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("Staking account written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALIDATORS: &str =
        "0x70997970C51812dc3A010C7d01b50e0d17dc79C8,0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC";

    #[test]
    fn parses_account_command() {
        let cli = Cli::try_parse_from([
            "staking-genesis",
            "account",
            "--validators",
            VALIDATORS,
            "--max",
            "0x64",
        ])
        .unwrap();

        let Commands::Account(cmd) = cli.command else {
            panic!("expected account command");
        };
        let (validators, params) = cmd.staking.parse_inputs().unwrap();
        assert_eq!(validators.len(), 2);
        assert_eq!(params, PredeployParams::new(1, 100).unwrap());
        assert_eq!(cmd.output, None);
    }

    #[test]
    fn account_command_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("staking.json");

        let cli = Cli::try_parse_from([
            "staking-genesis",
            "account",
            "--validators",
            VALIDATORS,
            "--output",
            output.to_str().unwrap(),
        ])
        .unwrap();
        cli.run().unwrap();

        let account: GenesisAccount =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            account.balance,
            layout::DEFAULT_STAKED_BALANCE * alloy_primitives::U256::from(2u64)
        );
        assert_eq!(account.code, Some(StakingLayout::default().code));
    }

    #[test_log::test]
    fn verify_command_succeeds() {
        let cli =
            Cli::try_parse_from(["staking-genesis", "verify", "--validators", VALIDATORS]).unwrap();
        cli.run().unwrap();
    }

    #[test]
    fn rejects_oversized_bound() {
        let cli = Cli::try_parse_from([
            "staking-genesis",
            "account",
            "--max",
            "0x10000000000000000",
        ])
        .unwrap();
        assert!(cli.run().is_err());
    }
}
