//! Error types for the execution-based path

use alloy_primitives::Bytes;
use thiserror::Error;

use crate::artifact::ArtifactError;
use crate::predeploy::PredeployError;

/// Result type for oracle operations
pub type Result<T> = core::result::Result<T, OracleError>;

/// Errors that can occur while executing against the ephemeral chain
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Transaction rejected: {0}")]
    Transaction(String),

    #[error("Execution reverted with output {0}")]
    Reverted(Bytes),

    #[error("Execution halted: {0}")]
    Halted(String),

    #[error("Creation transaction did not produce a contract address")]
    NoContractCreated,

    #[error("State database error: {0}")]
    Database(String),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Predeploy(#[from] PredeployError),
}
