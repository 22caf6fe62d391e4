//! Compiled contract artifacts.
//!
//! Accepts both the flat Hardhat/Truffle shape
//! (`"bytecode": "0x…"`) and the Foundry shape (`"bytecode": { "object": "0x…" }`).

use std::path::{Path, PathBuf};

use alloy_primitives::Bytes;
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, ArtifactError>;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Error reading artifact {}: {}", .0.display(), .1)]
    Read(PathBuf, std::io::Error),

    #[error("Error decoding artifact {}: {}", .0.display(), .1)]
    Decode(PathBuf, serde_json::Error),

    #[error("Artifact {} has empty {}", .0.display(), .1)]
    EmptyBytecode(PathBuf, &'static str),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    Hex(Bytes),
    Object { object: Bytes },
}

impl From<ArtifactBytecode> for Bytes {
    fn from(value: ArtifactBytecode) -> Self {
        match value {
            ArtifactBytecode::Hex(bytes) | ArtifactBytecode::Object { object: bytes } => bytes,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    bytecode: ArtifactBytecode,
    deployed_bytecode: ArtifactBytecode,
}

/// Creation and runtime bytecode of a compiled contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifact {
    /// Init code executed by the creation transaction
    pub bytecode: Bytes,
    /// Code stored at the contract address once deployed
    pub deployed_bytecode: Bytes,
}

impl ContractArtifact {
    /// Load an artifact from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ArtifactError::Read(path.to_owned(), e))?;
        Self::from_json(path, &content)
    }

    fn from_json(path: &Path, content: &str) -> Result<Self> {
        let raw: RawArtifact = serde_json::from_str(content)
            .map_err(|e| ArtifactError::Decode(path.to_owned(), e))?;

        let artifact = Self {
            bytecode: raw.bytecode.into(),
            deployed_bytecode: raw.deployed_bytecode.into(),
        };

        if artifact.bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode(path.to_owned(), "bytecode"));
        }
        if artifact.deployed_bytecode.is_empty() {
            return Err(ArtifactError::EmptyBytecode(
                path.to_owned(),
                "deployedBytecode",
            ));
        }

        Ok(artifact)
    }
}
