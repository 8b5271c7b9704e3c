//! Compiled contract artifacts.

use std::path::{Path, PathBuf};

use alloy_core::primitives::Bytes;
use anyhow::{Context, Result};
use serde_json::Value;

use crate::contracts::{ArtifactNames, ContractKind};

/// Default directory holding the compiled artifacts.
pub const DEFAULT_ARTIFACTS_DIR: &str = "build/contracts";

/// Loads creation bytecode from a build output directory.
///
/// Both the Truffle layout (`<dir>/<Name>.json` with a `bytecode` string) and the Foundry
/// layout (`<dir>/<Name>.sol/<Name>.json` with `bytecode.object`) are understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractArtifacts {
    dir: PathBuf,
    names: ArtifactNames,
}

impl Default for ContractArtifacts {
    fn default() -> Self {
        Self::new(DEFAULT_ARTIFACTS_DIR, ArtifactNames::default())
    }
}

impl ContractArtifacts {
    pub fn new(dir: impl Into<PathBuf>, names: ArtifactNames) -> Self {
        Self {
            dir: dir.into(),
            names,
        }
    }

    /// Path of the artifact file for a contract.
    pub fn artifact_path(&self, contract: ContractKind) -> Result<PathBuf> {
        let name = self.names.name(contract);

        let truffle = self.dir.join(format!("{name}.json"));
        let foundry = self.dir.join(format!("{name}.sol")).join(format!("{name}.json"));

        if truffle.exists() {
            Ok(truffle)
        } else if foundry.exists() {
            Ok(foundry)
        } else {
            anyhow::bail!(
                "Cannot find artifact for {contract} ({name}) in {}",
                self.dir.display()
            )
        }
    }

    /// Creation bytecode for a contract.
    pub fn bytecode(&self, contract: ContractKind) -> Result<Bytes> {
        let path = self.artifact_path(contract)?;
        load_bytecode(&path).with_context(|| format!("Failed to load {contract} artifact"))
    }
}

/// Read the creation bytecode out of an artifact file.
pub fn load_bytecode(path: &Path) -> Result<Bytes> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read artifact {}", path.display()))?;
    let json: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse artifact {} as JSON", path.display()))?;

    let bytecode_hex = match &json["bytecode"] {
        Value::String(code) => code.as_str(),
        Value::Object(code) => code
            .get("object")
            .and_then(Value::as_str)
            .context("bytecode.object missing")?,
        _ => anyhow::bail!("No bytecode in artifact {}", path.display()),
    };

    let bytecode = hex::decode(bytecode_hex.trim_start_matches("0x"))
        .context("Invalid bytecode hex (unlinked libraries are not supported)")?;

    if bytecode.is_empty() {
        anyhow::bail!(
            "Artifact {} has no creation bytecode (abstract contract or interface?)",
            path.display()
        );
    }

    Ok(bytecode.into())
}
