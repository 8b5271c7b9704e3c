use std::path::{Path, PathBuf};

use alloy_core::primitives::Address;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{deployer::DeployedContracts, orchestrator::DeploymentOutcome, plan::Plan};

/// File name of the deployment record inside the output directory.
pub const DEPLOYMENTS_FILENAME: &str = "deployments.json";

/// Addresses produced by a successful run, stored alongside the deployment outputs.
///
/// This file is saved to `{outdata}/deployments.json` after a run completes so later
/// tooling can find the contracts without re-reading chain history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentRecord {
    /// The network the contracts were deployed to
    pub network: String,
    /// The plan that was executed
    pub plan: Plan,
    /// The proxy registry passed to the constructors
    pub registry_address: Address,
    /// Deployed contract addresses
    pub contracts: DeployedContracts,
    /// When the run completed
    pub deployed_at: DateTime<Utc>,
    /// mintbox version that created this record
    pub mintbox_version: String,
}

impl DeploymentRecord {
    /// Create a record for a completed run, stamped with the current time.
    pub fn new(outcome: DeploymentOutcome) -> Self {
        Self {
            network: outcome.network,
            plan: outcome.plan,
            registry_address: outcome.registry,
            contracts: outcome.contracts,
            deployed_at: Utc::now(),
            mintbox_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Save this record to a file.
    ///
    /// The file is written as formatted JSON for human readability.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize deployment record")?;

        std::fs::write(path, json).with_context(|| {
            format!("Failed to write deployment record to {}", path.display())
        })?;

        Ok(())
    }

    /// Save this record as [`DEPLOYMENTS_FILENAME`] in `outdata`, creating the directory if needed.
    pub fn save_to_dir(&self, outdata: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(outdata).with_context(|| {
            format!("Failed to create output directory {}", outdata.display())
        })?;

        let path = outdata.join(DEPLOYMENTS_FILENAME);
        self.save_to_file(&path)?;
        tracing::info!(path = %path.display(), "Deployment record saved");
        Ok(path)
    }

    /// Load a record from a file.
    ///
    /// Returns an error if the file doesn't exist, is malformed, or cannot be read.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Deployment record does not exist: {}", path.display());
        }

        let content = std::fs::read_to_string(path).with_context(|| {
            format!("Failed to read deployment record from {}", path.display())
        })?;

        serde_json::from_str(&content).context("Failed to parse deployment record JSON")
    }
}
