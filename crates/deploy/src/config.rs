//! Deployment configuration.

use std::{collections::BTreeMap, path::Path};

use alloy_core::primitives::{Address, address};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::contracts::ArtifactNames;

/// The default name for the mintbox configuration file.
pub const CONFIG_FILENAME: &str = "Mintbox.toml";

/// Default network name, matching a local development chain.
pub const DEFAULT_NETWORK: &str = "development";

/// Default gas allowance attached to contract deployments.
pub const DEFAULT_GAS_LIMIT: u64 = 5_000_000;

/// Default payment token used by the sale contract.
pub const DEFAULT_EXTERNAL_TOKEN_ADDRESS: Address =
    address!("E456F4099ec57d4634678A4Ba503eaE0030A274C");

/// Immutable configuration of a deployment run.
///
/// This is everything the orchestrator needs to select and execute a plan. It can be
/// serialized to/from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// The target network name. Selects the proxy registry address.
    pub network: String,
    /// Whether to deploy the loot box.
    pub lootbox_enabled: bool,
    /// The token the sale contract accepts.
    pub external_token_address: Address,
    /// An already deployed collectible to build the loot box on.
    ///
    /// When set (and the loot box is enabled) no collectible or sale contract is deployed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub existing_collectible_address: Option<Address>,
    /// Gas allowance attached to deployments that carry one.
    pub gas_limit: u64,
    /// Names of the loot box classes, in on-chain index order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rarity_classes: Vec<String>,
    /// Pre-minted token ids to register on the loot box, keyed by rarity class.
    ///
    /// Registered in [`DeployConfig::rarity_registrations`] order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rarity_token_ids: Option<BTreeMap<String, Vec<String>>>,
    /// Names of the compiled contract artifacts.
    pub artifacts: ArtifactNames,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            lootbox_enabled: false,
            external_token_address: DEFAULT_EXTERNAL_TOKEN_ADDRESS,
            existing_collectible_address: None,
            gas_limit: DEFAULT_GAS_LIMIT,
            rarity_classes: Vec::new(),
            rarity_token_ids: None,
            artifacts: ArtifactNames::default(),
        }
    }
}

impl DeployConfig {
    /// Save the configuration to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize deploy config to TOML")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }

    /// Load the configuration from a TOML file.
    ///
    /// If `path` is a directory, [`CONFIG_FILENAME`] inside it is loaded.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let config_path = resolve_config_path(path)?;

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
        let config: Self =
            toml::from_str(&content).context("Failed to parse config file as TOML")?;
        tracing::info!(path = %config_path.display(), "Configuration loaded");
        Ok(config)
    }

    /// The token id registrations to perform, in order.
    ///
    /// Keys that are class indices come first in ascending numeric order, then named
    /// classes in lexicographic order. Empty when no mapping is configured.
    pub fn rarity_registrations(&self) -> Vec<(&str, &[String])> {
        let Some(mapping) = &self.rarity_token_ids else {
            return Vec::new();
        };

        let mut registrations = mapping
            .iter()
            .map(|(rarity, token_ids)| (rarity.as_str(), token_ids.as_slice()))
            .collect::<Vec<_>>();
        registrations.sort_by(|(a, _), (b, _)| rarity_order(a).cmp(&rarity_order(b)));
        registrations
    }
}

/// Sort key placing class indices, numerically, before named classes.
fn rarity_order(rarity: &str) -> (bool, u64, &str) {
    match rarity.parse::<u64>() {
        Ok(index) => (false, index, rarity),
        Err(_) => (true, 0, rarity),
    }
}

/// Resolve a user-provided config location to a file path.
pub fn resolve_config_path(path: &Path) -> Result<std::path::PathBuf> {
    if !path.exists() {
        anyhow::bail!(
            "Configuration file or directory not found: {}",
            path.display()
        );
    }

    Ok(if path.is_dir() {
        path.join(CONFIG_FILENAME)
    } else {
        path.to_path_buf()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    #[test]
    fn test_defaults() {
        let config = DeployConfig::default();
        assert_eq!(config.network, "development");
        assert!(!config.lootbox_enabled);
        assert_eq!(config.gas_limit, 5_000_000);
        assert!(config.existing_collectible_address.is_none());
        assert!(config.rarity_token_ids.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new("mintbox-test").expect("Failed to create temp dir");
        let path = temp_dir.path().join(CONFIG_FILENAME);

        let mut rarity_token_ids = BTreeMap::new();
        rarity_token_ids.insert("common".to_string(), vec!["1".to_string(), "2".to_string()]);
        rarity_token_ids.insert("rare".to_string(), vec!["10".to_string()]);

        let config = DeployConfig {
            network: "rinkeby".to_string(),
            lootbox_enabled: true,
            existing_collectible_address: Some(address!(
                "faafdc07907ff5120a76b34b731b278c38d6043c"
            )),
            rarity_classes: vec!["common".to_string(), "rare".to_string()],
            rarity_token_ids: Some(rarity_token_ids),
            ..Default::default()
        };

        config.save_to_file(&path).expect("Failed to save config");

        // Loading from the directory picks up the default file name.
        let loaded = DeployConfig::load_from_file(temp_dir.path()).expect("Failed to load");
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new("mintbox-test").expect("Failed to create temp dir");
        let path = temp_dir.path().join("partial.toml");
        std::fs::write(
            &path,
            "lootbox_enabled = true\n\n[rarity_token_ids]\ncommon = [\"1\", \"2\"]\n",
        )
        .unwrap();

        let config = DeployConfig::load_from_file(&path).unwrap();
        assert!(config.lootbox_enabled);
        assert_eq!(config.network, DEFAULT_NETWORK);
        assert_eq!(config.external_token_address, DEFAULT_EXTERNAL_TOKEN_ADDRESS);
        assert_eq!(
            config.rarity_token_ids.unwrap()["common"],
            vec!["1".to_string(), "2".to_string()]
        );
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new("mintbox-test").expect("Failed to create temp dir");
        let result = DeployConfig::load_from_file(&temp_dir.path().join("nope.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_rarity_registrations_order() {
        let mut rarity_token_ids = BTreeMap::new();
        for rarity in ["rare", "10", "common", "2", "0"] {
            rarity_token_ids.insert(rarity.to_string(), vec![format!("{rarity}-id")]);
        }
        let config = DeployConfig {
            rarity_token_ids: Some(rarity_token_ids),
            ..Default::default()
        };

        let order = config
            .rarity_registrations()
            .into_iter()
            .map(|(rarity, _)| rarity)
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["0", "2", "10", "common", "rare"]);

        assert_eq!(config.rarity_registrations()[2].1.to_vec(), vec!["10-id".to_string()]);
        assert!(DeployConfig::default().rarity_registrations().is_empty());
    }
}
