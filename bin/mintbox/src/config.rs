//! Layered loading of the deployment configuration.

use std::path::Path;

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use mintbox_deploy::{DeployConfig, config::resolve_config_path};

use crate::cli::ConfigOverrides;

/// Prefix of the environment variables overriding configuration values.
const ENV_PREFIX: &str = "MINTBOX_";

/// Configuration keys that can be set from the environment.
///
/// Other `MINTBOX_*` variables belong to the CLI itself (verbosity, RPC URL, ...).
const ENV_KEYS: &[&str] = &[
    "network",
    "lootbox_enabled",
    "external_token_address",
    "existing_collectible_address",
    "gas_limit",
];

/// Build the deployment configuration.
///
/// Layers, lowest to highest precedence: defaults, the TOML file (if any), `MINTBOX_*`
/// environment variables, command line flags.
pub fn load(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<DeployConfig> {
    let mut figment = Figment::from(Serialized::defaults(DeployConfig::default()));

    if let Some(path) = config_path {
        let path = resolve_config_path(path)?;
        tracing::debug!(path = %path.display(), "Loading configuration file");
        figment = figment.merge(Toml::file_exact(path));
    }

    figment
        .merge(Env::prefixed(ENV_PREFIX).only(ENV_KEYS))
        .merge(Serialized::defaults(overrides))
        .extract()
        .context("Failed to load deployment configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_core::primitives::Address;
    use mintbox_deploy::config::DEFAULT_GAS_LIMIT;
    use tempdir::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let config = load(None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.gas_limit, DEFAULT_GAS_LIMIT);
    }

    #[test]
    fn test_file_then_flags() {
        let dir = TempDir::new("mintbox-config").unwrap();
        let path = dir.path().join("Mintbox.toml");
        std::fs::write(
            &path,
            r#"
network = "rinkeby"
lootbox_enabled = true
gas_limit = 4000000
rarity_classes = ["common", "rare"]

[rarity_token_ids]
rare = ["10"]
common = ["1", "2"]
"#,
        )
        .unwrap();

        let overrides = ConfigOverrides {
            gas_limit: Some(7_000_000),
            existing_collectible: Some(Address::repeat_byte(0xee)),
            ..Default::default()
        };

        // Loaded through the directory to exercise the default file name.
        let config = load(Some(dir.path()), &overrides).unwrap();

        assert_eq!(config.network, "rinkeby");
        assert!(config.lootbox_enabled);
        assert_eq!(config.gas_limit, 7_000_000);
        assert_eq!(
            config.existing_collectible_address,
            Some(Address::repeat_byte(0xee))
        );
        assert_eq!(config.rarity_classes, vec!["common", "rare"]);

        let mapping = config.rarity_token_ids.unwrap();
        assert_eq!(mapping.keys().collect::<Vec<_>>(), vec!["common", "rare"]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new("mintbox-config").unwrap();
        let result = load(
            Some(dir.path().join("missing.toml").as_path()),
            &ConfigOverrides::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_value_is_an_error() {
        let dir = TempDir::new("mintbox-config").unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "external_token_address = \"not-an-address\"\n").unwrap();

        assert!(load(Some(path.as_path()), &ConfigOverrides::default()).is_err());
    }
}
