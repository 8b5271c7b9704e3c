use std::path::PathBuf;

use alloy_core::primitives::Address;
use clap::{Args, Parser, Subcommand};
use mintbox_deploy::{DEFAULT_CONFIRMATION_TIMEOUT_SECS, DEFAULT_RPC_URL, artifacts};
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use url::Url;

#[derive(Parser)]
#[command(name = "mintbox")]
#[command(
    author,
    version,
    about = "Deploy the collectible, sale and loot box contracts"
)]
pub struct Cli {
    /// The verbosity level.
    #[arg(short, long, env = "MINTBOX_VERBOSITY", default_value_t = LevelFilter::INFO)]
    pub verbosity: LevelFilter,

    /// Path to a Mintbox.toml configuration file (or a directory containing one).
    ///
    /// Values from the file are overridden by `MINTBOX_*` environment variables and
    /// by the flags below.
    #[arg(long, alias = "conf", env = "MINTBOX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Deployment configuration overrides.
    #[clap(flatten)]
    pub overrides: ConfigOverrides,

    #[command(subcommand)]
    pub command: Command,
}

/// Flags overriding values of the deployment configuration.
///
/// Unset flags leave the configured value untouched.
#[derive(Debug, Clone, Default, Args, Serialize)]
pub struct ConfigOverrides {
    /// The target network name (e.g. rinkeby, mainnet, development).
    #[arg(short, long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,

    /// Deploy the loot box.
    #[arg(long, global = true, num_args = 0..=1, default_missing_value = "true")]
    #[serde(rename = "lootbox_enabled", skip_serializing_if = "Option::is_none")]
    pub lootbox: Option<bool>,

    /// The token accepted by the sale contract.
    #[arg(long, global = true)]
    #[serde(
        rename = "external_token_address",
        skip_serializing_if = "Option::is_none"
    )]
    pub external_token: Option<Address>,

    /// Build the loot box over an already deployed collectible.
    #[arg(long, global = true)]
    #[serde(
        rename = "existing_collectible_address",
        skip_serializing_if = "Option::is_none"
    )]
    pub existing_collectible: Option<Address>,

    /// Gas allowance attached to contract deployments.
    #[arg(long, global = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gas_limit: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Deploy the contracts of the selected plan.
    Deploy(DeployArgs),
    /// Print the selected plan without sending any transaction.
    Plan,
}

#[derive(Debug, Clone, Args)]
pub struct DeployArgs {
    /// The URL of the JSON-RPC endpoint.
    #[arg(long, alias = "rpc", env = "MINTBOX_RPC_URL", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: Url,

    /// The deploying account. Defaults to the node's first account.
    #[arg(long, env = "MINTBOX_FROM")]
    pub from: Option<Address>,

    /// Directory holding the compiled contract artifacts.
    #[arg(long, env = "MINTBOX_ARTIFACTS", default_value = artifacts::DEFAULT_ARTIFACTS_DIR)]
    pub artifacts: PathBuf,

    /// Directory the deployment record is written to.
    #[arg(long, alias = "outdata", env = "MINTBOX_OUTDATA", default_value = ".")]
    pub outdata: PathBuf,

    /// Seconds to wait for each transaction to be mined.
    #[arg(
        long,
        env = "MINTBOX_CONFIRMATION_TIMEOUT",
        default_value_t = DEFAULT_CONFIRMATION_TIMEOUT_SECS
    )]
    pub confirmation_timeout: u64,
}
