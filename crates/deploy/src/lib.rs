//! mintbox-deploy - Deployment library for the collectible, sale and loot box contracts.
//!
//! This crate selects a deployment plan from a [`DeployConfig`], deploys the contracts in
//! dependency order through a [`ContractDeployer`], and wires the loot box afterwards.

pub mod artifacts;
pub mod config;
pub mod contracts;
mod deployer;
pub mod network;
mod orchestrator;
pub mod plan;
pub mod record;
mod rpc;
mod rpc_deployer;

pub use artifacts::ContractArtifacts;
pub use config::{CONFIG_FILENAME, DeployConfig};
pub use contracts::{ArtifactNames, ContractKind};
pub use deployer::{ContractDeployer, DeployedContracts};
pub use network::registry_address;
pub use orchestrator::{DeploymentOutcome, Orchestrator, RunState};
pub use plan::{ConstructorArg, DeployStep, Plan, Wiring};
pub use record::DeploymentRecord;
pub use rpc_deployer::{
    DEFAULT_CONFIRMATION_TIMEOUT_SECS, DEFAULT_RPC_URL, RpcDeployer, RpcDeployerConfig,
};
