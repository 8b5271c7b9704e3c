//! Deployment plans.
//!
//! A plan is selected once from the configuration and describes, as plain data, the
//! contracts to deploy in order and the wiring to run afterwards. Constructor arguments
//! may refer to contracts deployed by earlier steps, never later ones.

use std::fmt;

use alloy_core::primitives::Address;
use serde::{Deserialize, Serialize};

use crate::{config::DeployConfig, contracts::ContractKind};

/// The three deployment plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case", tag = "kind")]
#[strum(serialize_all = "kebab-case")]
pub enum Plan {
    /// Collectible, then sale. No loot box.
    CollectibleOnly,
    /// A loot box over an already deployed collectible.
    LootBoxOverExisting { collectible: Address },
    /// Collectible, loot box and sale, with ownership handed to the loot box.
    FullBundle,
}

/// A constructor argument, possibly depending on an earlier step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstructorArg {
    /// The network's proxy registry.
    Registry,
    /// The configured external token.
    ExternalToken,
    /// A fixed address.
    Address(Address),
    /// The address produced by an earlier deployment step.
    Deployed(ContractKind),
}

impl fmt::Display for ConstructorArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstructorArg::Registry => write!(f, "registry"),
            ConstructorArg::ExternalToken => write!(f, "external-token"),
            ConstructorArg::Address(address) => write!(f, "{address}"),
            ConstructorArg::Deployed(contract) => write!(f, "{contract}.address"),
        }
    }
}

/// One contract deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployStep {
    pub contract: ContractKind,
    pub args: Vec<ConstructorArg>,
    /// Whether the deployment carries the configured gas allowance.
    pub bounded_gas: bool,
}

impl DeployStep {
    fn new(contract: ContractKind, args: Vec<ConstructorArg>, bounded_gas: bool) -> Self {
        Self {
            contract,
            args,
            bounded_gas,
        }
    }
}

/// Post-deployment wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wiring {
    /// Hand the fresh collectible's ownership to the loot box.
    pub transfer_ownership: bool,
}

impl Plan {
    /// Select the plan for a configuration.
    pub fn select(config: &DeployConfig) -> Self {
        match (config.lootbox_enabled, config.existing_collectible_address) {
            (false, _) => Plan::CollectibleOnly,
            (true, Some(collectible)) => Plan::LootBoxOverExisting { collectible },
            (true, None) => Plan::FullBundle,
        }
    }

    /// The deployment steps of this plan, in execution order.
    pub fn steps(&self) -> Vec<DeployStep> {
        use ConstructorArg as Arg;

        match *self {
            Plan::CollectibleOnly => vec![
                DeployStep::new(ContractKind::Collectible, vec![Arg::Registry], true),
                DeployStep::new(
                    ContractKind::Sale,
                    vec![Arg::Deployed(ContractKind::Collectible), Arg::ExternalToken],
                    false,
                ),
            ],
            Plan::LootBoxOverExisting { collectible } => vec![DeployStep::new(
                ContractKind::LootBox,
                vec![Arg::Registry, Arg::Address(collectible)],
                true,
            )],
            Plan::FullBundle => vec![
                DeployStep::new(ContractKind::Collectible, vec![Arg::Registry], true),
                DeployStep::new(
                    ContractKind::LootBox,
                    vec![Arg::Registry, Arg::Deployed(ContractKind::Collectible)],
                    true,
                ),
                DeployStep::new(
                    ContractKind::Sale,
                    vec![Arg::Deployed(ContractKind::Collectible), Arg::ExternalToken],
                    true,
                ),
            ],
        }
    }

    /// The wiring to run after all deployments, if any.
    pub fn wiring(&self) -> Option<Wiring> {
        match self {
            Plan::CollectibleOnly => None,
            Plan::LootBoxOverExisting { .. } => Some(Wiring {
                transfer_ownership: false,
            }),
            Plan::FullBundle => Some(Wiring {
                transfer_ownership: true,
            }),
        }
    }
}
