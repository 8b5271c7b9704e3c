//! Deployment execution engine.

use alloy_core::primitives::Address;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::state::RunState;
use crate::{
    config::DeployConfig,
    deployer::{ContractDeployer, DeployedContracts},
    network::registry_address,
    plan::{ConstructorArg, DeployStep, Plan},
};

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentOutcome {
    pub network: String,
    pub plan: Plan,
    pub registry: Address,
    pub contracts: DeployedContracts,
}

/// Runs one deployment: selects the plan from the configuration, deploys its contracts
/// strictly in order and runs the wiring.
///
/// Every call is awaited before the next one starts. The first failure stops the run and
/// nothing already deployed is undone.
#[derive(Debug)]
pub struct Orchestrator {
    pub(super) config: DeployConfig,
    registry: Address,
    plan: Plan,
    state: RunState,
}

impl Orchestrator {
    /// Create an orchestrator for a configuration, selecting its plan.
    pub fn new(config: DeployConfig) -> Self {
        let registry = registry_address(&config.network);
        let plan = Plan::select(&config);

        let mut orchestrator = Self {
            config,
            registry,
            plan,
            state: RunState::Start,
        };

        orchestrator.transition(RunState::PlanSelected);
        tracing::info!(
            network = %orchestrator.config.network,
            registry = %registry,
            plan = %plan,
            "Deployment plan selected"
        );

        orchestrator
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    pub fn plan(&self) -> Plan {
        self.plan
    }

    pub fn registry(&self) -> Address {
        self.registry
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Execute the plan against a deployer.
    ///
    /// An orchestrator runs once; calling this again after it finished is an error.
    pub async fn run<D: ContractDeployer>(
        &mut self,
        deployer: &mut D,
    ) -> Result<DeploymentOutcome> {
        if self.state.is_terminal() {
            anyhow::bail!("Deployment run already finished in state {}", self.state);
        }

        match self.execute(deployer).await {
            Ok(contracts) => {
                self.transition(RunState::Done);
                tracing::info!(plan = %self.plan, "Deployment complete");

                Ok(DeploymentOutcome {
                    network: self.config.network.clone(),
                    plan: self.plan,
                    registry: self.registry,
                    contracts,
                })
            }
            Err(err) => {
                tracing::error!(state = %self.state, error = %err, "Deployment failed");
                self.transition(RunState::Failed);
                Err(err)
            }
        }
    }

    async fn execute<D: ContractDeployer>(
        &mut self,
        deployer: &mut D,
    ) -> Result<DeployedContracts> {
        let mut contracts = DeployedContracts::default();

        for step in self.plan.steps() {
            self.transition(RunState::Deploying(step.contract));

            let args = self.resolve_args(&step, &contracts)?;
            let gas = step.bounded_gas.then_some(self.config.gas_limit);

            tracing::info!(contract = %step.contract, ?args, ?gas, "Deploying contract...");

            let address = deployer
                .deploy(step.contract, &args, gas)
                .await
                .with_context(|| format!("Failed to deploy {}", step.contract))?;

            tracing::info!(contract = %step.contract, %address, "Contract deployed");
            contracts.record(step.contract, address);
        }

        if let Some(wiring) = self.plan.wiring() {
            self.wire(wiring, &contracts, deployer).await?;
        }

        Ok(contracts)
    }

    /// Resolve a step's constructor arguments against the deployments completed so far.
    fn resolve_args(
        &self,
        step: &DeployStep,
        contracts: &DeployedContracts,
    ) -> Result<Vec<Address>> {
        step.args
            .iter()
            .map(|arg| match arg {
                ConstructorArg::Registry => Ok(self.registry),
                ConstructorArg::ExternalToken => Ok(self.config.external_token_address),
                ConstructorArg::Address(address) => Ok(*address),
                ConstructorArg::Deployed(dependency) => contracts
                    .resolve(*dependency)
                    .with_context(|| format!("{} depends on {dependency}", step.contract)),
            })
            .collect()
    }

    pub(super) fn transition(&mut self, next: RunState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal transition {} -> {next}",
            self.state
        );
        tracing::debug!(from = %self.state, to = %next, "Run state transition");
        self.state = next;
    }
}
