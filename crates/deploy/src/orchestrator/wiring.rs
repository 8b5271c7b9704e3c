//! Post-deployment wiring of the loot box.

use anyhow::{Context, Result};

use super::{runner::Orchestrator, state::RunState};
use crate::{
    contracts::ContractKind,
    deployer::{ContractDeployer, DeployedContracts},
    plan::Wiring,
};

impl Orchestrator {
    /// Hand the collectible to the loot box and register the pre-minted token ids.
    pub(super) async fn wire<D: ContractDeployer>(
        &mut self,
        wiring: Wiring,
        contracts: &DeployedContracts,
        deployer: &mut D,
    ) -> Result<()> {
        let lootbox = contracts.resolve(ContractKind::LootBox)?;

        if wiring.transfer_ownership {
            self.transition(RunState::WiringOwnership);

            let collectible = contracts.resolve(ContractKind::Collectible)?;
            tracing::info!(
                %collectible,
                new_owner = %lootbox,
                "Transferring collectible ownership to the loot box"
            );

            deployer
                .transfer_ownership(collectible, lootbox)
                .await
                .context("Failed to transfer collectible ownership to the loot box")?;
        }

        if self.config.rarity_token_ids.is_none() {
            return Ok(());
        }

        self.transition(RunState::RegisteringTokenIds);

        for (rarity, token_ids) in self.config.rarity_registrations() {
            tracing::info!(
                rarity,
                count = token_ids.len(),
                "Setting token ids for rarity {rarity}"
            );

            deployer
                .set_token_ids_for_class(lootbox, rarity, token_ids)
                .await
                .with_context(|| format!("Failed to register token ids for rarity {rarity}"))?;
        }

        Ok(())
    }
}
