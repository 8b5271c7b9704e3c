//! The deployer capability used by the orchestrator.

use std::{collections::BTreeMap, future::Future};

use alloy_core::primitives::Address;
use anyhow::Result;
use derive_more::Deref;
use serde::{Deserialize, Serialize};

use crate::contracts::ContractKind;

/// Capability to submit transactions to a chain and wait for their confirmation.
///
/// Every method resolves only once the transaction is confirmed, so the orchestrator can
/// rely on the effects of a call being visible before it issues the next one.
pub trait ContractDeployer: Send {
    /// Deploy `contract` with the given constructor arguments, returning its address.
    ///
    /// `gas` is an explicit gas allowance; `None` leaves estimation to the node.
    fn deploy(
        &mut self,
        contract: ContractKind,
        args: &[Address],
        gas: Option<u64>,
    ) -> impl Future<Output = Result<Address>> + Send;

    /// Call `transferOwnership(new_owner)` on the collectible.
    fn transfer_ownership(
        &mut self,
        collectible: Address,
        new_owner: Address,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Call `setTokenIdsForClass(rarity, token_ids)` on the loot box.
    fn set_token_ids_for_class(
        &mut self,
        lootbox: Address,
        rarity: &str,
        token_ids: &[String],
    ) -> impl Future<Output = Result<()>> + Send;
}

/// Addresses of the contracts deployed so far in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, Serialize, Deserialize)]
pub struct DeployedContracts(BTreeMap<ContractKind, Address>);

impl DeployedContracts {
    /// Record a completed deployment.
    pub fn record(&mut self, contract: ContractKind, address: Address) {
        self.0.insert(contract, address);
    }

    /// The address of a contract that has already been deployed in this run.
    ///
    /// Fails if the contract has not been deployed yet.
    pub fn resolve(&self, contract: ContractKind) -> Result<Address> {
        match self.0.get(&contract) {
            Some(address) => Ok(*address),
            None => anyhow::bail!("{contract} has not been deployed in this run"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_requires_prior_deployment() {
        let mut contracts = DeployedContracts::default();
        assert!(contracts.resolve(ContractKind::Collectible).is_err());

        let address = Address::repeat_byte(0x11);
        contracts.record(ContractKind::Collectible, address);

        assert_eq!(contracts.resolve(ContractKind::Collectible).unwrap(), address);
        assert!(contracts.resolve(ContractKind::LootBox).is_err());
        assert_eq!(contracts.len(), 1);
    }
}
