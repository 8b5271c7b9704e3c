//! The contracts deployed by mintbox and the calls made on them.

use std::str::FromStr;

use alloy_core::primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolValue, sol};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

sol! {
    function transferOwnership(address newOwner) external;
    function setTokenIdsForClass(uint8 _class, uint256[] _tokenIds) external;
}

/// The contracts a deployment can create.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum ContractKind {
    /// The collectible token contract. Constructor: `(registry)`.
    Collectible,
    /// The loot box contract. Constructor: `(registry, collectible)`.
    LootBox,
    /// The sale contract. Constructor: `(collectible, externalToken)`.
    Sale,
}

/// Names of the compiled artifacts backing each [`ContractKind`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactNames {
    pub collectible: String,
    pub lootbox: String,
    pub sale: String,
}

impl Default for ArtifactNames {
    fn default() -> Self {
        Self {
            collectible: "CombMeme".to_string(),
            lootbox: "MyLootBox".to_string(),
            sale: "Sell".to_string(),
        }
    }
}

impl ArtifactNames {
    /// The artifact name for a contract kind.
    pub fn name(&self, contract: ContractKind) -> &str {
        match contract {
            ContractKind::Collectible => &self.collectible,
            ContractKind::LootBox => &self.lootbox,
            ContractKind::Sale => &self.sale,
        }
    }
}

/// Build the creation payload: bytecode followed by the ABI-encoded constructor arguments.
///
/// Every constructor used here takes only addresses, which are static types, so the
/// encoded arguments are the left-padded words in order.
pub fn creation_code(bytecode: &Bytes, args: &[Address]) -> Bytes {
    let mut code = bytecode.to_vec();
    for arg in args {
        code.extend_from_slice(&arg.abi_encode());
    }
    code.into()
}

/// Calldata for `transferOwnership(newOwner)`.
pub fn transfer_ownership_calldata(new_owner: Address) -> Bytes {
    transferOwnershipCall { newOwner: new_owner }
        .abi_encode()
        .into()
}

/// Calldata for `setTokenIdsForClass(class, tokenIds)`.
///
/// The rarity key is resolved against `rarity_classes` (see [`resolve_rarity_class`]) and
/// each token id is parsed as a decimal or `0x`-prefixed `uint256`.
pub fn set_token_ids_calldata(
    rarity: &str,
    token_ids: &[String],
    rarity_classes: &[String],
) -> Result<Bytes> {
    let class = resolve_rarity_class(rarity, rarity_classes)?;
    let token_ids = token_ids
        .iter()
        .map(|id| {
            U256::from_str(id)
                .with_context(|| format!("Invalid token id {id:?} for rarity {rarity}"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(setTokenIdsForClassCall {
        _class: class,
        _tokenIds: token_ids,
    }
    .abi_encode()
    .into())
}

/// Resolve a rarity key to the loot box's class index.
///
/// A numeric key is used as the index directly; otherwise the key is looked up by
/// position in `rarity_classes`.
pub fn resolve_rarity_class(rarity: &str, rarity_classes: &[String]) -> Result<u8> {
    if let Ok(index) = rarity.parse::<u8>() {
        return Ok(index);
    }

    let Some(index) = rarity_classes.iter().position(|class| class == rarity) else {
        anyhow::bail!(
            "Unknown rarity class {rarity:?}: expected a class index or one of {rarity_classes:?}"
        );
    };

    u8::try_from(index).with_context(|| format!("Rarity class index {index} does not fit a uint8"))
}
