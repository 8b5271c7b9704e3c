//! [`ContractDeployer`] backed by an Ethereum JSON-RPC endpoint.
//!
//! Transactions are sent with `eth_sendTransaction`, so the node (or a signing proxy in
//! front of it) holds the deployer key and manages its nonce.

use std::{path::PathBuf, time::Duration};

use alloy_core::primitives::{Address, B256, Bytes, U64};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    artifacts::{ContractArtifacts, DEFAULT_ARTIFACTS_DIR},
    contracts::{
        ArtifactNames, ContractKind, creation_code, set_token_ids_calldata,
        transfer_ownership_calldata,
    },
    deployer::ContractDeployer,
    rpc::{self, DEFAULT_POLL_INTERVAL},
};

/// Default JSON-RPC endpoint (a local development node).
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// Default time to wait for a transaction to be mined.
pub const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 600;

/// Configuration for [`RpcDeployer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcDeployerConfig {
    /// The JSON-RPC endpoint.
    pub rpc_url: Url,
    /// The sending account. Defaults to the node's first account.
    pub from: Option<Address>,
    /// Directory holding the compiled artifacts.
    pub artifacts_dir: PathBuf,
    /// Names of the compiled artifacts.
    pub artifact_names: ArtifactNames,
    /// Loot box class names, used to resolve rarity keys.
    pub rarity_classes: Vec<String>,
    /// How long to wait for each transaction receipt.
    pub confirmation_timeout_secs: u64,
}

impl Default for RpcDeployerConfig {
    fn default() -> Self {
        Self {
            rpc_url: Url::parse(DEFAULT_RPC_URL).expect("default RPC URL should be valid"),
            from: None,
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            artifact_names: ArtifactNames::default(),
            rarity_classes: Vec::new(),
            confirmation_timeout_secs: DEFAULT_CONFIRMATION_TIMEOUT_SECS,
        }
    }
}

/// Transaction fields sent to `eth_sendTransaction`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionRequest {
    from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    to: Option<Address>,
    data: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    gas: Option<U64>,
}

/// The parts of a transaction receipt mintbox looks at.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionReceipt {
    transaction_hash: B256,
    /// `0x1` on success, `0x0` on revert. Absent on pre-Byzantium chains.
    status: Option<U64>,
    contract_address: Option<Address>,
    gas_used: Option<U64>,
}

impl TransactionReceipt {
    fn ensure_success(&self) -> Result<()> {
        if self.status == Some(U64::ZERO) {
            anyhow::bail!("Transaction {} reverted", self.transaction_hash);
        }
        Ok(())
    }
}

/// Deploys and calls contracts through a node's unlocked account.
#[derive(Debug)]
pub struct RpcDeployer {
    client: reqwest::Client,
    rpc_url: Url,
    from: Address,
    artifacts: ContractArtifacts,
    rarity_classes: Vec<String>,
    confirmation_timeout: Duration,
}

impl RpcDeployer {
    /// Connect to the node and resolve the sending account.
    pub async fn connect(config: RpcDeployerConfig) -> Result<Self> {
        let client = rpc::create_client()?;
        let url = config.rpc_url.as_str();

        let chain_id: U64 = rpc::json_rpc_call(&client, url, "eth_chainId", vec![])
            .await
            .with_context(|| format!("Failed to reach node at {url}"))?;

        let from = match config.from {
            Some(from) => from,
            None => {
                let accounts: Vec<Address> =
                    rpc::json_rpc_call(&client, url, "eth_accounts", vec![]).await?;
                accounts
                    .first()
                    .copied()
                    .context("The node exposes no accounts; provide a deployer address")?
            }
        };

        tracing::info!(
            rpc_url = %config.rpc_url,
            chain_id = chain_id.to::<u64>(),
            %from,
            "Connected to node"
        );

        Ok(Self {
            client,
            rpc_url: config.rpc_url,
            from,
            artifacts: ContractArtifacts::new(config.artifacts_dir, config.artifact_names),
            rarity_classes: config.rarity_classes,
            confirmation_timeout: Duration::from_secs(config.confirmation_timeout_secs),
        })
    }

    /// Send a transaction and wait for a successful receipt.
    async fn send_transaction(
        &self,
        label: &str,
        tx: TransactionRequest,
    ) -> Result<TransactionReceipt> {
        let url = self.rpc_url.as_str();
        let params = vec![serde_json::to_value(&tx).context("Failed to serialize transaction")?];

        let tx_hash: B256 = rpc::json_rpc_call(&self.client, url, "eth_sendTransaction", params)
            .await
            .with_context(|| format!("Failed to submit {label} transaction"))?;

        tracing::debug!(%tx_hash, label, "Transaction submitted, waiting for receipt...");

        let client = &self.client;
        let receipt: TransactionReceipt = rpc::poll_until(
            &format!("receipt of {tx_hash}"),
            self.confirmation_timeout,
            DEFAULT_POLL_INTERVAL,
            move || async move {
                rpc::json_rpc_call::<Option<TransactionReceipt>>(
                    client,
                    url,
                    "eth_getTransactionReceipt",
                    vec![serde_json::json!(tx_hash)],
                )
                .await
            },
        )
        .await?;

        receipt
            .ensure_success()
            .with_context(|| format!("{label} transaction failed"))?;

        tracing::debug!(
            %tx_hash,
            label,
            gas_used = ?receipt.gas_used,
            "Transaction confirmed"
        );

        Ok(receipt)
    }
}

impl ContractDeployer for RpcDeployer {
    async fn deploy(
        &mut self,
        contract: ContractKind,
        args: &[Address],
        gas: Option<u64>,
    ) -> Result<Address> {
        let bytecode = self.artifacts.bytecode(contract)?;

        let tx = TransactionRequest {
            from: self.from,
            to: None,
            data: creation_code(&bytecode, args),
            gas: gas.map(U64::from),
        };

        let receipt = self.send_transaction(&contract.to_string(), tx).await?;

        receipt.contract_address.with_context(|| {
            format!(
                "Receipt of {} has no contract address",
                receipt.transaction_hash
            )
        })
    }

    async fn transfer_ownership(&mut self, collectible: Address, new_owner: Address) -> Result<()> {
        let tx = TransactionRequest {
            from: self.from,
            to: Some(collectible),
            data: transfer_ownership_calldata(new_owner),
            gas: None,
        };

        self.send_transaction("transferOwnership", tx).await?;
        Ok(())
    }

    async fn set_token_ids_for_class(
        &mut self,
        lootbox: Address,
        rarity: &str,
        token_ids: &[String],
    ) -> Result<()> {
        let tx = TransactionRequest {
            from: self.from,
            to: Some(lootbox),
            data: set_token_ids_calldata(rarity, token_ids, &self.rarity_classes)?,
            gas: None,
        };

        self.send_transaction("setTokenIdsForClass", tx).await?;
        Ok(())
    }
}
