use std::{path::PathBuf, time::Duration};

use alloy_core::primitives::Address;
use anyhow::{Context, Result};
use url::Url;

use crate::{
    account::Account,
    config::SubmissionMode,
    manifest::{ManifestDefaults, OrbitSetupManifest},
    parent_chain::ParentChain,
    receipt::DeploymentResult,
    rollup_creator::{DeploymentRequest, RollupCreator},
    rpc::ParentChainClient,
};

/// Main deployer that orchestrates a single Orbit rollup deployment.
///
/// Created by [`crate::DeployerBuilder`]. The deployment request is frozen at
/// build time; [`Deployer::deploy`] only submits it and records the outcome.
#[derive(Debug, Clone)]
pub struct Deployer {
    pub parent_chain: ParentChain,
    pub parent_chain_rpc_url: Url,
    /// The RPC URL as the operator configured it.
    pub parent_chain_node_url: String,
    /// Address of the RollupCreator contract on the parent chain.
    pub rollup_creator: Address,
    pub submission: SubmissionMode,
    pub chain_name: String,

    /// Submits the deployment and owns the new chain.
    pub deployer: Account,
    pub batch_poster: Account,
    pub validator: Account,

    pub request: DeploymentRequest,

    pub min_l2_base_fee: u64,
    /// Path of the manifest file.
    pub output: PathBuf,
    pub receipt_timeout: Duration,
    pub poll_interval: Duration,
}

/// What a successful deployment produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOutcome {
    pub result: DeploymentResult,
    pub manifest: OrbitSetupManifest,
    pub manifest_path: PathBuf,
}

impl Deployer {
    /// The chain id of the rollup being deployed.
    pub fn chain_id(&self) -> u64 {
        self.request.config.chain_id
    }

    fn manifest_defaults(&self) -> ManifestDefaults {
        ManifestDefaults {
            min_l2_base_fee: self.min_l2_base_fee,
            chain_owner: self.deployer.address(),
            network_fee_receiver: self.deployer.address(),
            infrastructure_fee_collector: self.deployer.address(),
            parent_chain_node_url: self.parent_chain_node_url.clone(),
            parent_chain_id: self.parent_chain.chain_id(),
            chain_name: self.chain_name.clone(),
            batch_poster: self.batch_poster.address(),
            chain_id: self.chain_id(),
            staker: self.validator.address(),
        }
    }

    /// Submit the `createRollup` transaction step by step.
    async fn submit_manually<C: ParentChainClient>(
        &self,
        rollup_creator: &RollupCreator<'_, C>,
    ) -> Result<DeploymentResult> {
        let transaction = rollup_creator
            .prepare_transaction_request(&self.request)
            .await
            .context("Failed to prepare createRollup transaction")?;

        let raw = self
            .deployer
            .sign_transaction(&transaction)
            .context("Failed to sign createRollup transaction")?;

        let tx_hash = rollup_creator.send_raw_transaction(&raw).await?;
        tracing::info!(%tx_hash, "createRollup transaction sent");

        let receipt = rollup_creator.wait_for_receipt(tx_hash).await?;

        DeploymentResult::from_receipt(&receipt).context("Failed to decode deployment result")
    }

    /// Deploy the rollup and write the manifest.
    ///
    /// The manifest is only written once the deployment is confirmed and decoded.
    pub async fn deploy<C: ParentChainClient>(&self, client: &C) -> Result<DeploymentOutcome> {
        tracing::info!(
            rollup_config = ?self.request.config,
            chain_config = %self.request.config.chain_config,
            "Prepared rollup config"
        );

        let rollup_creator = RollupCreator::new(client, self.rollup_creator, self.parent_chain)
            .with_receipt_timeout(self.receipt_timeout)
            .with_poll_interval(self.poll_interval);

        tracing::info!(
            submission = %self.submission,
            rollup_creator = %self.rollup_creator,
            parent_chain = %self.parent_chain,
            "Creating rollup..."
        );

        let result = match self.submission {
            SubmissionMode::Composite => rollup_creator
                .create_rollup(&self.request, &self.deployer)
                .await
                .context("Failed to create rollup")?,
            SubmissionMode::Manual => self.submit_manually(&rollup_creator).await?,
        };

        tracing::info!("✓ Rollup created!");
        tracing::info!("");
        tracing::info!("Transaction hash:        {}", result.transaction_hash);
        if let Some(url) = self.parent_chain.explorer_tx_url(result.transaction_hash) {
            tracing::info!("Explorer:                {}", url);
        }
        tracing::info!("Chain id:                {}", self.chain_id());
        tracing::info!("Chain name:              {}", self.chain_name);
        tracing::info!("Rollup:                  {}", result.core_contracts.rollup);
        tracing::info!("Wasm module root:        {}", self.request.config.wasm_module_root);
        tracing::info!("");
        tracing::info!("=== Store these keys, they are not written anywhere else ===");
        tracing::info!(
            "Batch poster:            {} (private key {})",
            self.batch_poster.address(),
            self.batch_poster.private_key_hex()
        );
        tracing::info!(
            "Validator:               {} (private key {})",
            self.validator.address(),
            self.validator.private_key_hex()
        );
        tracing::info!("");

        let manifest = OrbitSetupManifest::new(self.manifest_defaults(), &result);
        manifest
            .write_atomic(&self.output)
            .context("Failed to write manifest")?;

        Ok(DeploymentOutcome {
            result,
            manifest,
            manifest_path: self.output.clone(),
        })
    }
}
