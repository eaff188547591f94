//! Builder module for creating a [`Deployer`].
//!
//! [`DeployerBuilder`] turns a validated [`DeployConfig`] into a ready-to-submit
//! [`Deployer`]: it resolves the account keys, picks the chain id and name, and
//! assembles the chain config, rollup config and deployment request. Building
//! never touches the network.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::{
    Deployer,
    account::{Account, resolve_private_key},
    chain_config::{ChainConfig, ChainConfigParams},
    chain_id::generate_chain_id,
    config::DeployConfig,
    rollup_config::RollupConfig,
    rollup_creator::DeploymentRequest,
    rpc::DEFAULT_POLL_INTERVAL,
};

/// Builder for creating a [`Deployer`].
///
/// # Example
///
/// ```no_run
/// use orbit_launch_deploy::{DeployConfigInput, DeployerBuilder};
///
/// # fn example() -> anyhow::Result<()> {
/// let config = DeployConfigInput {
///     deployer_private_key: Some(std::env::var("DEPLOYER_PRIVATE_KEY")?),
///     ..Default::default()
/// }
/// .validate()?;
///
/// let deployer = DeployerBuilder::new(config).chain_name("my-orbit-chain").build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DeployerBuilder {
    config: DeployConfig,
    /// Delay between receipt polls.
    poll_interval: Duration,
}

impl DeployerBuilder {
    pub fn new(config: DeployConfig) -> Self {
        Self {
            config,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Pin the chain id instead of generating one.
    pub fn chain_id(mut self, chain_id: u64) -> Self {
        self.config.chain_id = Some(chain_id);
        self
    }

    /// Set the chain name.
    ///
    /// If not set, a memorable two-word name will be generated (e.g., "orbit-happy-turtle").
    pub fn chain_name(mut self, name: impl Into<String>) -> Self {
        self.config.chain_name = Some(name.into());
        self
    }

    pub fn poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Build the [`Deployer`].
    ///
    /// This method:
    /// 1. Derives the deployer account and the batch poster and validator accounts,
    ///    generating keys for the latter two when none were configured
    /// 2. Generates a chain id and a chain name if not provided
    /// 3. Assembles the chain config and the rollup config
    /// 4. Freezes everything into the [`DeploymentRequest`]
    pub fn build(self) -> Result<Deployer> {
        let config = self.config;

        let deployer = Account::from_private_key(config.deployer_private_key)
            .context("Failed to load deployer account")?;
        let batch_poster =
            Account::from_private_key(resolve_private_key(config.batch_poster_private_key))
                .context("Failed to load batch poster account")?;
        let validator =
            Account::from_private_key(resolve_private_key(config.validator_private_key))
                .context("Failed to load validator account")?;

        let chain_id = config.chain_id.unwrap_or_else(generate_chain_id);

        let chain_name = config.chain_name.unwrap_or_else(|| {
            let name = names::Generator::default()
                .next()
                .unwrap_or_else(|| "unknown-chain".to_string());
            format!("orbit-{}", name)
        });

        let chain_config = ChainConfig::prepare(ChainConfigParams {
            chain_id,
            owner: deployer.address(),
            data_availability_committee: config.data_availability_committee,
            initial_arbos_version: config.initial_arbos_version,
        });

        let mut rollup_config = RollupConfig::prepare(chain_id, deployer.address(), &chain_config)?;
        if let Some(wasm_module_root) = config.wasm_module_root {
            rollup_config = rollup_config.with_wasm_module_root(wasm_module_root.resolve());
        }

        let request = DeploymentRequest::new(
            rollup_config,
            batch_poster.address(),
            vec![validator.address()],
            deployer.address(),
            config.native_token,
        );

        tracing::info!(
            chain_name,
            chain_id,
            parent_chain = %config.parent_chain,
            variant = %config.variant,
            submission = %config.submission,
            deployer = %deployer.address(),
            batch_poster = %batch_poster.address(),
            validator = %validator.address(),
            "Building Orbit rollup deployment..."
        );

        Ok(Deployer {
            parent_chain: config.parent_chain,
            parent_chain_rpc_url: config.parent_chain_rpc_url,
            parent_chain_node_url: config.parent_chain_node_url,
            rollup_creator: config.rollup_creator,
            submission: config.submission,
            chain_name,
            deployer,
            batch_poster,
            validator,
            request,
            min_l2_base_fee: config.min_l2_base_fee,
            output: config.output,
            receipt_timeout: config.receipt_timeout,
            poll_interval: self.poll_interval,
        })
    }
}
