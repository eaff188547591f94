//! Deployment configuration and its validation.

use std::{path::PathBuf, time::Duration};

use alloy_core::primitives::{Address, B256};
use url::Url;

use crate::{
    account::{Account, sanitize_private_key},
    chain_config::DEFAULT_INITIAL_ARBOS_VERSION,
    chain_id::is_reserved_chain_id,
    manifest::{DEFAULT_MANIFEST_FILENAME, DEFAULT_MIN_L2_BASE_FEE},
    parent_chain::ParentChain,
    rollup_config::WasmModuleRoot,
    rollup_creator::DEFAULT_RECEIPT_TIMEOUT,
};

pub const DEPLOYER_PRIVATE_KEY: &str = "DEPLOYER_PRIVATE_KEY";
pub const BATCH_POSTER_PRIVATE_KEY: &str = "BATCH_POSTER_PRIVATE_KEY";
pub const VALIDATOR_PRIVATE_KEY: &str = "VALIDATOR_PRIVATE_KEY";
pub const CUSTOM_FEE_TOKEN_ADDRESS: &str = "CUSTOM_FEE_TOKEN_ADDRESS";
pub const PARENT_CHAIN_RPC_URL: &str = "ORBIT_PARENT_CHAIN_RPC_URL";
pub const ROLLUP_CREATOR: &str = "ORBIT_ROLLUP_CREATOR";
pub const WASM_MODULE_ROOT: &str = "ORBIT_WASM_MODULE_ROOT";
pub const CHAIN_ID: &str = "ORBIT_CHAIN_ID";

/// How rollup gas is paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum RollupVariant {
    #[default]
    Eth,
    /// Gas is paid with an ERC-20 token on the parent chain.
    CustomFeeToken,
}

impl RollupVariant {
    /// Data availability committee setting used when none is configured.
    pub fn default_data_availability_committee(&self) -> bool {
        match self {
            Self::Eth => true,
            Self::CustomFeeToken => false,
        }
    }
}

/// How the `createRollup` transaction is submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum SubmissionMode {
    /// A single call that prepares, signs, broadcasts and confirms.
    #[default]
    Composite,
    /// Each step driven separately.
    Manual,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required configuration: {}", .0.join(", "))]
    Missing(Vec<&'static str>),
    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Raw deployment configuration, as collected from flags and environment.
#[derive(Debug, Clone)]
pub struct DeployConfigInput {
    pub deployer_private_key: Option<String>,
    pub batch_poster_private_key: Option<String>,
    pub validator_private_key: Option<String>,
    pub custom_fee_token_address: Option<String>,
    pub variant: RollupVariant,
    pub submission: SubmissionMode,
    pub parent_chain: ParentChain,
    pub parent_chain_rpc_url: Option<String>,
    pub rollup_creator: Option<String>,
    pub chain_id: Option<u64>,
    pub chain_name: Option<String>,
    pub data_availability_committee: Option<bool>,
    pub initial_arbos_version: u64,
    pub wasm_module_root: Option<String>,
    pub min_l2_base_fee: u64,
    pub output: PathBuf,
    pub receipt_timeout: Duration,
}

impl Default for DeployConfigInput {
    fn default() -> Self {
        Self {
            deployer_private_key: None,
            batch_poster_private_key: None,
            validator_private_key: None,
            custom_fee_token_address: None,
            variant: RollupVariant::default(),
            submission: SubmissionMode::default(),
            parent_chain: ParentChain::default(),
            parent_chain_rpc_url: None,
            rollup_creator: None,
            chain_id: None,
            chain_name: None,
            data_availability_committee: None,
            initial_arbos_version: DEFAULT_INITIAL_ARBOS_VERSION,
            wasm_module_root: None,
            min_l2_base_fee: DEFAULT_MIN_L2_BASE_FEE,
            output: PathBuf::from(DEFAULT_MANIFEST_FILENAME),
            receipt_timeout: DEFAULT_RECEIPT_TIMEOUT,
        }
    }
}

/// Validated deployment configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployConfig {
    pub deployer_private_key: B256,
    pub batch_poster_private_key: Option<B256>,
    pub validator_private_key: Option<B256>,
    pub variant: RollupVariant,
    pub submission: SubmissionMode,
    pub parent_chain: ParentChain,
    pub parent_chain_rpc_url: Url,
    /// The RPC URL exactly as configured, recorded in the manifest.
    pub parent_chain_node_url: String,
    pub rollup_creator: Address,
    /// Fee token of a custom fee token rollup, `None` for ETH rollups.
    pub native_token: Option<Address>,
    pub chain_id: Option<u64>,
    pub chain_name: Option<String>,
    pub data_availability_committee: bool,
    pub initial_arbos_version: u64,
    pub wasm_module_root: Option<WasmModuleRoot>,
    pub min_l2_base_fee: u64,
    pub output: PathBuf,
    pub receipt_timeout: Duration,
}

/// Empty and whitespace-only values are treated as unset.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_private_key(key: &'static str, value: &str) -> Result<B256, ConfigError> {
    let private_key = sanitize_private_key(value).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })?;
    Account::from_private_key(private_key).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })?;
    Ok(private_key)
}

fn parse_address(key: &'static str, value: &str) -> Result<Address, ConfigError> {
    value.parse().map_err(|e| ConfigError::Invalid {
        key,
        reason: format!("{}", e),
    })
}

impl DeployConfigInput {
    /// Validate every field in one pass.
    ///
    /// All missing required keys are reported together. No network access.
    pub fn validate(self) -> Result<DeployConfig, ConfigError> {
        let mut missing = Vec::new();

        let deployer_private_key = present(self.deployer_private_key);
        if deployer_private_key.is_none() {
            missing.push(DEPLOYER_PRIVATE_KEY);
        }

        let custom_fee_token_address = present(self.custom_fee_token_address);
        let custom_fee_token_address = match self.variant {
            RollupVariant::CustomFeeToken => {
                if custom_fee_token_address.is_none() {
                    missing.push(CUSTOM_FEE_TOKEN_ADDRESS);
                }
                custom_fee_token_address
            }
            RollupVariant::Eth => {
                if custom_fee_token_address.is_some() {
                    tracing::warn!(
                        "{} is ignored when deploying an ETH rollup",
                        CUSTOM_FEE_TOKEN_ADDRESS
                    );
                }
                None
            }
        };

        let parent_chain_rpc_url = present(self.parent_chain_rpc_url)
            .or_else(|| self.parent_chain.default_rpc_url().map(str::to_string));
        if parent_chain_rpc_url.is_none() {
            missing.push(PARENT_CHAIN_RPC_URL);
        }

        let rollup_creator = present(self.rollup_creator);
        if rollup_creator.is_none() && self.parent_chain.rollup_creator().is_none() {
            missing.push(ROLLUP_CREATOR);
        }

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let deployer_private_key = deployer_private_key
            .map(|key| parse_private_key(DEPLOYER_PRIVATE_KEY, &key))
            .transpose()?
            .ok_or(ConfigError::Missing(vec![DEPLOYER_PRIVATE_KEY]))?;
        let batch_poster_private_key = present(self.batch_poster_private_key)
            .map(|key| parse_private_key(BATCH_POSTER_PRIVATE_KEY, &key))
            .transpose()?;
        let validator_private_key = present(self.validator_private_key)
            .map(|key| parse_private_key(VALIDATOR_PRIVATE_KEY, &key))
            .transpose()?;

        let native_token = custom_fee_token_address
            .map(|address| parse_address(CUSTOM_FEE_TOKEN_ADDRESS, &address))
            .transpose()?;

        let parent_chain_node_url =
            parent_chain_rpc_url.ok_or(ConfigError::Missing(vec![PARENT_CHAIN_RPC_URL]))?;
        let parent_chain_rpc_url =
            Url::parse(&parent_chain_node_url).map_err(|e| ConfigError::Invalid {
                key: PARENT_CHAIN_RPC_URL,
                reason: e.to_string(),
            })?;

        let rollup_creator = match rollup_creator {
            Some(address) => parse_address(ROLLUP_CREATOR, &address)?,
            None => self
                .parent_chain
                .rollup_creator()
                .ok_or(ConfigError::Missing(vec![ROLLUP_CREATOR]))?,
        };

        let wasm_module_root = present(self.wasm_module_root)
            .map(|root| {
                root.parse::<WasmModuleRoot>()
                    .map_err(|e| ConfigError::Invalid {
                        key: WASM_MODULE_ROOT,
                        reason: e.to_string(),
                    })
            })
            .transpose()?;

        if let Some(chain_id) = self.chain_id {
            if chain_id == 0 {
                return Err(ConfigError::Invalid {
                    key: CHAIN_ID,
                    reason: "chain id must be positive".to_string(),
                });
            }
            if chain_id == self.parent_chain.chain_id() || is_reserved_chain_id(chain_id) {
                return Err(ConfigError::Invalid {
                    key: CHAIN_ID,
                    reason: format!("chain id {} belongs to an existing network", chain_id),
                });
            }
        }

        let data_availability_committee = self
            .data_availability_committee
            .unwrap_or_else(|| self.variant.default_data_availability_committee());

        Ok(DeployConfig {
            deployer_private_key,
            batch_poster_private_key,
            validator_private_key,
            variant: self.variant,
            submission: self.submission,
            parent_chain: self.parent_chain,
            parent_chain_rpc_url,
            parent_chain_node_url,
            rollup_creator,
            native_token,
            chain_id: self.chain_id,
            chain_name: present(self.chain_name),
            data_availability_committee,
            initial_arbos_version: self.initial_arbos_version,
            wasm_module_root,
            min_l2_base_fee: self.min_l2_base_fee,
            output: self.output,
            receipt_timeout: self.receipt_timeout,
        })
    }
}
