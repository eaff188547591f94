//! Arbitrum chain configuration embedded in the rollup config.

use alloy_core::primitives::{Address, B256};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// ArbOS version the chain boots with unless configured otherwise.
pub const DEFAULT_INITIAL_ARBOS_VERSION: u64 = 11;

/// Maximum contract code size (EIP-170 default).
pub const DEFAULT_MAX_CODE_SIZE: u64 = 24_576;

/// Maximum init code size (EIP-3860 default).
pub const DEFAULT_MAX_INIT_CODE_SIZE: u64 = 49_152;

/// Inputs for [`ChainConfig::prepare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfigParams {
    pub chain_id: u64,
    pub owner: Address,
    pub data_availability_committee: bool,
    pub initial_arbos_version: u64,
}

/// Clique settings, unused by Arbitrum but required by the config schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CliqueConfig {
    pub period: u64,
    pub epoch: u64,
}

/// The `arbitrum` section of the chain config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ArbitrumChainParams {
    #[serde(rename = "EnableArbOS")]
    pub enable_arbos: bool,
    pub allow_debug_precompiles: bool,
    /// Whether batches are posted to a data availability committee (AnyTrust)
    /// instead of the parent chain.
    pub data_availability_committee: bool,
    #[serde(rename = "InitialArbOSVersion")]
    pub initial_arbos_version: u64,
    pub initial_chain_owner: Address,
    pub genesis_block_num: u64,
    pub max_code_size: u64,
    pub max_init_code_size: u64,
}

/// Geth-style chain config with an Arbitrum extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    pub chain_id: u64,
    pub homestead_block: u64,
    pub dao_fork_block: Option<u64>,
    pub dao_fork_support: bool,
    pub eip150_block: u64,
    pub eip150_hash: B256,
    pub eip155_block: u64,
    pub eip158_block: u64,
    pub byzantium_block: u64,
    pub constantinople_block: u64,
    pub petersburg_block: u64,
    pub istanbul_block: u64,
    pub muir_glacier_block: u64,
    pub berlin_block: u64,
    pub london_block: u64,
    pub clique: CliqueConfig,
    pub arbitrum: ArbitrumChainParams,
}

impl ChainConfig {
    /// Build a chain config with every fork active from genesis.
    pub fn prepare(params: ChainConfigParams) -> Self {
        Self {
            chain_id: params.chain_id,
            homestead_block: 0,
            dao_fork_block: None,
            dao_fork_support: true,
            eip150_block: 0,
            eip150_hash: B256::ZERO,
            eip155_block: 0,
            eip158_block: 0,
            byzantium_block: 0,
            constantinople_block: 0,
            petersburg_block: 0,
            istanbul_block: 0,
            muir_glacier_block: 0,
            berlin_block: 0,
            london_block: 0,
            clique: CliqueConfig::default(),
            arbitrum: ArbitrumChainParams {
                enable_arbos: true,
                allow_debug_precompiles: false,
                data_availability_committee: params.data_availability_committee,
                initial_arbos_version: params.initial_arbos_version,
                initial_chain_owner: params.owner,
                genesis_block_num: 0,
                max_code_size: DEFAULT_MAX_CODE_SIZE,
                max_init_code_size: DEFAULT_MAX_INIT_CODE_SIZE,
            },
        }
    }

    /// Compact JSON, as stored on-chain in the rollup config.
    pub fn to_json_string(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("Failed to serialize chain config")
    }
}
