//! The rollup configuration submitted to `RollupCreator.createRollup`.

use std::str::FromStr;

use alloy_core::primitives::{Address, B256, U256, b256};
use serde::{Deserialize, Serialize};

use crate::{abi, chain_config::ChainConfig};

/// Blocks an assertion must wait before it can be confirmed.
pub const DEFAULT_CONFIRM_PERIOD_BLOCKS: u64 = 150;

/// Minimum validator stake, 0.1 ETH.
pub const DEFAULT_BASE_STAKE: U256 = U256::from_limbs([100_000_000_000_000_000, 0, 0, 0]);

/// Root of the WAVM replay binary of the consensus release new chains run by default.
pub const DEFAULT_WASM_MODULE_ROOT: B256 =
    b256!("0xf4389b835497a910d7ba3ebfb77aa93da985634f3c052de1290360635be40c4a");

/// Module root of the validator build for x86_64 hosts.
pub const AMD64_WASM_MODULE_ROOT: B256 =
    b256!("0xba5ff5ddc46b5c63fa02168819b8e236fa18b4b551f20eba378e3543477298bf");

/// Module root of the validator build for aarch64 hosts.
pub const ARM64_WASM_MODULE_ROOT: B256 =
    b256!("0x1cc4dd8f036f93e37b6c9fa4edfbefaf19cf893558e9358ad41ccb3804684092");

/// Bounds on how far sequencer-inbox messages may drift from the parent chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaxTimeVariation {
    pub delay_blocks: u64,
    pub future_blocks: u64,
    pub delay_seconds: u64,
    pub future_seconds: u64,
}

impl Default for MaxTimeVariation {
    fn default() -> Self {
        Self {
            delay_blocks: 5_760,
            future_blocks: 48,
            delay_seconds: 86_400,
            future_seconds: 3_600,
        }
    }
}

/// Selection of the WASM module root the rollup validates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WasmModuleRoot {
    Amd64,
    Arm64,
    /// Pick [`WasmModuleRoot::Amd64`] or [`WasmModuleRoot::Arm64`] from the CPU of this host.
    Host,
    Custom(B256),
}

impl FromStr for WasmModuleRoot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "amd64" => Ok(Self::Amd64),
            "arm64" => Ok(Self::Arm64),
            "host" => Ok(Self::Host),
            other => other.parse::<B256>().map(Self::Custom).map_err(|_| {
                anyhow::anyhow!(
                    "Invalid wasm module root '{}': expected amd64, arm64, host or a 32-byte hex hash",
                    other
                )
            }),
        }
    }
}

impl WasmModuleRoot {
    /// The concrete root hash for this selection.
    pub fn resolve(&self) -> B256 {
        match self {
            Self::Amd64 => AMD64_WASM_MODULE_ROOT,
            Self::Arm64 => ARM64_WASM_MODULE_ROOT,
            Self::Host if std::env::consts::ARCH == "aarch64" => ARM64_WASM_MODULE_ROOT,
            Self::Host => AMD64_WASM_MODULE_ROOT,
            Self::Custom(root) => *root,
        }
    }
}

/// Rollup configuration, mirroring the `Config` struct of the RollupCreator ABI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollupConfig {
    pub confirm_period_blocks: u64,
    pub extra_challenge_time_blocks: u64,
    pub stake_token: Address,
    pub base_stake: U256,
    pub wasm_module_root: B256,
    pub owner: Address,
    pub loser_stake_escrow: Address,
    pub chain_id: u64,
    /// JSON-encoded [`ChainConfig`].
    pub chain_config: String,
    pub genesis_block_num: u64,
    pub sequencer_inbox_max_time_variation: MaxTimeVariation,
}

impl RollupConfig {
    /// Build a rollup config with the default staking and timing parameters.
    pub fn prepare(
        chain_id: u64,
        owner: Address,
        chain_config: &ChainConfig,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            confirm_period_blocks: DEFAULT_CONFIRM_PERIOD_BLOCKS,
            extra_challenge_time_blocks: 0,
            stake_token: Address::ZERO,
            base_stake: DEFAULT_BASE_STAKE,
            wasm_module_root: DEFAULT_WASM_MODULE_ROOT,
            owner,
            loser_stake_escrow: Address::ZERO,
            chain_id,
            chain_config: chain_config.to_json_string()?,
            genesis_block_num: 0,
            sequencer_inbox_max_time_variation: MaxTimeVariation::default(),
        })
    }

    /// Override the WASM module root.
    ///
    /// The root must match the replay binary of the validators that will run
    /// against this rollup, otherwise they cannot prove or challenge assertions.
    pub fn with_wasm_module_root(mut self, wasm_module_root: B256) -> Self {
        tracing::warn!(
            %wasm_module_root,
            "Overriding the wasm module root: validators must run a build with the same root"
        );
        self.wasm_module_root = wasm_module_root;
        self
    }

    pub(crate) fn to_abi(&self) -> abi::Config {
        let variation = &self.sequencer_inbox_max_time_variation;
        abi::Config {
            confirmPeriodBlocks: self.confirm_period_blocks,
            extraChallengeTimeBlocks: self.extra_challenge_time_blocks,
            stakeToken: self.stake_token,
            baseStake: self.base_stake,
            wasmModuleRoot: self.wasm_module_root,
            owner: self.owner,
            loserStakeEscrow: self.loser_stake_escrow,
            chainId: U256::from(self.chain_id),
            chainConfig: self.chain_config.clone(),
            genesisBlockNum: self.genesis_block_num,
            sequencerInboxMaxTimeVariation: abi::MaxTimeVariation {
                delayBlocks: U256::from(variation.delay_blocks),
                futureBlocks: U256::from(variation.future_blocks),
                delaySeconds: U256::from(variation.delay_seconds),
                futureSeconds: U256::from(variation.future_seconds),
            },
        }
    }
}
